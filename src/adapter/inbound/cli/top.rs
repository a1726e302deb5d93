//! Handler for the `top` command.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::output;
use crate::domain::TopicCount;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_components;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct TopicRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Hashtag")]
    hashtag: String,
    #[tabled(rename = "Posts")]
    post_count: usize,
}

fn rows(topics: &[TopicCount]) -> Vec<TopicRow> {
    topics
        .iter()
        .enumerate()
        .map(|(i, topic)| TopicRow {
            rank: i + 1,
            hashtag: topic.hashtag.to_tag(),
            post_count: topic.post_count,
        })
        .collect()
}

/// Print the current top hashtags straight from the store.
pub async fn execute(config: &Config, limit: Option<usize>) -> Result<()> {
    let components = build_components(config)?;
    let limit = limit.unwrap_or(config.trending.top_n);
    let topics = components.service.top_n(limit).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "top",
            "trending": topics,
        }));
        return Ok(());
    }

    output::section("Trending");
    if topics.is_empty() {
        output::note("(no hashtags in the retention window)");
        return Ok(());
    }

    output::table(rows(&topics));
    Ok(())
}
