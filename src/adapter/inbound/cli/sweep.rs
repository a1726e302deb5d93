//! Handler for the `sweep` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::trending::SweepOutcome;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_components;
use crate::infrastructure::config::settings::Config;

/// Run a single eviction sweep and print its report.
pub async fn execute(config: &Config) -> Result<()> {
    let components = build_components(config)?;

    let report = match components.sweeper.run_once().await {
        SweepOutcome::Completed(report) => report,
        SweepOutcome::Skipped => {
            output::warning("A sweep is already running");
            return Ok(());
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "sweep",
            "scanned": report.scanned,
            "evicted": report.evicted,
            "removed_entries": report.removed_entries,
            "failed": report.failed,
        }));
        return Ok(());
    }

    output::section("Eviction Sweep");
    output::field("Backend", components.store.backend_name());
    output::field("Retention", format!("{}s", config.trending.retention_secs));
    output::field("Scanned", report.scanned);
    output::field("Evicted", report.evicted);
    output::field("Removed", report.removed_entries);
    if report.failed > 0 {
        output::warning(&format!(
            "{} entries failed to update; they will be retried next sweep",
            report.failed
        ));
    } else {
        output::success("Sweep completed");
    }

    Ok(())
}
