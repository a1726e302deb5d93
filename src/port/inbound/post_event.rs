//! Post-lifecycle notifications.
//!
//! The post store owns posts; trending only hears about their lifecycle.
//! Events arrive as JSON tagged by `type`:
//!
//! ```json
//! {"type": "created", "postId": "p1", "content": "Loving #rust"}
//! {"type": "edited", "postId": "p1", "oldContent": "#rust", "newContent": "#go"}
//! {"type": "deleted", "postId": "p1", "hashtags": ["rust"]}
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{extract_hashtags, Hashtag, PostId};

/// A change to a post that may affect trending aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum PostEvent {
    /// A post was published.
    Created {
        post_id: PostId,
        content: String,
        /// Defaults to the time the event is applied.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created_at: Option<DateTime<Utc>>,
    },

    /// A post was deleted.
    ///
    /// `hashtags` is the set the post was last known to carry. When absent,
    /// it is recomputed from `content`.
    Deleted {
        post_id: PostId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hashtags: Option<BTreeSet<Hashtag>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },

    /// A post's content changed.
    Edited {
        post_id: PostId,
        old_content: String,
        new_content: String,
    },
}

impl PostEvent {
    #[must_use]
    pub fn post_id(&self) -> &PostId {
        match self {
            Self::Created { post_id, .. }
            | Self::Deleted { post_id, .. }
            | Self::Edited { post_id, .. } => post_id,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Deleted { .. } => "deleted",
            Self::Edited { .. } => "edited",
        }
    }
}

/// Resolve the hashtag set of a deleted post.
#[must_use]
pub fn deleted_hashtags(
    hashtags: Option<BTreeSet<Hashtag>>,
    content: Option<&str>,
) -> BTreeSet<Hashtag> {
    match (hashtags, content) {
        (Some(tags), _) => tags,
        (None, Some(content)) => extract_hashtags(content),
        (None, None) => BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_created_event() {
        let event: PostEvent = serde_json::from_str(
            r#"{"type":"created","postId":"p1","content":"Loving #rust"}"#,
        )
        .unwrap();

        assert_eq!(event.kind(), "created");
        assert_eq!(event.post_id().as_str(), "p1");
        assert!(matches!(event, PostEvent::Created { created_at: None, .. }));
    }

    #[test]
    fn parses_edited_event() {
        let event: PostEvent = serde_json::from_str(
            r##"{"type":"edited","postId":"p1","oldContent":"#ai","newContent":"#ml"}"##,
        )
        .unwrap();

        match event {
            PostEvent::Edited {
                old_content,
                new_content,
                ..
            } => {
                assert_eq!(old_content, "#ai");
                assert_eq!(new_content, "#ml");
            }
            other => panic!("expected edited event, got {other:?}"),
        }
    }

    #[test]
    fn deleted_hashtags_normalise_on_parse() {
        let event: PostEvent = serde_json::from_str(
            r##"{"type":"deleted","postId":"p1","hashtags":["#AI","ml"]}"##,
        )
        .unwrap();

        let PostEvent::Deleted { hashtags, content, .. } = event else {
            panic!("expected deleted event");
        };
        let tags = deleted_hashtags(hashtags, content.as_deref());
        let names: Vec<_> = tags.iter().map(Hashtag::as_str).collect();
        assert_eq!(names, vec!["ai", "ml"]);
    }

    #[test]
    fn deleted_falls_back_to_content() {
        let tags = deleted_hashtags(None, Some("bye #rust"));
        assert_eq!(tags.len(), 1);
        assert!(deleted_hashtags(None, None).is_empty());
    }

    #[test]
    fn rejects_empty_post_id() {
        let result = serde_json::from_str::<PostEvent>(
            r#"{"type":"created","postId":"","content":"x"}"#,
        );
        assert!(result.is_err());
    }
}
