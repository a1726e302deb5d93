//! Response envelopes.
//!
//! Every body carries `success` and a human-readable `message`.

use serde::{Deserialize, Serialize};

use crate::domain::TopicCount;

/// Body of a successful trending query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub success: bool,
    pub message: String,
    pub trending: Vec<TopicCount>,
}

impl TrendingResponse {
    pub const MESSAGE: &'static str = "Trending Topics fetched";

    #[must_use]
    pub fn new(trending: Vec<TopicCount>) -> Self {
        Self {
            success: true,
            message: Self::MESSAGE.to_string(),
            trending,
        }
    }
}

/// Body of any other response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }
}
