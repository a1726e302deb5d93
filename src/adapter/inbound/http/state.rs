//! Shared handler state.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::port::TrendingApi;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn TrendingApi>,
    tokens: Arc<BTreeSet<String>>,
}

impl AppState {
    pub fn new(api: Arc<dyn TrendingApi>, tokens: BTreeSet<String>) -> Self {
        Self {
            api,
            tokens: Arc::new(tokens),
        }
    }

    #[must_use]
    pub fn api(&self) -> &Arc<dyn TrendingApi> {
        &self.api
    }

    #[must_use]
    pub fn accepts(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}
