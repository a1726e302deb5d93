//! HTTP server settings.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Environment variable holding an extra API token.
pub const API_TOKEN_ENV: &str = "HASHTREND_API_TOKEN";

/// HTTP server configuration.
///
/// Tokens may also be supplied through [`API_TOKEN_ENV`] so they need not
/// be written to the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Bearer tokens accepted by authenticated routes.
    #[serde(default)]
    pub api_tokens: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_tokens: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Distinct non-blank tokens.
    #[must_use]
    pub fn token_set(&self) -> BTreeSet<String> {
        self.api_tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
