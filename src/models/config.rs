//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::token::MissingExpiry;

fn default_protected_prefix() -> String {
    "/dashboard".to_string()
}

fn default_token_cookie() -> String {
    "token".to_string()
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Key material for the flash message cookies; at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_protected_prefix")]
    pub protected_prefix: String,
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,
    /// Treat session tokens without an `exp` claim as expired.
    #[serde(default)]
    pub require_token_expiry: bool,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl ServerConfig {
    pub fn missing_expiry_policy(&self) -> MissingExpiry {
        if self.require_token_expiry {
            MissingExpiry::Reject
        } else {
            MissingExpiry::Allow
        }
    }
}
