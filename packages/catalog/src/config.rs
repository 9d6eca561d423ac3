//! # Client configuration: `dogs.toml`
//!
//! ```toml
//! [api]
//! base_url = "https://frontend-take-home-service.fetch.com"
//! max_ids_per_request = 100   # by-id fetches are split into batches of this size
//!
//! [search]
//! page_size = 10
//! default_sort = "breed:asc"
//! ```
//!
//! Every field has a serde default, so a missing or empty document is the
//! default configuration.

use serde::{Deserialize, Serialize};

use crate::models::SortKey;

pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Remote service settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Largest id list sent in one `POST /dogs` request.
    #[serde(default = "default_max_ids_per_request")]
    pub max_ids_per_request: usize,
}

/// Search page settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_ids_per_request() -> usize {
    100
}

fn default_page_size() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_ids_per_request: default_max_ids_per_request(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: SortKey::default(),
        }
    }
}

impl CatalogConfig {
    /// Point the client at another service address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "dogs.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
