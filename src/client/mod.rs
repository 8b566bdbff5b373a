//! Client side of the list contract.
//!
//! [`transport`] sends a descriptor to the HTTP API and normalizes whatever
//! envelope the endpoint publishes into a canonical [`Page`]. A
//! [`controller::ListController`] owns one screen's descriptor and state, and
//! a [`session::ListSession`] drives a controller from UI events.
//!
//! [`Page`]: crate::pagination::Page

use std::time::Duration;

use serde::Deserialize;

pub mod controller;
pub mod endpoint;
pub mod error;
pub mod session;
pub mod transport;

/// Quiet period after the last keystroke before a search is sent.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

/// Settings of the list client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Origin of the API, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
