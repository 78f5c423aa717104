//! External API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_post_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalApiConfig {
    /// URL used by both the GET proxy and the POST helper.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Client-wide timeout for outbound requests, in seconds. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed timeout for the POST helper, in seconds.
    #[serde(default = "default_post_timeout_secs")]
    pub post_timeout_secs: u64,
}

impl Default for ExternalApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            post_timeout_secs: default_post_timeout_secs(),
        }
    }
}

impl ExternalApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    #[must_use]
    pub const fn post_timeout(&self) -> Duration {
        Duration::from_secs(self.post_timeout_secs)
    }
}
