//! Remote service settings for skiff.
//!
//! Where the file service lives and how long a single request may take.
//! There are no retry knobs on purpose: the client never retries.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8188";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `[service]` section of skiff.toml.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Service {
    url: String,
    timeout_secs: u64,
}

impl Service {
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// CLI override for the service URL.
    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }
}

impl Default for Service {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_is_clamped() {
        let service = Service {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: 0,
        };
        assert_eq!(service.timeout(), Duration::from_secs(1));
    }
}
