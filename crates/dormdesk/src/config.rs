//! Client configuration.

use std::time::Duration;

use dormdesk_router::DEFAULT_MAX_REDIRECTS;

/// Settings for building a [`DormClient`](crate::DormClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Prefix every API path lives under.
    pub api_prefix: String,
    /// Per-request timeout. Expiry counts as "no response".
    pub timeout: Duration,
    /// Redirects one navigation may follow.
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api".to_string(),
            timeout: Duration::from_millis(10_000),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 8);
    }
}
