use std::env;
use std::time::Duration;
use url::Url;

use crate::error::GitHubError;

/// Public GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// GitHub rejects requests without a User-Agent
pub const USER_AGENT: &str = concat!("github-browse/", env!("CARGO_PKG_VERSION"));

/// Settings a [`GitHubClient`](crate::GitHubClient) is built from.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Every endpoint path is appended to this URL, so a GitHub Enterprise
    /// prefix such as `/api/v3` is kept.
    pub base_url: Url,
    pub user_agent: String,
    /// `None` leaves timeouts to the transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with default user agent and no timeout.
    pub fn new(base_url: &str) -> Result<Self, GitHubError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            ..Self::default()
        })
    }

    /// Defaults, with the base URL taken from `GITHUB_API_URL` when set.
    pub fn from_env() -> Result<Self, GitHubError> {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.github.com/");
        assert!(config.user_agent.starts_with("github-browse/"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn new_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(GitHubError::InvalidUrl(_))
        ));
    }

    #[test]
    fn setters_override_defaults() {
        let config = ClientConfig::new("http://localhost:8080")
            .unwrap()
            .with_user_agent("tests")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
