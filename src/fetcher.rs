use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::GitHubError;

/// Issues single GET requests and hands back the body.
///
/// Cloning is cheap; clones share the underlying connection pool. Concurrent
/// calls are independent and may complete in any order.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher from config (user agent and optional timeout)
    ///
    /// Redirects are never followed: a 3xx is reported as [`GitHubError::Http`].
    pub fn new(config: &ClientConfig) -> Result<Self, GitHubError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(GitHubError::ClientBuild)?;
        Ok(HttpFetcher { client })
    }

    /// GET `target` and return the body as text.
    ///
    /// `target` may be a string or an already parsed [`Url`]. The transport
    /// follows the scheme: plain HTTP for `http`, TLS for `https`.
    ///
    /// # Errors
    ///
    /// - [`GitHubError::InvalidUrl`] / [`GitHubError::UnsupportedScheme`] before any I/O
    /// - [`GitHubError::Http`] for a status outside 2xx, without reading the body
    /// - [`GitHubError::Transport`] for connection failures
    pub async fn get_text(&self, target: impl AsRef<str>) -> Result<String, GitHubError> {
        let url = parse_target(target.as_ref())?;

        debug!("Requesting URL: {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {} for {}", status.as_u16(), url);
            return Err(GitHubError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn parse_target(target: &str) -> Result<Url, GitHubError> {
    let url = Url::parse(target)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GitHubError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_target("http://localhost:1234/x").is_ok());
        assert!(parse_target("https://api.github.com/repos/a/b").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        match parse_target("ftp://example.com/file") {
            Err(GitHubError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(matches!(
            parse_target("/repos/a/b"),
            Err(GitHubError::InvalidUrl(_))
        ));
    }

    #[test]
    fn bad_user_agent_is_a_build_error() {
        let config = ClientConfig::default().with_user_agent("bad\nagent");
        let err = HttpFetcher::new(&config).unwrap_err();
        assert!(matches!(err, GitHubError::ClientBuild(_)));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn invalid_url_fails_without_network() {
        let fetcher = HttpFetcher::new(&ClientConfig::default()).unwrap();
        let err = fetcher.get_text("::nope::").await.unwrap_err();
        assert!(matches!(err, GitHubError::InvalidUrl(_)));
    }
}
