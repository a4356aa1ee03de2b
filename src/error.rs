use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors returned by every GitHub operation.
///
/// Each call ends in exactly one of these or a value; nothing is retried.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Connection-level failure (DNS, refused, reset), passed through as-is.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be built from the config
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The server answered with a status outside 2xx. The body was not read.
    #[error("HTTP error: {status}")]
    Http {
        /// Numeric status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The response body was not valid JSON for the operation
    #[error("Failed to parse {operation} response from {url}: {source}")]
    Parse {
        operation: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but without the field the operation reads
    #[error("{operation} response from {url} has no '{field}' field")]
    MissingField {
        operation: &'static str,
        url: String,
        field: &'static str,
    },

    /// The `content` field was not valid base64
    #[error("Invalid base64 content from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Decoded content is binary; use the byte variant instead
    #[error("Content from {url} is not valid UTF-8: {source}")]
    NotUtf8 {
        url: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("URL cannot be a base: {0}")]
    CannotBeABase(String),

    /// `.` and `..` would be resolved away by URL normalization
    #[error("Path segment '{0}' cannot be sent to the API")]
    DotSegment(String),
}

impl GitHubError {
    /// HTTP status code, for [`GitHubError::Http`] only.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for connection-level failures that never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_names_status() {
        let err = GitHubError::Http {
            status: 404,
            url: "https://api.github.com/repos/a/b/git/trees/master".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 404");
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn parse_error_carries_operation_and_url() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GitHubError::Parse {
            operation: "search_repos",
            url: "http://localhost/legacy/repos/search/x".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.contains("search_repos"));
        assert!(message.contains("http://localhost/legacy/repos/search/x"));
        assert_eq!(err.status_code(), None);
    }
}
