use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::GitHubError;
use crate::fetcher::HttpFetcher;
use crate::types::{CommitOptions, ContentResponse, TreeEntry, TreeResponse, DEFAULT_REF};

/// Read-only client for repository search, trees, commits and file contents.
///
/// Every method issues exactly one GET request and returns one result.
/// Nothing is cached, retried or paginated.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    fetcher: HttpFetcher,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client for the given config
    pub fn new(config: ClientConfig) -> Result<Self, GitHubError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(GitHubClient {
            fetcher,
            base_url: config.base_url,
        })
    }

    /// Base URL endpoints are built from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search repositories matching `query`.
    ///
    /// Returns the `repositories` array of the response unmodified.
    pub async fn search_repos(&self, query: &str) -> Result<Vec<Value>, GitHubError> {
        let url = self.search_url(query)?;
        let body = self.fetcher.get_text(&url).await?;

        let mut resp: Value = parse_json("search_repos", url.as_str(), &body)?;
        match resp.get_mut("repositories").map(Value::take) {
            Some(Value::Array(repos)) => {
                debug!("Search for '{}' returned {} repositories", query, repos.len());
                Ok(repos)
            }
            _ => Err(GitHubError::MissingField {
                operation: "search_repos",
                url: url.to_string(),
                field: "repositories",
            }),
        }
    }

    /// Entries of the tree at `reference` (default `master`), as sent by GitHub.
    pub async fn list_tree(
        &self,
        user: &str,
        repo: &str,
        reference: Option<&str>,
    ) -> Result<Vec<TreeEntry>, GitHubError> {
        let url = self.tree_url(user, repo, reference.unwrap_or(DEFAULT_REF))?;
        let body = self.fetcher.get_text(&url).await?;

        let resp: TreeResponse = parse_json("list_files", url.as_str(), &body)?;
        Ok(resp.tree)
    }

    /// Map of file and directory names to their API URLs.
    ///
    /// Directory names carry a trailing `/`.
    pub async fn list_files(
        &self,
        user: &str,
        repo: &str,
        reference: Option<&str>,
    ) -> Result<BTreeMap<String, String>, GitHubError> {
        let entries = self.list_tree(user, repo, reference).await?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.listing_key(), entry.url))
            .collect())
    }

    /// Commits reachable from `options.from_ref` (default `master`), newest
    /// first as returned by the API, optionally restricted to a path.
    pub async fn get_commits(
        &self,
        user: &str,
        repo: &str,
        options: &CommitOptions,
    ) -> Result<Vec<Value>, GitHubError> {
        let url = self.commits_url(user, repo, options)?;
        let body = self.fetcher.get_text(&url).await?;

        parse_json("get_commits", url.as_str(), &body)
    }

    /// Download a file from a contents-API URL as text.
    ///
    /// Fails with [`GitHubError::NotUtf8`] for binary files; use
    /// [`download_file_bytes`](Self::download_file_bytes) for those.
    pub async fn download_file(&self, url: impl AsRef<str>) -> Result<String, GitHubError> {
        let url = url.as_ref();
        let bytes = self.download_file_bytes(url).await?;
        String::from_utf8(bytes).map_err(|source| GitHubError::NotUtf8 {
            url: url.to_string(),
            source,
        })
    }

    /// Download a file from a contents-API URL as raw bytes.
    pub async fn download_file_bytes(&self, url: impl AsRef<str>) -> Result<Vec<u8>, GitHubError> {
        let url = url.as_ref();
        let body = self.fetcher.get_text(url).await?;
        decode_content("download_file", url, &body)
    }

    /// Fetch a file by repository path at `reference` (default `master`).
    pub async fn retrieve_file(
        &self,
        user: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Vec<u8>, GitHubError> {
        let url = self.contents_url(user, repo, path, reference.unwrap_or(DEFAULT_REF))?;
        let body = self.fetcher.get_text(&url).await?;
        decode_content("retrieve_file", url.as_str(), &body)
    }

    fn search_url(&self, query: &str) -> Result<Url, GitHubError> {
        // The query is a single segment, so '/' and spaces are escaped
        self.endpoint(&["legacy", "repos", "search", query])
    }

    fn tree_url(&self, user: &str, repo: &str, reference: &str) -> Result<Url, GitHubError> {
        let mut segments = vec!["repos", user, repo, "git", "trees"];
        segments.extend(reference.split('/'));
        self.endpoint(&segments)
    }

    fn commits_url(
        &self,
        user: &str,
        repo: &str,
        options: &CommitOptions,
    ) -> Result<Url, GitHubError> {
        let mut url = self.endpoint(&["repos", user, repo, "commits"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("sha", options.sha());
            if let Some(path) = options.path_filter() {
                query.append_pair("path", path);
            }
        }
        Ok(url)
    }

    fn contents_url(
        &self,
        user: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Url, GitHubError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut segments = vec!["repos", user, repo, "contents"];
        segments.extend(path.split('/'));

        let mut url = self.endpoint(&segments)?;
        url.query_pairs_mut().append_pair("ref", reference);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        // URL normalization resolves these (escaped or not), so the request
        // would land on another endpoint
        if let Some(dots) = segments.iter().find(|s| **s == "." || **s == "..") {
            return Err(GitHubError::DotSegment(dots.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_json<T: DeserializeOwned>(
    operation: &'static str,
    url: &str,
    body: &str,
) -> Result<T, GitHubError> {
    serde_json::from_str(body).map_err(|source| GitHubError::Parse {
        operation,
        url: url.to_string(),
        source,
    })
}

/// Decode the base64 `content` of a contents-API response.
///
/// GitHub wraps the payload at 60 columns, so whitespace is dropped first.
fn decode_content(operation: &'static str, url: &str, body: &str) -> Result<Vec<u8>, GitHubError> {
    let resp: ContentResponse = parse_json(operation, url, body)?;
    let content = resp.content.ok_or_else(|| GitHubError::MissingField {
        operation,
        url: url.to_string(),
        field: "content",
    })?;

    let cleaned: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(cleaned).map_err(|source| GitHubError::Decode {
        url: url.to_string(),
        source,
    })
}
