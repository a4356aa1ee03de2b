use serde::Deserialize;

/// Ref used when the caller does not name one
pub const DEFAULT_REF: &str = "master";

/// `GET /repos/{user}/{repo}/git/trees/{ref}`
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    pub tree: Vec<TreeEntry>,
}

/// A single entry of a Git tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// API URL for the blob or subtree
    #[serde(default)]
    pub url: String,
}

impl TreeEntry {
    /// Listing key: the path, with a trailing `/` for directories.
    pub fn listing_key(&self) -> String {
        match self.kind {
            EntryKind::Tree => format!("{}/", self.path),
            _ => self.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// File
    Blob,
    /// Directory
    Tree,
    /// Submodule
    Commit,
    #[serde(other)]
    Other,
}

/// `GET /repos/{user}/{repo}/contents/{path}`
#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    pub content: Option<String>,
}

/// Filters for [`GitHubClient::get_commits`](crate::GitHubClient::get_commits).
///
/// `CommitOptions::default()` starts at `master` and does not filter by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Starting branch, tag or SHA
    pub from_ref: Option<String>,
    /// Only commits touching this path
    pub path: Option<String>,
}

impl CommitOptions {
    pub fn from_ref(mut self, reference: impl Into<String>) -> Self {
        self.from_ref = Some(reference.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Empty strings count as not given.
    pub(crate) fn sha(&self) -> &str {
        self.from_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REF)
    }

    pub(crate) fn path_filter(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}
