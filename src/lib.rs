//! # GitHub Browse
//!
//! A small async client for browsing GitHub repositories over the REST API
//! without a full SDK.
//!
//! ## Main Components
//!
//! - [`GitHubClient`]: repository search, tree listing, commit history and
//!   file downloads. One GET request per call, no caching or retries.
//! - [`HttpFetcher`]: the single-request transport every operation goes through
//! - [`ClientConfig`]: base URL, user agent and optional timeout
//! - [`GitHubError`]: transport, HTTP status, parse and decode failures
//!
//! ## Example
//!
//! ```no_run
//! use github_browse_lib::{ClientConfig, CommitOptions, GitHubClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GitHubClient::new(ClientConfig::default())?;
//!
//!     // Root listing of the default ref; directories end with '/'
//!     let files = client.list_files("rust-lang", "rust", None).await?;
//!     if let Some(url) = files.get("README.md") {
//!         println!("{}", client.download_file(url).await?);
//!     }
//!
//!     let commits = client
//!         .get_commits("rust-lang", "rust", &CommitOptions::default().path("README.md"))
//!         .await?;
//!     println!("{} commits", commits.len());
//!
//!     Ok(())
//! }
//! ```

mod args;
mod config;
mod error;
mod fetcher;
mod github_client;
pub mod render;
mod types;

// Re-export main components for documentation and external use
pub use crate::args::{Args, Command};
pub use crate::config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL, USER_AGENT};
pub use crate::error::GitHubError;
pub use crate::fetcher::HttpFetcher;
pub use crate::github_client::GitHubClient;
pub use crate::types::{CommitOptions, EntryKind, TreeEntry, DEFAULT_REF};
