//! Commit-search port for retrieving candidate commits.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`CommitSearch`] to keep the trait dyn-compatible.
pub type CommitSearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<RawCommitRecord>, RetrievalError>> + Send + 'a>>;

/// A commit as returned by the retrieval source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommitRecord {
    /// The commit hash.
    pub sha: String,
    /// Author name.
    pub author: String,
    /// Commit date as reported by the source.
    pub date: String,
    /// Full commit message (subject and body).
    pub message: String,
    /// Web link to the commit, when the source provides one.
    pub html_url: Option<String>,
}

/// Why a retrieval attempt failed.
///
/// An empty result set is NOT a failure; it is `Ok(vec![])` so callers can
/// report "no matches" instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// The search API refused the request (HTTP 403). Retryable by user
    /// action only; this layer never retries.
    RateLimited,
    /// The query was rejected as invalid or too narrow (HTTP 422).
    InvalidQuery,
    /// Any other failure, carrying the status text or transport error.
    Failed(String),
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "the search API rate limit was exceeded"),
            Self::InvalidQuery => write!(f, "the search API rejected the query"),
            Self::Failed(detail) => write!(f, "commit search failed: {detail}"),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// Searches a remote code-hosting service for commits matching keywords.
pub trait CommitSearch: Send + Sync {
    /// Retrieves commits in `repo` (as `owner/name`) matching `keywords`.
    ///
    /// Issues a single request of fixed page size; pagination beyond the
    /// first page is not attempted.
    fn search(&self, repo: &str, keywords: &str) -> CommitSearchFuture<'_>;
}
