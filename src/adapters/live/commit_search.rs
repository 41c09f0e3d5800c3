//! Live adapter for the `CommitSearch` port using the GitHub search API.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::ports::commit_search::{
    CommitSearch, CommitSearchFuture, RawCommitRecord, RetrievalError,
};

const GITHUB_SEARCH_URL: &str = "https://api.github.com/search/commits";

/// The cloak-preview media type is required for the commit search endpoint.
const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview+json";

/// GitHub rejects requests without a User-Agent.
const CLIENT_USER_AGENT: &str = concat!("commit-scout/", env!("CARGO_PKG_VERSION"));

/// Commits fetched per search; a single page, no follow-up pagination.
const PAGE_SIZE: u32 = 30;

/// Live commit search backed by the GitHub search API.
pub struct GithubCommitSearch {
    client: Client,
}

impl GithubCommitSearch {
    /// Creates a new live commit-search client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for GithubCommitSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level body of a commit search response.
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// One search hit.
#[derive(Deserialize)]
struct SearchItem {
    sha: String,
    commit: CommitDetail,
    html_url: Option<String>,
}

/// The nested commit object of a search hit.
#[derive(Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
    message: String,
}

/// Author block of a commit.
#[derive(Deserialize)]
struct CommitAuthor {
    name: String,
    date: String,
}

impl CommitSearch for GithubCommitSearch {
    fn search(&self, repo: &str, keywords: &str) -> CommitSearchFuture<'_> {
        let query = format!("repo:{repo} {keywords}");

        Box::pin(async move {
            let per_page = PAGE_SIZE.to_string();
            let response = self
                .client
                .get(GITHUB_SEARCH_URL)
                .query(&[("q", query.as_str()), ("per_page", per_page.as_str())])
                .header(ACCEPT, COMMIT_SEARCH_ACCEPT)
                .header(USER_AGENT, CLIENT_USER_AGENT)
                .send()
                .await
                .map_err(|e| RetrievalError::Failed(format!("request failed: {e}")))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| RetrievalError::Failed(format!("failed to read response: {e}")))?;

            parse_search_response(status, &body)
        })
    }
}

/// Maps a search response to records or the typed retrieval errors.
fn parse_search_response(
    status: StatusCode,
    body: &str,
) -> Result<Vec<RawCommitRecord>, RetrievalError> {
    if status == StatusCode::FORBIDDEN {
        return Err(RetrievalError::RateLimited);
    }
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(RetrievalError::InvalidQuery);
    }
    if !status.is_success() {
        return Err(RetrievalError::Failed(
            status.canonical_reason().unwrap_or("unexpected status").to_string(),
        ));
    }

    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| RetrievalError::Failed(format!("unexpected response body: {e}")))?;

    Ok(parsed
        .items
        .into_iter()
        .map(|item| RawCommitRecord {
            sha: item.sha,
            author: item.commit.author.name,
            date: item.commit.author.date,
            message: item.commit.message,
            html_url: item.html_url,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> String {
        json!({
            "total_count": 1,
            "items": [{
                "sha": "1b929c02afd378a9d80b7418751547361895690f",
                "commit": {
                    "author": {
                        "name": "Andrii Nakryiko",
                        "date": "2024-02-27T15:12:03Z"
                    },
                    "message": "bpf: fix use-after-free\n\nDetails in the body."
                },
                "html_url": "https://github.com/torvalds/linux/commit/1b929c02"
            }]
        })
        .to_string()
    }

    #[test]
    fn success_maps_items_to_records() {
        let records = parse_search_response(StatusCode::OK, &sample_body()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sha, "1b929c02afd378a9d80b7418751547361895690f");
        assert_eq!(records[0].author, "Andrii Nakryiko");
        assert_eq!(records[0].date, "2024-02-27T15:12:03Z");
        assert!(records[0].message.starts_with("bpf: fix use-after-free"));
        assert_eq!(
            records[0].html_url.as_deref(),
            Some("https://github.com/torvalds/linux/commit/1b929c02")
        );
    }

    #[test]
    fn zero_items_is_ok_and_empty() {
        let body = json!({ "total_count": 0, "items": [] }).to_string();
        let records = parse_search_response(StatusCode::OK, &body).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn forbidden_maps_to_rate_limited() {
        let result = parse_search_response(StatusCode::FORBIDDEN, "");
        assert_eq!(result.unwrap_err(), RetrievalError::RateLimited);
    }

    #[test]
    fn unprocessable_maps_to_invalid_query() {
        let result = parse_search_response(StatusCode::UNPROCESSABLE_ENTITY, "");
        assert_eq!(result.unwrap_err(), RetrievalError::InvalidQuery);
    }

    #[test]
    fn other_failure_carries_status_text() {
        let result = parse_search_response(StatusCode::BAD_GATEWAY, "");
        match result.unwrap_err() {
            RetrievalError::Failed(detail) => assert!(detail.contains("Bad Gateway")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn malformed_success_body_is_a_failure() {
        let result = parse_search_response(StatusCode::OK, "not json");
        assert!(matches!(result.unwrap_err(), RetrievalError::Failed(_)));
    }

    #[test]
    fn missing_link_is_allowed() {
        let body = json!({
            "items": [{
                "sha": "abc123",
                "commit": { "author": { "name": "A", "date": "2024-01-01" }, "message": "m" },
                "html_url": null
            }]
        })
        .to_string();
        let records = parse_search_response(StatusCode::OK, &body).unwrap();
        assert_eq!(records[0].html_url, None);
    }
}
