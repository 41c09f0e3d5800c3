//! Service context bundling the external-service port trait objects.

use crate::adapters::live::{GeminiClient, GithubCommitSearch};
use crate::ports::commit_search::CommitSearch;
use crate::ports::llm::LlmClient;

/// Bundles the port trait objects into a single context.
///
/// Each field provides access to one external boundary. Tests construct the
/// context directly with stub adapters; production code uses [`Self::live`].
pub struct ServiceContext {
    /// LLM client for keyword extraction and relevance analysis.
    pub llm: Box<dyn LlmClient>,
    /// Commit search for candidate retrieval.
    pub commits: Box<dyn CommitSearch>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for both services.
    #[must_use]
    pub fn live() -> Self {
        Self { llm: Box::new(GeminiClient::new()), commits: Box::new(GithubCommitSearch::new()) }
    }
}
