//! Live adapters that call the real external services.

pub mod commit_search;
pub mod llm;

pub use commit_search::GithubCommitSearch;
pub use llm::GeminiClient;
