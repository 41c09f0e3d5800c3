//! Relevance analysis: structured reranking of the commit corpus.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::SearchError;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Strong model used for the analysis call.
const ANALYZE_MODEL: &str = "gemini-3-pro-preview";

const MAX_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.2;

/// A ranked, explained commit selected by the analyzer.
///
/// Field names follow the declared response schema, so the parsed payload is
/// the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAnalysis {
    /// The 7-40 character git commit hash.
    pub commit_hash: String,
    /// Commit author name.
    pub author: String,
    /// Commit date, when the model could extract one.
    #[serde(default)]
    pub date: Option<String>,
    /// First line of the commit message.
    pub subject: String,
    /// Relevance to the query, 0-100.
    pub relevance_score: u8,
    /// Why this commit matches the query.
    pub reasoning: String,
    /// Web link to the commit, when present in the source text.
    #[serde(default)]
    pub url: Option<String>,
}

/// Reranks `corpus` against `query`, returning at most five analyses sorted
/// descending by relevance score.
///
/// The caller bounds the corpus first (see [`super::corpus::truncate`]).
///
/// # Errors
///
/// `MissingApiKey` without issuing a call when the key is blank; `Analysis`
/// on transport or model failure, or an empty payload; `AnalysisParse` when
/// the payload does not conform to the declared schema. All are hard
/// failures of this stage.
pub async fn analyze(
    llm: &dyn LlmClient,
    query: &str,
    corpus: &str,
    api_key: &str,
) -> Result<Vec<CommitAnalysis>, SearchError> {
    if api_key.trim().is_empty() {
        return Err(SearchError::MissingApiKey);
    }

    let request = CompletionRequest {
        model: ANALYZE_MODEL.to_string(),
        prompt: build_prompt(query, corpus),
        max_tokens: MAX_TOKENS,
        api_key: api_key.to_string(),
        response_schema: Some(response_schema()),
        temperature: Some(TEMPERATURE),
    };

    let response =
        llm.complete(&request).await.map_err(|e| SearchError::Analysis(e.to_string()))?;

    let text = response.text.trim();
    if text.is_empty() {
        return Err(SearchError::Analysis("the model returned an empty response".to_string()));
    }

    parse_analyses(text)
}

/// Parses the structured payload and applies the descending score order.
///
/// The model's own ordering is not trusted; ties keep model order (the sort
/// is stable).
fn parse_analyses(text: &str) -> Result<Vec<CommitAnalysis>, SearchError> {
    let mut analyses: Vec<CommitAnalysis> =
        serde_json::from_str(text).map_err(|e| SearchError::AnalysisParse(e.to_string()))?;
    analyses.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    Ok(analyses)
}

fn build_prompt(query: &str, corpus: &str) -> String {
    format!(
        "You are an expert software engineer performing semantic search over git history.\n\n\
         1. The CONTEXT section below contains a list of git commits.\n\
         2. Find the top 5 commits that best answer the user's QUERY.\n\
         3. Analyze the commit messages (subjects and bodies) deeply.\n\
         4. Assign each selected commit a relevance score (0-100).\n\
         5. Extract the commit URL if present (lines starting with \"Link:\").\n\n\
         QUERY: \"{query}\"\n\n\
         CONTEXT:\n{corpus}\n"
    )
}

/// Declared output schema; the model must return a conformant array.
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "commitHash": {
                    "type": "STRING",
                    "description": "The 7-40 character git commit hash."
                },
                "author": {
                    "type": "STRING",
                    "description": "The author of the commit."
                },
                "date": {
                    "type": "STRING",
                    "description": "The date of the commit."
                },
                "subject": {
                    "type": "STRING",
                    "description": "The first line or subject of the commit message."
                },
                "relevanceScore": {
                    "type": "INTEGER",
                    "description": "How relevant this commit is to the user query, 0 to 100."
                },
                "reasoning": {
                    "type": "STRING",
                    "description": "A brief explanation of why this commit matches the query."
                },
                "url": {
                    "type": "STRING",
                    "description": "The web URL to the commit if present in the source text."
                }
            },
            "required": ["commitHash", "author", "subject", "relevanceScore", "reasoning"]
        }
    })
}
