//! Keyword extraction for literal commit search.
//!
//! The remote search API matches keywords literally rather than semantically,
//! so the natural-language query is compressed into a short keyword string
//! before retrieval.

use crate::ports::llm::{CompletionRequest, LlmClient};

/// Fast model used for the extraction call.
const EXTRACT_MODEL: &str = "gemini-2.5-flash";

const MAX_TOKENS: u32 = 256;

/// Compresses `query` into 2-5 literal search keywords.
///
/// Fails open: any transport or model error, or a blank response, yields the
/// original query unchanged so this stage never aborts a search. An empty
/// `api_key` short-circuits to the original query without issuing a call.
pub async fn extract_keywords(llm: &dyn LlmClient, query: &str, api_key: &str) -> String {
    if api_key.trim().is_empty() {
        return query.to_string();
    }

    let request = CompletionRequest {
        model: EXTRACT_MODEL.to_string(),
        prompt: build_prompt(query),
        max_tokens: MAX_TOKENS,
        api_key: api_key.to_string(),
        response_schema: None,
        temperature: None,
    };

    match llm.complete(&request).await {
        Ok(response) => {
            let keywords = response.text.trim().to_string();
            if keywords.is_empty() {
                query.to_string()
            } else {
                keywords
            }
        }
        Err(_) => query.to_string(),
    }
}

fn build_prompt(query: &str) -> String {
    format!(
        "You are a query optimizer for a literal commit search engine.\n\
         Convert the following user query into a strict set of 2-5 search keywords.\n\n\
         Rules:\n\
         1. Remove stop words (how, to, find, the, commit, that, etc).\n\
         2. Keep technical nouns (e.g. \"scheduler\", \"race condition\", \"memory leak\").\n\
         3. If the query is already keywords, keep them.\n\
         4. Return ONLY the keywords separated by spaces. No markdown, no quotes.\n\n\
         User query: \"{query}\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::ports::llm::{CompletionFuture, CompletionResponse};

    /// LLM stub returning one canned outcome for every call.
    struct StubLlm {
        outcome: Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl LlmClient for StubLlm {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async move {
                match outcome {
                    Ok(text) => Ok(CompletionResponse { text }),
                    Err(msg) => Err(msg.into()),
                }
            })
        }
    }

    fn stub(outcome: Result<&str, &str>) -> (StubLlm, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = StubLlm {
            outcome: outcome.map(String::from).map_err(String::from),
            calls: Arc::clone(&calls),
        };
        (llm, calls)
    }

    #[tokio::test]
    async fn returns_trimmed_model_keywords() {
        let (llm, _) = stub(Ok("  scheduler race condition \n"));
        let keywords = extract_keywords(&llm, "find the race in the scheduler", "key").await;
        assert_eq!(keywords, "scheduler race condition");
    }

    #[tokio::test]
    async fn model_error_falls_back_to_the_query() {
        let (llm, _) = stub(Err("boom"));
        let keywords = extract_keywords(&llm, "how to find the commit", "key").await;
        assert_eq!(keywords, "how to find the commit");
    }

    #[tokio::test]
    async fn blank_model_response_falls_back_to_the_query() {
        let (llm, _) = stub(Ok("   \n"));
        let keywords = extract_keywords(&llm, "the and of", "key").await;
        assert_eq!(keywords, "the and of");
    }

    #[tokio::test]
    async fn empty_key_skips_the_call_entirely() {
        let (llm, calls) = stub(Ok("unused"));
        let keywords = extract_keywords(&llm, "memory leak", "").await;
        assert_eq!(keywords, "memory leak");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_query_stays_empty() {
        let (llm, _) = stub(Err("unreachable"));
        let keywords = extract_keywords(&llm, "", "").await;
        assert_eq!(keywords, "");
    }

    #[test]
    fn prompt_carries_the_rules_and_the_query() {
        let prompt = build_prompt("fix use-after-free in eBPF verifier");
        assert!(prompt.contains("2-5 search keywords"));
        assert!(prompt.contains("Remove stop words"));
        assert!(prompt.contains("fix use-after-free in eBPF verifier"));
    }
}
