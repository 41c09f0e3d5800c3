//! LLM client port for language-model completions.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type CompletionFuture<'a> = Pin<
    Box<dyn Future<Output = Result<CompletionResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The model identifier (e.g. `"gemini-2.5-flash"`).
    pub model: String,
    /// The prompt to send.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// The API key authorizing this request; resolved by the caller and
    /// passed explicitly rather than read from ambient state.
    pub api_key: String,
    /// When set, the model is constrained to emit JSON conforming to this
    /// schema (structured generation). `None` requests free text.
    pub response_schema: Option<Value>,
    /// Sampling temperature override, when the stage needs one.
    pub temperature: Option<f32>,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
