//! Live adapter for the `LlmClient` port using the Gemini generateContent API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live LLM client that calls the Gemini generative language API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new live LLM client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new(), base_url: GEMINI_API_BASE.to_string() }
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the generateContent endpoint.
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// A content entry in the Gemini request.
#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

/// A single text part of a content entry.
#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Generation parameters; the schema fields turn on structured output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

/// Top-level response from the generateContent endpoint.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A candidate completion in the Gemini response.
#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

/// The content of a candidate.
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A text part of a candidate's content.
#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Error response from the Gemini API.
#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

/// Detail inside a Gemini error response.
#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl LlmClient for GeminiClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let url = format!("{}/{}:generateContent", self.base_url, request.model);

            let generation_config = GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
                response_mime_type: request.response_schema.as_ref().map(|_| "application/json"),
                response_schema: request.response_schema,
            };
            let body = GeminiRequest {
                contents: vec![Content { parts: vec![Part { text: &request.prompt }] }],
                generation_config,
            };

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &request.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Gemini API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read Gemini API response: {e}").into()
                })?;

            parse_completion(status.as_u16(), &response_text)
        })
    }
}

/// Decodes a generateContent response body into a completion.
fn parse_completion(
    status: u16,
    body: &str,
) -> Result<CompletionResponse, Box<dyn std::error::Error + Send + Sync>> {
    if !(200..300).contains(&status) {
        let msg = serde_json::from_str::<GeminiError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(format!("Gemini API error ({status}): {msg}").into());
    }

    let api_response: GeminiResponse = serde_json::from_str(body).map_err(
        |e| -> Box<dyn std::error::Error + Send + Sync> {
            format!("Failed to parse Gemini API response: {e}").into()
        },
    )?;

    let Some(candidate) = api_response.candidates.into_iter().next() else {
        return Err("Gemini API response contained no candidates".into());
    };

    let text = candidate.content.parts.into_iter().map(|part| part.text).collect::<String>();

    Ok(CompletionResponse { text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_completion_concatenates_candidate_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "race " }, { "text": "condition" }] }
            }]
        })
        .to_string();

        let response = parse_completion(200, &body).unwrap();
        assert_eq!(response.text, "race condition");
    }

    #[test]
    fn parse_completion_surfaces_api_error_message() {
        let body = json!({ "error": { "message": "API key not valid" } }).to_string();
        let err = parse_completion(400, &body).unwrap_err();
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn parse_completion_falls_back_to_raw_error_body() {
        let err = parse_completion(500, "upstream exploded").unwrap_err();
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn parse_completion_rejects_empty_candidates() {
        let body = json!({ "candidates": [] }).to_string();
        let err = parse_completion(200, &body).unwrap_err();
        assert!(err.to_string().contains("no candidates"));
    }

    #[test]
    fn parse_completion_rejects_unparseable_body() {
        let err = parse_completion(200, "not json").unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn structured_request_sets_json_mime_type() {
        let config = GenerationConfig {
            max_output_tokens: 64,
            temperature: Some(0.2),
            response_mime_type: Some("application/json"),
            response_schema: Some(json!({ "type": "ARRAY" })),
        };
        let rendered = serde_json::to_value(&config).unwrap();
        assert_eq!(rendered["responseMimeType"], "application/json");
        assert_eq!(rendered["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn free_text_request_omits_schema_fields() {
        let config = GenerationConfig {
            max_output_tokens: 64,
            temperature: None,
            response_mime_type: None,
            response_schema: None,
        };
        let rendered = serde_json::to_value(&config).unwrap();
        assert!(rendered.get("responseMimeType").is_none());
        assert!(rendered.get("responseSchema").is_none());
        assert!(rendered.get("temperature").is_none());
    }
}
