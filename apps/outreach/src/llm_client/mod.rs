/// LLM Client: the single point of entry for all Gemini API calls in Outreach.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All completion requests MUST go through this module (or a `CompletionBackend`
/// standing in for it in tests).
///
/// Model: gemini-2.0-flash (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used for all completion calls in Outreach.
pub const MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One logical completion call: prompt, declared output schema and the two
/// optional knobs the Gemini API exposes for it.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_schema: Value,
    /// Enables Google Search grounding for this call.
    pub search: bool,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// Thought summaries are returned as parts flagged `thought: true`.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Joins the answer text parts of the first candidate, skipping thoughts.
    /// Search-grounded answers often arrive split over several parts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Anything that can turn a `CompletionRequest` into raw response text.
///
/// `LlmClient` is the production backend; the gateway only depends on this trait.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// The single Gemini client used by the AI gateway.
/// No retries: a failed call is reported once and the caller falls back.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(&self, request: &CompletionRequest) -> Result<LlmResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            tools: if request.search {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                thinking_config: request.thinking_budget.map(|thinking_budget| ThinkingConfig {
                    thinking_budget,
                }),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&response.text().await?)?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

const FENCE: &str = "```";

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
///
/// A fence only counts when it starts a line: either the whole answer opens with
/// one, or a line of chatter precedes it. Backticks inside JSON strings are left
/// alone. Unfenced input is only trimmed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let open = if text.starts_with(FENCE) {
        0
    } else {
        match text.find("\n```") {
            Some(idx) => idx + 1,
            None => return text,
        }
    };

    let after_open = &text[open + FENCE.len()..];
    // Skip the info string ("json", "JSON", ...) up to the end of the fence line.
    let inner = match after_open.find(|c: char| c == '\n' || c == '[' || c == '{') {
        Some(idx) if after_open[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &after_open[idx..]
        }
        _ => after_open,
    };

    let inner = inner.trim_end();
    if let Some(body) = inner.strip_suffix(FENCE) {
        return body.trim();
    }
    // Closing fence followed by trailing chatter; JSON strings cannot hold a raw newline.
    match inner.rfind("\n```") {
        Some(close) => inner[..close].trim(),
        None => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn schema_request(search: bool) -> CompletionRequest {
        CompletionRequest {
            prompt: "Say hi as JSON".to_string(),
            response_schema: json!({ "type": "OBJECT" }),
            search,
            thinking_budget: if search { Some(15000) } else { None },
        }
    }

    fn generate_path() -> String {
        format!("/v1beta/models/{MODEL}:generateContent")
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_inline_tag() {
        let input = "```json[1, 2]```";
        assert_eq!(strip_json_fences(input), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fences_drops_surrounding_chatter() {
        let input = "Here are the roles:\n```json\n[]\n```\nGood luck!";
        assert_eq!(strip_json_fences(input), "[]");
    }

    #[test]
    fn test_strip_json_fences_ignores_backticks_inside_strings() {
        let plain = r#"{"summary": "Write ```gherkin``` specs"}"#;
        assert_eq!(strip_json_fences(plain), plain);

        let fenced = format!("```json\n{plain}\n```");
        assert_eq!(strip_json_fences(&fenced), plain);

        let inline = format!("```json{plain}```");
        assert_eq!(strip_json_fences(&inline), plain);
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(strip_json_fences(input), "{\"key\": 1}");
    }

    #[test]
    fn test_response_text_skips_thoughts_and_joins_parts() {
        let response: LlmResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "[{\"a\":" },
                        { "text": "1}]" }
                    ]
                }
            }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("[{\"a\":1}]"));
    }

    #[test]
    fn test_response_text_none_without_candidates() {
        let response: LlmResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_complete_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{\"ok\":true}" }] } }],
                "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 }
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new("test-key".to_string(), server.uri()).unwrap();
        let text = client.complete(&schema_request(false)).await.unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_request_body_carries_schema_search_and_thinking_budget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), format!("{}/", server.uri())).unwrap();
        client.complete(&schema_request(true)).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let body: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hi as JSON");
        assert_eq!(body["tools"][0]["googleSearch"], json!({}));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            15000
        );
    }

    #[tokio::test]
    async fn test_request_without_search_omits_tools() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        client.complete(&schema_request(false)).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body["generationConfig"].get("thinkingConfig").is_none());
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new("bad".to_string(), server.uri()).unwrap();
        let err = client.complete(&schema_request(false)).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        let err = client.complete(&schema_request(false)).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_empty_candidate_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        let err = client.complete(&schema_request(false)).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
