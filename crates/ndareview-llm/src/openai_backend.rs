//! OpenAI HTTP backend implementation
//!
//! Talks to the OpenAI Responses API, which carries both plain prompts and
//! file_search-grounded calls against a playbook vector store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use ndareview_config::Config;
use ndareview_utils::error::LlmError;

use crate::http_client::HttpClient;
use crate::types::{LlmBackend, LlmInvocation, LlmResult};

/// Default OpenAI API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI backend configuration
#[derive(Clone)]
pub(crate) struct OpenAiBackend {
    client: Arc<HttpClient>,
    base_url: String,
    api_key: String,
    default_params: HttpParams,
}

/// HTTP request parameters
#[derive(Debug, Clone, Default)]
pub(crate) struct HttpParams {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Misconfiguration` if the HTTP client cannot be
    /// constructed
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        default_params: HttpParams,
    ) -> Result<Self, LlmError> {
        let client = HttpClient::new()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            default_params,
        })
    }

    /// Create a new OpenAI backend from configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Misconfiguration` if the API key environment
    /// variable is not set or the HTTP client cannot be constructed
    pub fn new_from_config(config: &Config) -> Result<Self, LlmError> {
        let api_key_env = config.api_key_env();

        let api_key = std::env::var(api_key_env).map_err(|_| {
            LlmError::Misconfiguration(format!(
                "OpenAI API key not found in environment variable '{api_key_env}'. \
                 Please set this variable or configure a different api_key_env in [provider]."
            ))
        })?;

        let default_params = HttpParams {
            max_output_tokens: config.provider.max_output_tokens,
            temperature: config.provider.temperature,
        };

        Self::new(api_key, config.provider.base_url.clone(), default_params)
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn respond(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError> {
        debug!(
            provider = "openai",
            model = %inv.model,
            grounded = !inv.vector_store_ids.is_empty(),
            timeout_secs = inv.timeout.as_secs(),
            "Invoking OpenAI backend"
        );

        // One file_search tool per store so results stay attributable to
        // the store they came from
        let tools = if inv.vector_store_ids.is_empty() {
            None
        } else {
            Some(
                inv.vector_store_ids
                    .iter()
                    .map(|id| Tool::FileSearch {
                        vector_store_ids: vec![id.clone()],
                    })
                    .collect(),
            )
        };

        let request_body = ResponsesRequest {
            model: inv.model.clone(),
            input: inv.input.clone(),
            instructions: inv.instructions.clone(),
            max_output_tokens: self.default_params.max_output_tokens,
            temperature: self.default_params.temperature,
            tools,
        };

        let request = reqwest::Client::new()
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body);

        let response = self
            .client
            .execute_with_retry(request, inv.timeout, "openai")
            .await?;

        let response_body: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to parse OpenAI response: {e}")))?;

        let text = extract_output_text(&response_body)?;

        let mut result = LlmResult::new(text, "openai", inv.model);

        if let Some(usage) = response_body.usage {
            result.tokens_input = Some(usage.input_tokens);
            result.tokens_output = Some(usage.output_tokens);
        }

        debug!(
            provider = "openai",
            tokens_input = ?result.tokens_input,
            tokens_output = ?result.tokens_output,
            "OpenAI invocation completed"
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Concatenate output_text blocks from message items in the response.
///
/// Responses also carry non-message items (file_search_call and similar);
/// only message text reaches the caller.
fn extract_output_text(response: &ResponsesResponse) -> Result<String, LlmError> {
    let mut parts = Vec::new();

    for item in &response.output {
        if item.item_type != "message" {
            continue;
        }
        for block in &item.content {
            if block.block_type == "output_text"
                && let Some(text) = &block.text
            {
                parts.push(text.as_str());
            }
        }
    }

    let text = parts.join("");
    if text.is_empty() {
        return Err(LlmError::MissingOutput(
            "OpenAI response contained no message text".to_string(),
        ));
    }

    Ok(text)
}

/// Tool specification for a Responses API call
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Tool {
    FileSearch { vector_store_ids: Vec<String> },
}

/// Responses API request body
#[derive(Debug, Clone, Serialize)]
struct ResponsesRequest {
    model: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

/// Responses API response body
#[derive(Debug, Clone, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<Usage>,
}

/// Item in the response output array
#[derive(Debug, Clone, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Content block inside a message item
#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ResponsesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_output_text_from_message() {
        let response = parse(
            r#"{
                "output": [
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "Summary of the NDA."}
                    ]}
                ],
                "usage": {"input_tokens": 100, "output_tokens": 20}
            }"#,
        );

        let text = extract_output_text(&response).unwrap();
        assert_eq!(text, "Summary of the NDA.");
    }

    #[test]
    fn test_extract_skips_tool_call_items() {
        let response = parse(
            r#"{
                "output": [
                    {"type": "file_search_call"},
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "~~old~~ **new**"}
                    ]}
                ]
            }"#,
        );

        let text = extract_output_text(&response).unwrap();
        assert_eq!(text, "~~old~~ **new**");
    }

    #[test]
    fn test_extract_concatenates_text_blocks() {
        let response = parse(
            r#"{
                "output": [
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "part one "},
                        {"type": "output_text", "text": "part two"}
                    ]}
                ]
            }"#,
        );

        let text = extract_output_text(&response).unwrap();
        assert_eq!(text, "part one part two");
    }

    #[test]
    fn test_empty_output_is_missing_output_error() {
        let response = parse(r#"{"output": []}"#);
        let err = extract_output_text(&response).unwrap_err();
        assert!(matches!(err, LlmError::MissingOutput(_)));
    }

    #[test]
    fn test_file_search_tool_serialization() {
        let tool = Tool::FileSearch {
            vector_store_ids: vec!["vs_abc123".to_string()],
        };
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "file_search",
                "vector_store_ids": ["vs_abc123"]
            })
        );
    }

    #[test]
    fn test_request_omits_empty_optionals() {
        let request = ResponsesRequest {
            model: "gpt-4o".to_string(),
            input: "text".to_string(),
            instructions: None,
            max_output_tokens: None,
            temperature: None,
            tools: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("instructions"));
        assert!(!object.contains_key("tools"));
        assert!(!object.contains_key("temperature"));
    }

    #[test]
    fn test_new_from_config_missing_api_key() {
        let test_env_var = "OPENAI_API_KEY_TEST_MISSING";
        unsafe {
            std::env::remove_var(test_env_var);
        }

        let mut config = Config::minimal_for_testing();
        config.provider.api_key_env = Some(test_env_var.to_string());

        match OpenAiBackend::new_from_config(&config) {
            Err(LlmError::Misconfiguration(msg)) => {
                assert!(msg.contains(test_env_var));
                assert!(msg.contains("not found"));
            }
            Err(other) => panic!("Expected Misconfiguration, got {other:?}"),
            Ok(_) => panic!("Expected Misconfiguration, got a backend"),
        }
    }
}
