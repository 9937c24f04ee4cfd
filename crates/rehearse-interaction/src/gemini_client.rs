//! GeminiClient - Direct REST API implementation for Gemini.
//!
//! Calls the `generateContent` endpoint with the full conversation on every
//! request; the service keeps no conversation state between calls.

use async_trait::async_trait;
use rehearse_core::client::{InterviewModel, ModelError};
use rehearse_core::config::{AppConfig, DEFAULT_GEMINI_MODEL};
use rehearse_core::session::ReplayMessage;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client using model, endpoint and timeout from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the HTTP client cannot be built.
    pub fn from_config(api_key: impl Into<String>, config: &AppConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| ModelError::InvalidRequest(format!("Failed to build HTTP client: {err}")))?;

        let model = if config.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            config.model.clone()
        };

        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, ModelError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        tracing::debug!(
            model = %self.model,
            contents = body.contents.len(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                ModelError::ProcessError {
                    status_code: None,
                    // The URL carries the API key.
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                    retry_after: None,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            tracing::warn!(status = status.as_u16(), "Gemini API returned an error status");
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ModelError::MalformedResponse(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl InterviewModel for GeminiClient {
    async fn invoke(
        &self,
        system_instruction: &str,
        history: &[ReplayMessage],
        new_message: &str,
    ) -> Result<String, ModelError> {
        let request = build_chat_request(system_instruction, history, new_message)?;
        self.send_request(&request).await
    }

    async fn invoke_once(&self, prompt: &str) -> Result<String, ModelError> {
        let request = build_chat_request("", &[], prompt)?;
        self.send_request(&request).await
    }
}

/// Builds the request body: replayed history, then the new user message.
///
/// An empty system instruction is omitted.
fn build_chat_request(
    system_instruction: &str,
    history: &[ReplayMessage],
    new_message: &str,
) -> Result<GenerateContentRequest, ModelError> {
    if new_message.trim().is_empty() {
        return Err(ModelError::InvalidRequest(
            "Gemini payload must include a non-empty message".into(),
        ));
    }

    let mut contents: Vec<Content> = history
        .iter()
        .map(|message| Content::text(message.role.as_str(), &message.content))
        .collect();
    contents.push(Content::text("user", new_message));

    let system_instruction = (!system_instruction.trim().is_empty()).then(|| SystemInstruction {
        parts: vec![Part {
            text: system_instruction.to_string(),
        }],
    });

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
    })
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, ModelError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::MalformedResponse(
            "Gemini API returned no text in the response candidates".into(),
        ));
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ModelError::ProcessError {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
