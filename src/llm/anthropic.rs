//! Anthropic Messages API client (`/v1/messages`), text replies only.

use super::config::LlmTimeouts;
use super::http;
use super::types::{ChatResponse, ContentBlock, LlmError, Message, STOP_END_TURN, STOP_MAX_TOKENS};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: http::client(timeouts)?, api_key })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let request = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest { model, max_tokens, system, messages });
        let body = http::send(request).await?;
        parse_response(&body)
    }
}

#[derive(serde::Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(serde::Deserialize)]
struct MessagesReply {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: TokenUsage,
}

#[derive(serde::Deserialize)]
struct TokenUsage {
    input_tokens: u64,
    output_tokens: u64,
}

/// Both ways the API reports a reply cut short count as truncation.
fn normalize_stop_reason(reason: Option<&str>) -> String {
    match reason {
        None => STOP_END_TURN.to_owned(),
        Some("max_tokens" | "model_context_window_exceeded") => STOP_MAX_TOKENS.to_owned(),
        Some(other) => other.to_owned(),
    }
}

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let reply: MessagesReply = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let stop_reason = normalize_stop_reason(reply.stop_reason.as_deref());

    let mut content = reply.content;
    content.retain(|block| !matches!(block, ContentBlock::Unknown));

    Ok(ChatResponse {
        content,
        model: reply.model,
        stop_reason,
        input_tokens: reply.usage.input_tokens,
        output_tokens: reply.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
