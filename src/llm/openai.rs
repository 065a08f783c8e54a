//! `OpenAI`-compatible chat completions provider

use super::types::{LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat completions client for any `OpenAI`-compatible gateway
pub struct OpenAiChatService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiChatService {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    /// System directive first, then the dialogue in order
    fn translate_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        });
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.as_str().to_string(),
            content: m.text.clone(),
        }));

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
        }
    }

    fn normalize_response(resp: ChatResponse) -> Result<LlmResponse, LlmError> {
        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::malformed("Malformed response: no message content"))?;

        Ok(LlmResponse { text, usage })
    }

}

#[async_trait]
impl LlmService for OpenAiChatService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(LlmError::missing_credential)?;

        let chat_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::unavailable(format!("Request timeout: {e}"))
                } else {
                    LlmError::unavailable(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::unavailable(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), &body));
        }

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(chat_response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Chat completions wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}
