use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATA_URL_SCHEME: &str = "data:";
const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageData },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Image part from a base64 payload or an existing data URL.
    pub fn image(base64: &str) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageData {
                url: to_data_url(base64),
                detail: Some("auto".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageData {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

/// Providers answer with either a plain string or a list of typed parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    Text(String),
    Parts(Vec<ResponsePart>),
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatResponse {
    /// Plain text of the first choice, empty if the provider sent none.
    pub fn content_text(&self) -> String {
        match self.choices.first().and_then(|c| c.message.content.as_ref()) {
            Some(ResponseContent::Text(text)) => text.clone(),
            Some(ResponseContent::Parts(parts)) => parts
                .iter()
                .map(|part| match (part.part_type.as_str(), &part.text) {
                    ("text", Some(text)) => text.as_str(),
                    _ => "",
                })
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
            None => String::new(),
        }
    }
}

/// Normalize a base64 image into a data URL. Existing data URLs pass through.
pub fn to_data_url(base64: &str) -> String {
    if base64.is_empty() || base64.starts_with(DATA_URL_SCHEME) {
        return base64.to_string();
    }
    format!("{}{}", JPEG_DATA_URL_PREFIX, base64)
}

/// Non-success answer from the chat completion provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Chat completion API error ({status}): {message}")]
pub struct ProviderError {
    pub status: u16,
    pub message: String,
}

impl ProviderError {
    fn from_body(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let message = serde_json::from_str::<Value>(trimmed)
            .ok()
            .and_then(|value| {
                value
                    .pointer("/error/message")
                    .or_else(|| value.get("message"))
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            })
            .unwrap_or_else(|| {
                if trimmed.is_empty() {
                    "empty response body".to_string()
                } else {
                    trimmed.chars().take(500).collect()
                }
            });

        Self { status, message }
    }
}

/// Chat completion backend, keyed by the caller's own credential.
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse>;
}

/// OpenAI compatible `/chat/completions` client
pub struct OpenAIClient {
    base_url: String,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ChatCompletion for OpenAIClient {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        log::info!("🤖 Sending chat completion request with model: {}", request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Chat completion response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            let error = ProviderError::from_body(status.as_u16(), &error_text);
            log::error!("❌ {}", error);
            return Err(error.into());
        }

        let chat_response: ChatResponse = response.json().await?;
        log::debug!("✅ Parsed chat completion response ({} choices)", chat_response.choices.len());

        Ok(chat_response)
    }
}
