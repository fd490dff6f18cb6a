use anyhow::Result;
use std::sync::Arc;

use crate::models::{AnalyzeRequest, AnalyzeResult, ResolvedLocation};
use crate::services::location::Geocoder;
use crate::services::openai::{ChatCompletion, ChatMessage, ChatRequest, ContentPart};
use crate::services::prompts::{build_system_prompt, build_user_prompt};

/// Geocode, build prompts, ask the model.
pub struct AIService {
    geocoder: Arc<dyn Geocoder>,
    chat: Arc<dyn ChatCompletion>,
}

impl AIService {
    pub fn new(geocoder: Arc<dyn Geocoder>, chat: Arc<dyn ChatCompletion>) -> Self {
        Self { geocoder, chat }
    }

    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResult> {
        let AnalyzeRequest {
            api_key,
            model,
            text,
            image_base64,
            category,
            location,
        } = request;

        let info = self.geocoder.resolve(location.lat, location.lng).await;
        let resolved = ResolvedLocation::new(info, location);

        let system_prompt = build_system_prompt(category);
        let user_prompt = build_user_prompt(&text, category, &resolved);

        let mut parts = vec![ContentPart::text(user_prompt.clone())];
        parts.extend(
            image_base64
                .iter()
                .filter(|image| !image.is_empty())
                .map(|image| ContentPart::image(image)),
        );

        log::info!(
            "📸 Analyzing {} request with {} image(s) near ({}, {})",
            category,
            parts.len() - 1,
            location.lat,
            location.lng
        );

        let chat_request = ChatRequest {
            model: model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(parts)],
        };

        let response = self.chat.complete(&api_key, &chat_request).await?;
        let content = response.content_text();

        log::info!("💬 Model {} answered with {} chars", model, content.chars().count());

        Ok(AnalyzeResult {
            model,
            location: resolved,
            category,
            prompt_used: user_prompt,
            content,
        })
    }
}
