use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AnalyzeRequest, AnalyzeResult, Category, Coordinates};
use crate::server::AppState;

// Header lookups are case-insensitive
pub const API_KEY_HEADER: &str = "apikey";
pub const AI_MODEL_HEADER: &str = "aimodel";

pub const MISSING_API_KEY: &str = "Missing header: apiKey";
pub const MISSING_AI_MODEL: &str = "Missing header: aiModel";
pub const MISSING_BODY: &str = "Missing body";
pub const MALFORMED_BODY: &str = "Malformed JSON body";
pub const MISSING_CONTENT: &str = "Either text or imageBase64 is required";
pub const INVALID_LOCATION: &str = "location with numeric lat and lng is required";
pub const INVALID_CATEGORY: &str = "Invalid category. Must be one of menu | supermarket | attraction";

/// `POST /api/ai/analyze`
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalyzeResult>, ApiError> {
    log::info!("📨 Analyze request received ({} bytes)", body.len());
    let request = validate_request(&headers, &body).map_err(ApiError::bad_request)?;

    let result = state.ai_service.analyze(request).await?;
    Ok(Json(result))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Check headers and body in order and return the first failure message.
/// The body stays raw bytes so non UTF-8 payloads still see the header checks first.
pub fn validate_request(headers: &HeaderMap, body: &[u8]) -> Result<AnalyzeRequest, &'static str> {
    let api_key = header_value(headers, API_KEY_HEADER).ok_or(MISSING_API_KEY)?;
    let model = header_value(headers, AI_MODEL_HEADER).ok_or(MISSING_AI_MODEL)?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MISSING_BODY);
    }
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => return Err(MISSING_BODY),
        Ok(Value::Object(fields)) => fields,
        _ => return Err(MALFORMED_BODY),
    };

    let text = fields
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let image_base64 = image_list(&fields);

    if text.is_empty() && image_base64.is_empty() {
        return Err(MISSING_CONTENT);
    }

    let location = coordinates(&fields).ok_or(INVALID_LOCATION)?;

    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .and_then(Category::from_string)
        .ok_or(INVALID_CATEGORY)?;

    Ok(AnalyzeRequest {
        api_key,
        model,
        text,
        image_base64,
        category,
        location,
    })
}

fn image_list(fields: &Map<String, Value>) -> Vec<String> {
    fields
        .get("imageBase64")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn coordinates(fields: &Map<String, Value>) -> Option<Coordinates> {
    let location = fields.get("location")?.as_object()?;
    let lat = location.get("lat")?.as_f64()?;
    let lng = location.get("lng")?.as_f64()?;
    Some(Coordinates { lat, lng })
}
