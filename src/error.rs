use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::openai::ProviderError;

/// Error returned by HTTP handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Internal(err) => {
                if let Some(provider) = err.downcast_ref::<ProviderError>() {
                    // Client errors (bad key, unknown model, quota) keep their status
                    let status = StatusCode::from_u16(provider.status)
                        .ok()
                        .filter(|s| s.is_client_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY);
                    (status, provider.message.clone())
                } else if err.downcast_ref::<reqwest::Error>().is_some() {
                    (StatusCode::BAD_GATEWAY, "Upstream request failed".to_string())
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            ApiError::BadRequest(_) => log::debug!("Rejected request: {}", message),
            ApiError::Internal(err) => log::error!("❌ Request failed ({}): {:#}", status, err),
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}
