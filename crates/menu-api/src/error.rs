use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures that reach the browser as an error page.
///
/// Admin mutations never surface here: their errors are logged and the
/// request still redirects.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<handlebars::RenderError> for ApiError {
    fn from(e: handlebars::RenderError) -> Self {
        ApiError::TemplateError(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InternalError(format!("Failed to encode page data: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::TemplateError(msg) => tracing::error!("Template error: {}", msg),
            ApiError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, "Sunucu hatası").into_response()
    }
}
