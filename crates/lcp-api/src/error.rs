use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lcp_lingq::{SelectError, UpstreamError};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to the browser client.
///
/// The `Display` text is the client-facing message. The cause of an upstream
/// failure is logged, never returned.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Language is required")]
    MissingLanguage,
    #[error("Card not found")]
    CardNotFound,
    #[error("Connection with LingQ server failed")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingLanguage | Self::CardNotFound => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SelectError> for ApiError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::NoCards(language) => {
                tracing::info!(language = %language, "no cards found");
                Self::CardNotFound
            }
            SelectError::Upstream(e) => Self::Upstream(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream(cause) = &self {
            tracing::error!(error = %cause, "LingQ request failed");
        }

        (
            self.status_code(),
            Json(json!({ "message": self.to_string() })),
        )
            .into_response()
    }
}
