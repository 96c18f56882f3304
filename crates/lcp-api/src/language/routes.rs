use axum::{Json, Router, extract::State, routing::get};
use lcp_lingq::Language;

use crate::{ApiState, error::ApiError};

/// Create the language routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/languages", get(list_languages))
}

/// Pass the LingQ language list through as `[{title, code}]`
async fn list_languages(State(state): State<ApiState>) -> Result<Json<Vec<Language>>, ApiError> {
    let languages = state.lingq.languages().await?;
    Ok(Json(languages))
}
