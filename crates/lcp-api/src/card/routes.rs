use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use lcp_lingq::Card;

use crate::{ApiState, error::ApiError, validation::validate_language};

/// Create the card routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/card", get(random_card))
}

/// First `lang` value of the query string. Repeated parameters are not an error.
fn first_lang(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "lang")
        .map(|(_, value)| value.as_str())
}

/// Pick a random card for `?lang=`
async fn random_card(
    State(state): State<ApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Card>, ApiError> {
    let language = validate_language(first_lang(&params))?;

    let card = state.cards.random_card(language).await?;
    tracing::debug!(language, term = %card.term, "serving card");

    Ok(Json(card))
}
