use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    ApiConfig, card, language, metrics,
    middleware::{cors, request_id, security_headers},
    state::ApiState,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .fallback(handler_404)
}

/// Routes served under `/api`
fn api_routes() -> Router<ApiState> {
    Router::new()
        .merge(card::routes())
        .merge(language::routes())
}

/// The router with state and every middleware layer applied
pub fn app(state: ApiState, config: &ApiConfig) -> anyhow::Result<Router> {
    let cors = cors::create_cors_layer(&config.allowed_origin)?;

    // Configure HTTP request/response tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let app = router()
        .with_state(state)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(middleware::from_fn(request_id::request_id_middleware));

    Ok(security_headers::apply_security_headers(
        app,
        config.environment.clone(),
    ))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
