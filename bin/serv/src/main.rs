use axum::{Router, routing::get};
use lcp_api::{config::ApiConfig, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    lcp_api::tracing::init_tracing(&config.environment);

    // Initialize Prometheus metrics exporter
    let metrics_handle = lcp_api::metrics::init_metrics()?;

    let state = ApiState::new(&config)?;

    // Metrics stay outside the CORS and request layers
    let metrics_app = Router::new()
        .route("/metrics", get(lcp_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = lcp_api::router::app(state, &config)?.merge(metrics_app);

    tracing::info!("Environment: {:?}", config.environment);
    tracing::info!("Allowed origin: {}", config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
