use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer that admits a single browser origin
///
/// # Arguments
/// * `allowed_origin` - Origin URL allowed to call the API, e.g. `http://localhost:8080`
///
/// # Returns
/// A configured `CorsLayer` with:
/// - Only `allowed_origin` echoed back, other origins get no allow-origin header
/// - Read-only HTTP methods (GET, HEAD, OPTIONS)
/// - Standard headers (Content-Type, Accept)
pub fn create_cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin.trim())?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}
