use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    num::NonZeroU64,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use lcp_api::{ApiConfig, state::ApiState};
use lcp_lingq::IndexPicker;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot};
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "test-lingq-token";
pub const TEST_ORIGIN: &str = "http://localhost:8080";

/// Always draws the same index.
#[derive(Debug)]
pub struct FixedPicker(pub u64);

impl IndexPicker for FixedPicker {
    fn pick_below(&self, _upper: NonZeroU64) -> u64 {
        self.0
    }
}

/// A request received by [`MockLingq`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockData {
    languages: Value,
    cards: HashMap<String, Vec<Value>>,
    broken: HashSet<String>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockData>>;

/// In-process stand-in for the LingQ v2 API.
///
/// Card page `n` of a language holds its `n`th card; every card page reports the
/// language's total card count. Languages with no configured cards report zero.
pub struct MockLingq {
    addr: SocketAddr,
    data: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockLingq {
    pub async fn start() -> Self {
        let data = Shared::default();

        let app = Router::new()
            .route("/languages/", get(languages_handler))
            .route("/{language}/cards/", get(cards_handler))
            .with_state(data.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock LingQ");
        let addr = listener.local_addr().expect("Failed to read mock address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock LingQ server failed");
        });

        Self {
            addr,
            data,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_languages(&self, languages: Value) {
        self.data.lock().unwrap().languages = languages;
    }

    pub fn set_cards(&self, language: &str, cards: Vec<Value>) {
        self.data
            .lock()
            .unwrap()
            .cards
            .insert(language.to_string(), cards);
    }

    /// Make every card page of `language` answer 200 with a non-JSON body
    pub fn break_language(&self, language: &str) {
        self.data
            .lock()
            .unwrap()
            .broken
            .insert(language.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.lock().unwrap().requests.clone()
    }
}

impl Drop for MockLingq {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn record(data: &Shared, path: String, params: &HashMap<String, String>, headers: &HeaderMap) {
    data.lock().unwrap().requests.push(RecordedRequest {
        path,
        page: params.get("page").cloned(),
        page_size: params.get("page_size").cloned(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });
}

async fn languages_handler(State(data): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record(&data, "/languages/".to_string(), &HashMap::new(), &headers);
    Json(data.lock().unwrap().languages.clone())
}

async fn cards_handler(
    State(data): State<Shared>,
    Path(language): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&data, format!("/{language}/cards/"), &params, &headers);

    let expected = format!("Token {TEST_TOKEN}");
    if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token." })),
        )
            .into_response();
    }

    let data = data.lock().unwrap();
    if data.broken.contains(&language) {
        return (StatusCode::OK, "<html>down for maintenance</html>").into_response();
    }

    let cards = data.cards.get(&language).cloned().unwrap_or_default();
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let results: Vec<Value> = cards.get(page).cloned().into_iter().collect();

    Json(json!({
        "count": cards.len(),
        "next": null,
        "previous": null,
        "results": results
    }))
    .into_response()
}

/// An address nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read throwaway address");
    drop(listener);
    format!("http://{addr}")
}

/// Test state builder pointing the API at a given LingQ base URL
pub struct TestStateBuilder {
    upstream_url: String,
    picker: Arc<dyn IndexPicker>,
    timeout_secs: u64,
}

impl TestStateBuilder {
    pub fn new(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            picker: Arc::new(FixedPicker(0)),
            timeout_secs: 5,
        }
    }

    pub fn picker(mut self, picker: impl IndexPicker + 'static) -> Self {
        self.picker = Arc::new(picker);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::from_vars([
            ("LINGQ_API_KEY", TEST_TOKEN.to_string()),
            ("LINGQ_API_URL", self.upstream_url.clone()),
            ("ALLOWED_ORIGIN", TEST_ORIGIN.to_string()),
            ("UPSTREAM_TIMEOUT_SECS", self.timeout_secs.to_string()),
        ])
        .expect("Invalid test configuration")
    }

    pub fn build(self) -> ApiState {
        ApiState::with_picker(&self.config(), self.picker).expect("Failed to create test state")
    }

    /// The fully layered application, as served by the binary
    pub fn build_app(self) -> Router {
        let config = self.config();
        let state = ApiState::with_picker(&config, self.picker).expect("Failed to create test state");
        lcp_api::router::app(state, &config).expect("Failed to build app")
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a GET request with an `Origin` header
    pub async fn get_from_origin(&self, uri: &str, origin: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a CORS preflight request
    pub async fn preflight(&self, uri: &str, origin: &str) -> TestResponse {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
