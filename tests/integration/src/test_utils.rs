//! Test utilities for the scenario tests

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use tokio::net::TcpListener;

static LOGGING: Once = Once::new();

/// Install a test subscriber once per process. Honors `RUST_LOG`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Unique scratch directory removed on drop
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Canned verdict returned by the stub backend
pub fn verdict(prediction: u8, probability_failure: f64) -> Value {
    json!({
        "prediction": prediction,
        "probability_no_failure": 1.0 - probability_failure,
        "probability_failure": probability_failure,
    })
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// Prediction request bodies received by a stub backend, in arrival order
pub type Captured = Arc<Mutex<Vec<Value>>>;

/// Stub prediction backend answering every request with `response` and
/// recording each request body
pub async fn recording_backend(response: Value) -> (String, Captured) {
    let captured: Captured = Arc::default();

    async fn health() -> Json<Value> {
        Json(json!({ "message": "Welcome to the Fullstack Flask Backend!" }))
    }

    let predict = move |State(captured): State<Captured>, Json(body): Json<Value>| {
        let response = response.clone();
        async move {
            if let Ok(mut sent) = captured.lock() {
                sent.push(body);
            }
            Json(response)
        }
    };

    let router = Router::new()
        .route("/", get(health))
        .route("/ml/predict", post(predict))
        .with_state(captured.clone());

    (serve(router).await, captured)
}

/// Stub prediction backend answering every request with `response`
pub async fn stub_backend(response: Value) -> String {
    recording_backend(response).await.0
}

/// Stub backend whose prediction endpoint always fails with `status` and
/// an `{"error": message}` body
pub async fn failing_backend(status: StatusCode, message: &'static str) -> String {
    let predict =
        move || async move { (status, Json(json!({ "error": message }))).into_response() };
    serve(Router::new().route("/ml/predict", post(predict))).await
}

/// Stub backend whose prediction endpoint fails with `status` and a plain text body
pub async fn bare_status_backend(status: StatusCode) -> String {
    let predict = move || async move { (status, "upstream gone").into_response() };
    serve(Router::new().route("/ml/predict", post(predict))).await
}

/// Stub backend whose health endpoint answers with plain text
pub async fn plain_text_backend() -> String {
    async fn home() -> &'static str {
        "ok"
    }
    serve(Router::new().route("/", get(home))).await
}

/// Base URL with nothing listening behind it
pub async fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}
