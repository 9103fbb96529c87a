#![allow(dead_code)]

//! In-process mock of the Alexa web console endpoints.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{COOKIE, LOCATION};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Cookie pair the mock accepts as a valid session.
pub const SESSION_COOKIE: &str = "session-id=abc";

pub const VALID_COOKIES: &str = r#"{"session-id": "abc", "ubid": "def"}"#;

pub const KITCHEN_SERIAL: &str = "G090LF1181750ABC";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Device listing answers 200 with an HTML sign-in page.
    Malformed,
    /// Every endpoint answers 500.
    ServerError,
    /// Every endpoint redirects to the sign-in page.
    RedirectToSignIn,
    /// Every endpoint answers 403.
    Forbidden,
    /// Every endpoint stalls for `SLOW_RESPONSE` before answering normally.
    Slow,
}

pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default)]
pub struct MockAlexa {
    pub device_requests: Arc<AtomicUsize>,
    pub preview_requests: Arc<AtomicUsize>,
    /// Bodies of accepted preview requests.
    pub previews: Arc<Mutex<Vec<Value>>>,
    /// `csrf` header of every preview request.
    pub csrf_headers: Arc<Mutex<Vec<Option<String>>>>,
    /// Query strings of device listing requests.
    pub device_queries: Arc<Mutex<Vec<String>>>,
    mode: Arc<Mutex<Mode>>,
}

impl MockAlexa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().expect("lock") = mode;
    }

    pub fn total_requests(&self) -> usize {
        self.device_requests.load(Ordering::SeqCst) + self.preview_requests.load(Ordering::SeqCst)
    }

    pub fn preview_count(&self) -> usize {
        self.preview_requests.load(Ordering::SeqCst)
    }

    pub fn device_count(&self) -> usize {
        self.device_requests.load(Ordering::SeqCst)
    }

    /// Decoded `sequenceJson` of the n-th accepted preview.
    pub fn sequence(&self, n: usize) -> Value {
        let previews = self.previews.lock().expect("lock");
        let raw = previews[n]["sequenceJson"]
            .as_str()
            .expect("sequenceJson is a string");
        serde_json::from_str(raw).expect("sequenceJson is JSON")
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/devices-v2/device", get(list_devices))
            .route("/api/behaviors/preview", post(preview))
            .with_state(self.clone())
    }

    /// Serve on the current tokio runtime; returns the base URL.
    pub async fn serve(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    /// Serve from a dedicated thread, for tests that drive the binary.
    pub fn serve_in_background(&self) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("local addr");
        let app = self.router();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                axum::serve(listener, app).await.expect("serve");
            });
        });
        format!("http://{}", addr)
    }

    fn mode(&self) -> Mode {
        *self.mode.lock().expect("lock")
    }

    async fn stall_if_slow(&self) {
        if self.mode() == Mode::Slow {
            tokio::time::sleep(SLOW_RESPONSE).await;
        }
    }
}

pub fn devices_body() -> Value {
    json!({
        "devices": [
            {
                "accountName": "Kitchen Echo",
                "deviceType": "A3S5BH2HU6VAYF",
                "serialNumber": KITCHEN_SERIAL,
                "deviceOwnerCustomerId": "A2Z9CUSTOMER",
                "deviceFamily": "ECHO",
                "online": true,
                "softwareVersion": "621577220"
            },
            {
                "accountName": "Living Room Echo",
                "deviceType": "A4ZP7ZC4PI6TO",
                "serialNumber": "G0911W0793360DEF",
                "deviceOwnerCustomerId": "A2Z9CUSTOMER",
                "deviceFamily": "ECHO",
                "online": false
            }
        ]
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookie| cookie.split("; ").any(|pair| pair == SESSION_COOKIE))
        .unwrap_or(false)
}

fn failure(mode: Mode) -> Option<Response> {
    match mode {
        Mode::ServerError => Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()),
        Mode::RedirectToSignIn => Some(
            (
                StatusCode::FOUND,
                [(LOCATION, "https://www.amazon.com/ap/signin")],
            )
                .into_response(),
        ),
        Mode::Forbidden => Some(StatusCode::FORBIDDEN.into_response()),
        Mode::Normal | Mode::Malformed | Mode::Slow => None,
    }
}

async fn list_devices(State(mock): State<MockAlexa>, uri: Uri, headers: HeaderMap) -> Response {
    mock.device_requests.fetch_add(1, Ordering::SeqCst);
    mock.device_queries
        .lock()
        .expect("lock")
        .push(uri.query().unwrap_or_default().to_string());

    mock.stall_if_slow().await;
    if let Some(response) = failure(mock.mode()) {
        return response;
    }
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if mock.mode() == Mode::Malformed {
        return (StatusCode::OK, "<html>Amazon Sign-In</html>").into_response();
    }
    Json(devices_body()).into_response()
}

async fn preview(
    State(mock): State<MockAlexa>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.preview_requests.fetch_add(1, Ordering::SeqCst);
    mock.csrf_headers.lock().expect("lock").push(
        headers
            .get("csrf")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    mock.stall_if_slow().await;
    if let Some(response) = failure(mock.mode()) {
        return response;
    }
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    mock.previews.lock().expect("lock").push(body);
    StatusCode::OK.into_response()
}
