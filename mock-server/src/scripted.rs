//! Scripted server: replays queued responses and records requests.
//!
//! Every request, whatever its method or path, is answered with the next
//! enqueued `MockResponse`. When the queue is empty the server answers 500 so
//! an unscripted call shows up as a test failure instead of a hang.

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

/// A canned response: status plus an optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::new(200).with_body("{}")
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, without scheme or host.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<MockResponse>,
    requests: VecDeque<RecordedRequest>,
}

type SharedScript = Arc<Mutex<Script>>;

fn lock(script: &SharedScript) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running scripted server.
#[derive(Debug, Clone)]
pub struct MockServer {
    addr: SocketAddr,
    script: SharedScript,
}

impl MockServer {
    /// Start a server on an ephemeral localhost port.
    pub fn start() -> Result<Self, std::io::Error> {
        let script = SharedScript::default();
        let router = Router::new().fallback(replay).with_state(script.clone());
        let addr = crate::spawn(router)?;
        Ok(Self { addr, script })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:<port>`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn enqueue(&self, response: MockResponse) {
        lock(&self.script).responses.push_back(response);
    }

    /// Oldest request not yet taken, if any.
    pub fn take_request(&self) -> Option<RecordedRequest> {
        lock(&self.script).requests.pop_front()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.script).requests.len()
    }
}

/// Non-UTF-8 header values are recorded with invalid bytes replaced.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), value)
        })
        .collect()
}

async fn replay(
    State(script): State<SharedScript>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let headers = header_pairs(&headers);
    tracing::debug!(%method, %path, "scripted server received request");

    let next = {
        let mut script = lock(&script);
        script.requests.push_back(RecordedRequest {
            method: method.as_str().to_string(),
            path,
            headers,
            body,
        });
        script.responses.pop_front()
    };

    let Some(response) = next else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "no response enqueued").into_response();
    };
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if response.body.is_empty() {
        status.into_response()
    } else {
        (status, [(CONTENT_TYPE, "application/json")], response.body).into_response()
    }
}
