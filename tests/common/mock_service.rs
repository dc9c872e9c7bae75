//! In-memory records service for exercising the HTTP client.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use records_client::{Record, RecordRequest};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

/// A scripted response that replaces the in-memory behavior for one request.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
            delay_ms: 0,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, detail: &str) -> Self {
        Self::json(status, &format!(r#"{{"detail": "{}"}}"#, detail))
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct ServiceState {
    records: Arc<Mutex<Vec<Record>>>,
    next_id: Arc<Mutex<i64>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    scripted: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Records service backed by a `Vec`, served over real HTTP.
pub struct MockService {
    pub addr: SocketAddr,
    state: ServiceState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockService {
    pub async fn start() -> Self {
        Self::start_with(Vec::new()).await
    }

    /// Start with `records` already stored. New ids continue after the
    /// highest seeded id.
    pub async fn start_with(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let state = ServiceState {
            records: Arc::new(Mutex::new(records)),
            next_id: Arc::new(Mutex::new(next_id)),
            requests: Arc::new(Mutex::new(Vec::new())),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Answer the next request with `resp` instead of the stored data.
    pub fn enqueue_response(&self, resp: MockResponse) {
        self.state.scripted.lock().push_back(resp);
    }

    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.records.lock().clone()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Seed record with predictable fields.
pub fn seed_record(id: i64, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
        age: 18 + (id as i32 % 10),
        major: "Engineering".to_string(),
        gpa: 70.0 + id as f64,
        registered_at: format!("2025-01-{:02}T09:00:00", id.clamp(1, 28)),
    }
}

async fn handle_request(State(state): State<ServiceState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(String::from);

    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    state.requests.lock().push(CapturedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        body: body.clone(),
    });

    let scripted = state.scripted.lock().pop_front();
    if let Some(resp) = scripted {
        if resp.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(resp.delay_ms)).await;
        }
        return respond(resp.status, resp.body);
    }

    route(&state, &method, &path, query.as_deref(), &body)
}

fn route(
    state: &ServiceState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
) -> Response<Body> {
    let rest = match path.strip_prefix("/records/") {
        Some(rest) => rest,
        None => return not_found("Not Found"),
    };

    if rest.is_empty() {
        return match *method {
            Method::GET => list(state, query),
            Method::POST => create(state, body),
            _ => respond(405, b"{}".to_vec()),
        };
    }

    let Ok(id) = rest.parse::<i64>() else {
        return respond(422, br#"{"detail": "id must be an integer"}"#.to_vec());
    };

    match *method {
        Method::GET => match state.records.lock().iter().find(|r| r.id == id) {
            Some(record) => json_response(200, record),
            None => missing(id),
        },
        Method::PUT => update(state, id, body),
        Method::DELETE => {
            let mut records = state.records.lock();
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                missing(id)
            } else {
                respond(204, Vec::new())
            }
        }
        _ => respond(405, b"{}".to_vec()),
    }
}

fn list(state: &ServiceState, query: Option<&str>) -> Response<Body> {
    let mut skip = 0usize;
    let mut limit = 100usize;
    for pair in query.unwrap_or("").split('&') {
        match pair.split_once('=') {
            Some(("skip", v)) => skip = v.parse().unwrap_or(0),
            Some(("limit", v)) => limit = v.parse().unwrap_or(100),
            _ => {}
        }
    }

    let mut records = state.records.lock().clone();
    records.sort_by_key(|r| r.id);
    let page: Vec<Record> = records.into_iter().skip(skip).take(limit).collect();
    json_response(200, &page)
}

fn create(state: &ServiceState, body: &[u8]) -> Response<Body> {
    let Ok(request) = serde_json::from_slice::<RecordRequest>(body) else {
        return respond(422, br#"{"detail": "invalid body"}"#.to_vec());
    };

    let id = {
        let mut next = state.next_id.lock();
        let id = *next;
        *next += 1;
        id
    };

    let record = Record {
        id,
        name: request.name,
        age: request.age,
        major: request.major,
        gpa: request.gpa,
        registered_at: format!("2025-06-01T12:00:{:02}", id % 60),
    };
    state.records.lock().push(record.clone());
    json_response(201, &record)
}

fn update(state: &ServiceState, id: i64, body: &[u8]) -> Response<Body> {
    let Ok(request) = serde_json::from_slice::<RecordRequest>(body) else {
        return respond(422, br#"{"detail": "invalid body"}"#.to_vec());
    };

    let mut records = state.records.lock();
    match records.iter_mut().find(|r| r.id == id) {
        Some(record) => {
            record.name = request.name;
            record.age = request.age;
            record.major = request.major;
            record.gpa = request.gpa;
            json_response(200, &*record)
        }
        None => missing(id),
    }
}

fn missing(id: i64) -> Response<Body> {
    not_found(&format!("Record with ID {} not found", id))
}

fn not_found(detail: &str) -> Response<Body> {
    respond(404, format!(r#"{{"detail": "{}"}}"#, detail).into_bytes())
}

fn json_response<T: serde::Serialize>(status: u16, value: &T) -> Response<Body> {
    respond(status, serde_json::to_vec(value).unwrap())
}

fn respond(status: u16, body: Vec<u8>) -> Response<Body> {
    let mut builder = Response::builder().status(StatusCode::from_u16(status).unwrap());
    if !body.is_empty() {
        builder = builder.header("content-type", "application/json");
    }
    builder.body(Body::from(body)).unwrap()
}
