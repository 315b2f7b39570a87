#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use forge::adapters::record_generator::RecordGenerator;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
}

impl TestServer {
    /// The real generation service.
    pub async fn new() -> Self {
        Self::serve(forge::create_app(Arc::new(RecordGenerator::new()))).await
    }

    pub async fn serve(app: Router) -> Self {
        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer { addr, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Base URL of a port nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Clone)]
struct StubState {
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

async fn stub_generate(State(state): State<StubState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().unwrap() = Some(body);

    let mut responses = state.responses.lock().unwrap();
    let (status, body) = if responses.len() > 1 {
        responses.pop_front().unwrap()
    } else {
        responses.front().cloned().unwrap()
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Stand-in generation service replaying canned responses. The last
/// response is repeated once the others are used up.
pub struct StubService {
    pub server: TestServer,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl StubService {
    pub async fn new(status: u16, body: &str) -> Self {
        Self::sequence(vec![(status, body)]).await
    }

    pub async fn sequence(responses: Vec<(u16, &str)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(status, body)| (StatusCode::from_u16(status).unwrap(), body.to_string()))
            .collect();
        let state = StubState {
            responses: Arc::new(Mutex::new(responses)),
            hits: Arc::new(AtomicUsize::new(0)),
            last_body: Arc::new(Mutex::new(None)),
        };
        let hits = state.hits.clone();
        let last_body = state.last_body.clone();

        let app = Router::new()
            .route("/api/generate", post(stub_generate))
            .with_state(state);

        Self {
            server: TestServer::serve(app).await,
            hits,
            last_body,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}
