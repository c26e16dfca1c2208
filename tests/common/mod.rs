#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde_json::Value;
use tagstore_api::{ApiError, HttpBackend, HttpRequest, HttpResponse, Session, Transport};

/// Records every request and answers from a scripted queue.
///
/// When the queue runs dry it answers an empty 200, so request-shape
/// assertions do not have to script responses they ignore.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    queue: VecDeque<HttpResponse>,
    requests: Vec<HttpRequest>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, response: HttpResponse) {
        self.state
            .lock()
            .expect("mock state lock")
            .queue
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .expect("mock state lock")
            .requests
            .clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .last()
            .expect("at least one request was made")
            .clone()
    }
}

impl HttpBackend for MockBackend {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut state = self.state.lock().expect("mock state lock");
        state.requests.push(request);
        Ok(state
            .queue
            .pop_front()
            .unwrap_or_else(|| HttpResponse::empty(StatusCode::OK)))
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(
        StatusCode::from_u16(status).expect("valid status code"),
        Some("application/json".to_owned()),
        serde_json::to_vec(&body).expect("serializable body"),
    )
}

pub fn primitive_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(
        StatusCode::from_u16(status).expect("valid status code"),
        Some(tagstore_api::PRIMITIVE_CONTENT_TYPE.to_owned()),
        serde_json::to_vec(&body).expect("serializable body"),
    )
}

pub fn empty_response(status: u16) -> HttpResponse {
    HttpResponse::empty(StatusCode::from_u16(status).expect("valid status code"))
}

/// A session over a mock backend, plus a handle for inspecting traffic.
pub fn mock_session(base_url: &str) -> (Session, MockBackend) {
    let backend = MockBackend::new();
    let transport = Transport::with_backend(base_url, Box::new(backend.clone()));
    (Session::with_transport(transport), backend)
}

/// The request body parsed back into JSON.
pub fn body_json(request: &HttpRequest) -> Value {
    let body = request.body.as_ref().expect("request carries a body");
    serde_json::from_slice(body).expect("request body is JSON")
}
