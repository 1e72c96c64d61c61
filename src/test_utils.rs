use crate::api::{ApiClient, Method};
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A request seen by [`MockApiClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Canned reply: a JSON body, or an HTTP status failure.
#[derive(Clone, Debug)]
pub enum MockResponse {
    Body(Value),
    Status(u16, String),
}

#[derive(Clone, Debug, Default)]
pub struct MockApiClient {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApiClient {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replies with each body in turn.
    pub fn with_bodies(bodies: Vec<Value>) -> Self {
        Self::new(bodies.into_iter().map(MockResponse::Body).collect())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn ok(data: Value) -> Value {
        json!({ "success": true, "data": data })
    }

    pub fn fail(message: &str) -> Value {
        json!({ "success": false, "message": message })
    }
}

impl ApiClient for MockApiClient {
    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(RecordedRequest {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
        let mut responses = self.responses.lock().expect("responses lock");
        match responses.pop_front() {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status, message)) => Err(Error::Status { status, message }),
            None => Ok(json!({ "success": true })),
        }
    }
}
