//! REST access to the AutoHub backend.
//!
//! Every response is wrapped in `{ success, data?, message? }`; see
//! [`envelope`]. Transport lives behind [`ApiClient`] so the browser can be
//! driven by the real backend or by canned responses in tests.

pub mod envelope;
pub mod http;
pub mod resources;

pub use envelope::{parse_envelope, Envelope};
pub use http::HttpClient;
pub use resources::{
    change_password, create_record, delete_record, fetch_records, login, update_status,
};

use crate::error::Result;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Sends one JSON request and returns the raw response body.
///
/// `path` is relative to the API root, e.g. `/api/car-users`.
pub trait ApiClient {
    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value>;
}
