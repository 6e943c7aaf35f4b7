//! Shared fixtures for the integration tests.

use std::sync::Mutex;

use hreq_core::client::{HttpClient, HttpRequest, HttpResponse};
use hreq_core::Error;

/// Records every request it is given and answers with a canned response.
pub struct MockClient {
    pub calls: Mutex<Vec<HttpRequest>>,
    status: u16,
    reason: &'static str,
    body: &'static str,
}

impl MockClient {
    pub fn new(status: u16, reason: &'static str, body: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status,
            reason,
            body,
        }
    }

    pub fn ok() -> Self {
        Self::new(200, "OK", "{}")
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            reason: Some(self.reason.to_string()),
            headers: Vec::new(),
            body: self.body.as_bytes().to_vec(),
        })
    }
}

/// Fails every request with the given error.
pub struct FailingClient(pub fn() -> Error);

impl HttpClient for FailingClient {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, Error> {
        Err((self.0)())
    }
}
