use crate::error::Error;

/// A fully prepared request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Sets a header, replacing any existing value under the same
    /// case-insensitive name.
    pub fn set_header(&mut self, key: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.headers.push((key.to_string(), value.into()));
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Output of a completed HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, when the status code has one.
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// `200 OK`, or just the code when no reason phrase is known.
    pub fn status_line(&self) -> String {
        match &self.reason {
            Some(reason) if !reason.is_empty() => format!("{} {}", self.status, reason),
            _ => self.status.to_string(),
        }
    }
}

/// A generic interface to execute an HTTP request.
/// The binary plugs in a `reqwest` implementation; tests plug in mocks.
pub trait HttpClient {
    /// Sends `request` once and reads the whole response body.
    ///
    /// Implementations report a malformed method or URL as
    /// [`Error::Construct`], network, TLS and timeout failures as
    /// [`Error::Transport`], and an interrupted body read as
    /// [`Error::ReadBody`].
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}
