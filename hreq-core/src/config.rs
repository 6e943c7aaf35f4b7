//! Request configuration built once per invocation from command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP methods. Standard verbs are matched case-insensitively; anything
/// else that is a valid token is sent as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
    Extension(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Extension(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.to_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "CONNECT" => HttpMethod::Connect,
            "TRACE" => HttpMethod::Trace,
            _ if is_token(s) => HttpMethod::Extension(s.to_string()),
            _ => return Err(Error::Construct(format!("invalid method {:?}", s))),
        };
        Ok(method)
    }
}

// tchar from RFC 9110, section 5.6.2
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

/// Where the request body comes from. At most one source is ever used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodySource {
    #[default]
    None,
    Inline(Vec<u8>),
    File(PathBuf),
}

impl BodySource {
    /// Picks the body source from the `-d` and `-data-file` flags. Empty
    /// values count as absent and inline text is checked first.
    pub fn from_flags(inline: &str, file: Option<PathBuf>) -> Self {
        if !inline.is_empty() {
            return BodySource::Inline(inline.as_bytes().to_vec());
        }
        match file {
            Some(path) if !path.as_os_str().is_empty() => BodySource::File(path),
            _ => BodySource::None,
        }
    }
}

/// Client-side transport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Skip certificate and hostname verification. Development only.
    pub insecure_tls: bool,
}

impl TransportOptions {
    pub fn new(timeout: Duration, insecure_tls: bool) -> Self {
        Self {
            timeout: (!timeout.is_zero()).then_some(timeout),
            insecure_tls,
        }
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, false)
    }
}

#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Raw method text; parsed when the request is built.
    pub method: String,
    pub url: String,
    pub auth_token: String,
    pub body: BodySource,
    pub content_type: String,
    pub transport: TransportOptions,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            auth_token: String::new(),
            body: BodySource::None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            transport: TransportOptions::default(),
        }
    }
}
