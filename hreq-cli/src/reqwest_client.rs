use std::error::Error as _;

use hreq_core::client::{HttpClient, HttpRequest, HttpResponse};
use hreq_core::config::TransportOptions;
use hreq_core::{Error, TransportErrorKind};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// The default HTTP client, backed by the `reqwest` blocking client.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(options: &TransportOptions) -> Result<Self, Error> {
        log::debug!(
            "timeout: {:?}, insecure tls: {}",
            options.timeout,
            options.insecure_tls
        );

        let mut builder = reqwest::blocking::Client::builder().timeout(options.timeout);
        if options.insecure_tls {
            log::warn!("TLS certificate and hostname verification is disabled");
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        let client = builder.build().map_err(|e| {
            Error::transport(TransportErrorKind::Other, format!("build client: {}", chain(&e)))
        })?;
        Ok(Self { client })
    }
}

/// Render an error with all of its sources, since reqwest's own message
/// hides the TLS or IO cause.
fn chain(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}

fn transport_error(e: reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        TransportErrorKind::Timeout
    } else if e.is_connect() {
        TransportErrorKind::Connect
    } else if e.is_redirect() {
        TransportErrorKind::Redirect
    } else {
        TransportErrorKind::Other
    };
    Error::transport(kind, chain(&e))
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| Error::Construct(format!("invalid header name {:?}: {}", k, e)))?;
        let value = HeaderValue::from_str(v)
            .map_err(|e| Error::Construct(format!("invalid value for header {}: {}", k, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| Error::Construct(format!("invalid method {:?}: {}", request.method, e)))?;

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .headers(header_map(&request.headers)?);

        if let Some(ref b) = request.body {
            builder = builder.body(b.clone());
        }

        let built = builder.build().map_err(|e| Error::Construct(chain(&e)))?;

        let response = self.client.execute(built).map_err(transport_error)?;

        let status = response.status();
        // hyper keeps the server's phrase only when it differs from the canonical one.
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
            .or_else(|| status.canonical_reason())
            .map(str::to_string);

        let mut out_headers = Vec::new();
        for (k, v) in response.headers() {
            out_headers.push((
                k.as_str().to_string(),
                v.to_str().unwrap_or("(binary)").to_string(),
            ));
        }

        // Consumes the response, so the connection is released either way.
        let body = response.bytes().map_err(|e| Error::ReadBody(chain(&e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers: out_headers,
            body: body.to_vec(),
        })
    }
}
