//! Runner: validates the configuration, builds the request, sends it and
//! reports the response.

use crate::client::{HttpClient, HttpRequest, HttpResponse};
use crate::config::{BodySource, HttpMethod, RequestConfig};
use crate::error::Error;
use std::io::Write;

/// Fails with [`Error::Usage`] when no URL was given.
pub fn validate(config: &RequestConfig) -> Result<(), Error> {
    if config.url.is_empty() {
        return Err(Error::Usage);
    }
    Ok(())
}

/// Resolve the body bytes. A file is read fully into memory.
pub fn resolve_body(source: &BodySource) -> Result<Option<Vec<u8>>, Error> {
    match source {
        BodySource::None => Ok(None),
        BodySource::Inline(bytes) => Ok(Some(bytes.clone())),
        BodySource::File(path) => std::fs::read(path)
            .map(Some)
            .map_err(|source| Error::ReadDataFile {
                path: path.clone(),
                source,
            }),
    }
}

fn apply_headers(request: &mut HttpRequest, config: &RequestConfig) {
    if !config.auth_token.is_empty() {
        request.set_header("Authorization", format!("Bearer {}", config.auth_token));
    }
    if request.body.is_some() && !config.content_type.is_empty() {
        request.set_header("Content-Type", config.content_type.as_str());
    }
}

/// Turn a configuration into a request. Every failure that does not need
/// the network happens here.
pub fn prepare(config: &RequestConfig) -> Result<HttpRequest, Error> {
    validate(config)?;

    let body = resolve_body(&config.body)?;
    if let Some(ref b) = body {
        log::debug!("request body: {} bytes ({})", b.len(), kind_of(&config.body));
    }

    let method: HttpMethod = config.method.parse()?;
    let mut request = HttpRequest::new(method.as_str(), config.url.as_str(), body);
    apply_headers(&mut request, config);

    log::debug!("prepared {} {}", request.method, request.url);
    Ok(request)
}

fn kind_of(source: &BodySource) -> &'static str {
    match source {
        BodySource::None => "none",
        BodySource::Inline(_) => "inline",
        BodySource::File(_) => "file",
    }
}

/// Send the request exactly once.
pub fn send<C: HttpClient>(client: &C, request: &HttpRequest) -> Result<HttpResponse, Error> {
    let response = client.execute(request)?;
    log::debug!(
        "response: {} ({} bytes)",
        response.status_line(),
        response.body.len()
    );
    for (k, v) in &response.headers {
        log::debug!("  {}: {}", k, v);
    }
    Ok(response)
}

/// Prepare and send in one go.
pub fn run<C: HttpClient>(client: &C, config: &RequestConfig) -> Result<HttpResponse, Error> {
    let request = prepare(config)?;
    send(client, &request)
}

/// Write `Status: <line>` followed by the body exactly as received.
pub fn report<W: Write>(out: &mut W, response: &HttpResponse) -> std::io::Result<()> {
    writeln!(out, "Status: {}", response.status_line())?;
    out.write_all(&response.body)?;
    writeln!(out)?;
    out.flush()
}
