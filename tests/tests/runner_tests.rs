use std::io::Write;
use std::path::PathBuf;

use hreq_core::config::{BodySource, RequestConfig};
use hreq_core::runner::{report, run};
use hreq_core::{Error, TransportErrorKind};
use tests::{FailingClient, MockClient};

#[test]
fn test_post_inline_body_end_to_end() {
    let client = MockClient::new(201, "Created", r#"{"ok":true}"#);
    let mut config = RequestConfig::new("https://localhost:5001/api/restaurants");
    config.method = "POST".to_string();
    config.auth_token = "jwt-token".to_string();
    config.body = BodySource::Inline(br#"{"ok":true}"#.to_vec());

    let response = run(&client, &config).expect("run failed");

    let sent = client.last_request();
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.url, "https://localhost:5001/api/restaurants");
    assert_eq!(sent.header("Authorization"), Some("Bearer jwt-token"));
    assert_eq!(sent.header("Content-Type"), Some("application/json"));

    let mut out = Vec::new();
    report(&mut out, &response).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Status: 201 Created\n{\"ok\":true}\n"
    );
}

#[test]
fn test_no_body_means_no_content_type_for_every_method() {
    for method in ["GET", "DELETE", "HEAD", "OPTIONS", "PUT", "PROPFIND"] {
        let client = MockClient::ok();
        let mut config = RequestConfig::new("http://localhost:8080/items/1");
        config.method = method.to_string();
        run(&client, &config).unwrap();

        let sent = client.last_request();
        assert_eq!(sent.method, method);
        assert_eq!(sent.header("Content-Type"), None, "{}", method);
        assert_eq!(sent.body, None);
    }
}

#[test]
fn test_bearer_header_exactly_once() {
    for token in ["a", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "with space"] {
        let client = MockClient::ok();
        let mut config = RequestConfig::new("http://localhost/me");
        config.auth_token = token.to_string();
        run(&client, &config).unwrap();

        let sent = client.last_request();
        let auth: Vec<_> = sent
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, format!("Bearer {}", token));
    }
}

#[test]
fn test_inline_body_beats_data_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "from file").unwrap();

    let client = MockClient::ok();
    let mut config = RequestConfig::new("http://localhost/items");
    config.method = "POST".to_string();
    config.body = BodySource::from_flags("from flag", Some(file.path().to_path_buf()));
    run(&client, &config).unwrap();

    assert_eq!(client.last_request().body.as_deref(), Some(&b"from flag"[..]));
}

#[test]
fn test_data_file_body() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"name\":\"Pizza Place\"}}\n").unwrap();

    let client = MockClient::ok();
    let mut config = RequestConfig::new("http://localhost/items");
    config.method = "PUT".to_string();
    config.body = BodySource::from_flags("", Some(file.path().to_path_buf()));
    run(&client, &config).unwrap();

    let sent = client.last_request();
    assert_eq!(
        sent.body.as_deref(),
        Some(&b"{\"name\":\"Pizza Place\"}\n"[..])
    );
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
}

#[test]
fn test_missing_data_file_fails_before_network() {
    let client = MockClient::ok();
    let mut config = RequestConfig::new("http://localhost/items");
    config.body = BodySource::File(PathBuf::from("/no/such/dir/body.json"));

    let err = run(&client, &config).unwrap_err();
    assert!(matches!(err, Error::ReadDataFile { .. }));
    assert!(err.to_string().contains("read data-file"));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_empty_url_is_usage_error_regardless_of_flags() {
    let client = MockClient::ok();
    let mut config = RequestConfig::new("");
    config.method = "POST".to_string();
    config.auth_token = "t".to_string();
    config.body = BodySource::File(PathBuf::from("/no/such/dir/body.json"));

    let err = run(&client, &config).unwrap_err();
    assert!(matches!(err, Error::Usage));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_invalid_method_is_not_sent() {
    let client = MockClient::ok();
    let mut config = RequestConfig::new("http://localhost");
    config.method = "BAD METHOD".to_string();

    let err = run(&client, &config).unwrap_err();
    assert!(matches!(err, Error::Construct(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_transport_errors_propagate() {
    let client = FailingClient(|| Error::transport(TransportErrorKind::Timeout, "deadline exceeded"));
    let config = RequestConfig::new("http://10.255.255.1/slow");

    let err = run(&client, &config).unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "request failed: timeout: deadline exceeded");
}

#[test]
fn test_custom_content_type() {
    let client = MockClient::ok();
    let mut config = RequestConfig::new("http://localhost/upload");
    config.method = "POST".to_string();
    config.content_type = "text/plain; charset=utf-8".to_string();
    config.body = BodySource::Inline(b"hello".to_vec());
    run(&client, &config).unwrap();

    assert_eq!(
        client.last_request().header("Content-Type"),
        Some("text/plain; charset=utf-8")
    );
}
