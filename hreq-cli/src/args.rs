//! Command-line flags. The flags are Go-style (`-url`, `-data-file`), so
//! argv is normalized into clap's `--long` form before parsing.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use hreq_core::config::{BodySource, RequestConfig, TransportOptions};
use hreq_core::duration::parse_duration;

/// hreq: send one HTTP request and print the status and body
#[derive(Parser, Debug)]
#[command(name = "hreq", version, about = "Send one HTTP request and print the response")]
pub struct Cli {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE). Standard verbs are sent upper-case
    #[arg(short = 'X', default_value = "GET")]
    pub method: String,

    /// Request URL (required)
    #[arg(long, default_value = "")]
    pub url: String,

    /// Bearer token
    #[arg(long, default_value = "")]
    pub auth: String,

    /// Inline request body, e.g. '{"name":"foo"}'
    #[arg(short = 'd', default_value = "", allow_hyphen_values = true)]
    pub data: String,

    /// Path to a file to use as the request body
    #[arg(long = "data-file")]
    pub data_file: Option<String>,

    /// Content-Type header for requests with a body
    #[arg(long = "H-Content-Type", default_value = "application/json")]
    pub content_type: String,

    /// Allow insecure TLS (self-signed certificates, development only)
    #[arg(short = 'k')]
    pub insecure: bool,

    /// Request timeout, e.g. 10s, 500ms, 1m (0 disables it)
    #[arg(short = 't', default_value = "10s", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Parse the process arguments, accepting Go-style single-dash flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn to_config(&self) -> RequestConfig {
        RequestConfig {
            method: self.method.clone(),
            url: self.url.clone(),
            auth_token: self.auth.clone(),
            body: BodySource::from_flags(&self.data, self.data_file.as_deref().map(PathBuf::from)),
            content_type: self.content_type.clone(),
            transport: TransportOptions::new(self.timeout, self.insecure),
        }
    }
}

const LONG_FLAGS: &[&str] = &[
    "url",
    "auth",
    "data-file",
    "H-Content-Type",
    "verbose",
    "help",
    "version",
];

const VALUE_FLAGS: &[&str] = &["X", "url", "auth", "d", "data-file", "H-Content-Type", "t"];

/// Rewrite Go-style arguments into the form clap expects:
/// `-url x` becomes `--url x` and `-k=true`/`-k=false` become `-k`/nothing.
/// The value of a value-taking flag is left alone, as is everything after `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut iter = args.into_iter().map(Into::into);

    // program name
    if let Some(first) = iter.next() {
        out.push(first);
    }

    let mut expect_value = false;
    let mut passthrough = false;
    for arg in iter {
        if passthrough || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };

        if s == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let (name, has_value) = match s.strip_prefix("--").or_else(|| s.strip_prefix('-')) {
            Some(rest) if !rest.is_empty() => match rest.split_once('=') {
                Some((name, _)) => (name, true),
                None => (rest, false),
            },
            _ => {
                out.push(arg);
                continue;
            }
        };

        if name == "k" && has_value {
            match s.split_once('=').map(|(_, v)| v) {
                Some("true") | Some("1") => out.push(OsString::from("-k")),
                Some("false") | Some("0") => {}
                _ => out.push(arg),
            }
            continue;
        }

        expect_value = VALUE_FLAGS.contains(&name) && !has_value;

        if LONG_FLAGS.contains(&name) && !s.starts_with("--") {
            out.push(OsString::from(format!("-{}", s)));
        } else {
            out.push(arg);
        }
    }

    out
}
