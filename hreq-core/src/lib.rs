//! Core of `hreq`: turns a [`config::RequestConfig`] into one HTTP request,
//! hands it to an [`client::HttpClient`] and formats the response.

pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod runner;

pub use error::{Error, TransportErrorKind};
