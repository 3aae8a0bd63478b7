//! The HTTP collaborator the Agile module talks through.
//!
//! Everything above this module only ever sees [`HttpClient`]; swapping in a
//! fake (as the tests do) or a different HTTP stack needs no other change.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use http::ReqwestClient;

/// Raw response handed back by an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GET {url} returned {status}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Performs GET requests against paths relative to the tracker's site root.
///
/// Implementations return `Err` for non-success responses; callers never
/// inspect the status themselves.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, relative_url: &str) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn get(&self, relative_url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(relative_url).await
    }
}
