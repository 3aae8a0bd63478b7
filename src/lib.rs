//! Client for the issue tracker's Agile REST resources.
//!
//! [`AgileClient`] builds the board, sprint and project URLs, talks to the
//! server through an injected [`HttpClient`], and decodes the responses into
//! the types in [`model`]. Board issue listings are resolved to full issues
//! with a follow-up search request (see [`agile::resolve`]).

pub mod agile;
pub mod cli;
pub mod config;
pub mod deserialize;
pub mod error;
pub mod model;
pub mod query;
pub mod transport;

pub use agile::{AgileClient, ApiPaths};
pub use error::{AgileError, DeserializationError, Result};
pub use query::PageOptions;
pub use transport::{HttpClient, HttpResponse, ReqwestClient, TransportError};
