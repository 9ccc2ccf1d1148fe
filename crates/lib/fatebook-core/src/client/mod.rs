//! HTTP client for the Fatebook API.
//!
//! The client layer handles authentication, routing, status checks, and
//! decoding of API payloads into the shared wire models.

pub mod http;
pub mod query;

pub use http::{ApiKey, ClientConfig, ClientError, ClientResult, FatebookClient};
pub use query::QuestionQuery;
