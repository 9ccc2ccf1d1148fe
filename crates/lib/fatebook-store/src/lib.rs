//! Wire models and API route constants for fatebook-mcp.
//!
//! This crate defines the shapes exchanged with the Fatebook API, shared by
//! the HTTP client, the control plane, and the MCP renderers.

pub mod models;
pub mod schema;

pub use models::*;
