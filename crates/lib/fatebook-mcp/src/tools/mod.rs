//! MCP tool modules.
//!
//! Tools are grouped by domain: prediction listing and forecasting, and
//! contextual help for the assistant.

pub mod predictions;
mod context;
