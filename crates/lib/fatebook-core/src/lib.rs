//! Core types and services for fatebook-mcp.
//!
//! This crate owns the HTTP client for the Fatebook API and exposes
//! control-plane helpers that validate input before any request is sent.

pub mod client;
pub mod control;
pub mod matcher;
