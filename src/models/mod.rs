//! Request, response, and credential types.
//!
//! Stored documents themselves are untyped ([`crate::store::Document`]); the
//! types here only cover what the server reads out of a request.

/// Credential claims and login payloads
pub mod auth;
/// Order query and status-update payloads
pub mod order;
/// Service listing query parameters
pub mod service;
