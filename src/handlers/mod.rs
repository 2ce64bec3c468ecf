//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, query string)
//! 2. Builds a storage filter or update and calls the document store
//! 3. Returns the store's result as JSON, unmodified

/// Credential login/logout endpoints
pub mod auth;
/// Liveness and health endpoints
pub mod health;
/// Order endpoints
pub mod orders;
/// Service catalogue endpoints
pub mod services;
