//! Business logic services.
//!
//! Services contain logic separated from HTTP handlers.

pub mod auth_service;
