//! Car Doctor server library.
//!
//! REST backend over two document collections, `services` and `orders`,
//! with a cookie-carried JWT guarding the orders listing. The binary in
//! `main.rs` wires configuration, storage, and the router together; tests
//! drive [`routes::build_router`] directly against an in-memory store.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
