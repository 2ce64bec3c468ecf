//! Shared application state.

use std::sync::Arc;

use crate::services::auth_service::AuthService;
use crate::store::DocumentStore;

/// Handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap: both members are reference-counted and the store is the
/// single connection pool created at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: AuthService) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }
}
