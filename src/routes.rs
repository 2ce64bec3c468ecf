//! Router assembly.

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware, state::AppState};

/// CORS for the single front-end origin, with credentials so the browser
/// sends the `token` cookie.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Only reading orders needs a credential
    let authenticated_routes = Router::new()
        .route("/orders", get(handlers::orders::list_orders))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::verify_credential,
        ));

    Router::new()
        // Liveness
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Credential routes
        .route("/jwt", post(handlers::auth::issue_credential))
        .route("/logout", post(handlers::auth::clear_credential))
        // Service routes
        .route("/services", get(handlers::services::list_services))
        .route("/services/{id}", get(handlers::services::get_service))
        // Order routes
        .route("/orders", post(handlers::orders::create_order))
        .route(
            "/orders/{id}",
            delete(handlers::orders::delete_order)
                .patch(handlers::orders::update_order_status),
        )
        .merge(authenticated_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
