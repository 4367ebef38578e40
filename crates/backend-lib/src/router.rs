// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::handlers::{auth, payments};
use crate::middleware;
use crate::store::Store;
use crate::AppState;

/// Create the application router.
///
/// `/auth` sits behind the throttle; `/payments` sits behind the bearer
/// middleware. CORS admits only the configured frontend origin.
pub fn create_router<S: Store + 'static>(state: Arc<AppState<S>>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register::<S>))
        .route("/login", post(auth::login::<S>))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::throttle::throttle::<S>,
        ));

    let payment_routes = Router::new()
        .route("/", get(payments::list::<S>).post(payments::create::<S>))
        .route("/{id}/verify", post(payments::verify::<S>))
        .route("/{id}/submit", post(payments::submit::<S>))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth::<S>,
        ));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/payments", payment_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.settings))
        .with_state(state)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match settings.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            // no valid origin means no cross-origin access at all
            tracing::warn!(origin = %settings.cors_origin, "unparseable cors_origin");
            layer
        },
    }
}
