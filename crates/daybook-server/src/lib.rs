//! Daybook Server — axum HTTP surface for the Daybook API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the application router.
///
/// Auth endpoints are public; everything under `/api/calendar` sits
/// behind the bearer-token middleware.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .route("/logout", post(routes::auth::logout));

    let calendar_routes = Router::new()
        .route(
            "/events",
            get(routes::calendar::list_events).post(routes::calendar::create_event),
        )
        .route(
            "/events/{id}",
            put(routes::calendar::update_event).delete(routes::calendar::delete_event),
        )
        .route("/templates", get(routes::calendar::list_templates))
        .route("/event-types", get(routes::calendar::list_event_types))
        .layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth_routes)
        .nest("/api/calendar", calendar_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Daybook Life Management API" }))
}
