//! HTTP surface of the garden journal: router, handlers, forms and views.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod views;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

/// Request-handler context, built once at startup and cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_plants))
        .route("/about", get(handlers::about))
        .route(
            "/create",
            get(handlers::create_form).post(handlers::create_plant),
        )
        .route("/plant/{plant_id}", get(handlers::plant_detail))
        .route("/harvest/{plant_id}", post(handlers::record_harvest))
        .route(
            "/edit/{plant_id}",
            get(handlers::edit_form).post(handlers::update_plant),
        )
        .route("/delete/{plant_id}", post(handlers::delete_plant))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
