use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all store endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(handler::login))
        .route("/set", post(handler::set_objects).put(handler::set_objects))
        .route(
            "/get",
            get(handler::get_objects_from_params).post(handler::get_objects),
        )
        .route(
            "/delete",
            post(handler::delete_objects).delete(handler::delete_objects),
        )
        .route(
            "/query",
            get(handler::run_query_from_params).post(handler::run_query),
        )
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
