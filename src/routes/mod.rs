pub mod products;

use axum::{response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::product::SCREEN_PATH;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(products::routes())
        .route("/", get(|| async { Redirect::to(SCREEN_PATH) }))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
