use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::product::{
    delete_product, discard, open_add, open_edit, reload, save, show_screen, SCREEN_PATH,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(SCREEN_PATH, get(show_screen))
        .route("/productsManager/new", get(open_add))
        .route("/productsManager/edit/{barcode}", get(open_edit))
        .route("/productsManager/save", post(save))
        .route("/productsManager/discard", post(discard))
        .route("/productsManager/delete/{barcode}", post(delete_product))
        .route("/productsManager/reload", post(reload))
}
