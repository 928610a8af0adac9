// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::error::{AppError, FormError};
use crate::state::AppState;
use crate::view_model::manager::ProductManager;
use crate::view_model::product_form::{FormValues, SubmitOutcome};

pub const SCREEN_PATH: &str = "/productsManager";

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

fn render(state: &AppState, screen: &mut ProductManager) -> Result<Html<String>, AppError> {
    let snapshot = screen.snapshot();
    Ok(Html(state.renderer.render(&snapshot)?))
}

fn back_to_screen() -> Response {
    Redirect::to(SCREEN_PATH).into_response()
}

// GET /productsManager - Render the inventory screen
#[instrument(skip(state))]
pub async fn show_screen(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    state.screen.activate().await;
    let mut screen = state.screen.lock().await;
    if let Some(term) = query.q {
        screen.search(term);
    }
    render(&state, &mut screen)
}

// GET /productsManager/new - Open the modal in Add mode
#[instrument(skip(state))]
pub async fn open_add(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.screen.activate().await;
    let mut screen = state.screen.lock().await;
    screen.open_add();
    render(&state, &mut screen)
}

// GET /productsManager/edit/{barcode} - Open the modal on an existing product
#[instrument(skip(state))]
pub async fn open_edit(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Html<String>, AppError> {
    state.screen.activate().await;
    let mut screen = state.screen.lock().await;
    screen
        .open_edit(&barcode)
        .ok_or_else(|| AppError::not_found(format!("Product {barcode} not found")))?;
    render(&state, &mut screen)
}

// POST /productsManager/save - Submit the modal
#[instrument(skip(state, values))]
pub async fn save(
    State(state): State<AppState>,
    Form(values): Form<FormValues>,
) -> Result<Response, AppError> {
    let status = match state.screen.save(values).await {
        Ok(SubmitOutcome::Saved) => return Ok(back_to_screen()),
        Ok(SubmitOutcome::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Ok(SubmitOutcome::Failed) => StatusCode::OK,
        Err(e @ (FormError::NotOpen | FormError::Busy)) => {
            warn!(error = %e, "Save ignored");
            return Ok(back_to_screen());
        }
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let mut screen = state.screen.lock().await;
    Ok((status, render(&state, &mut screen)?).into_response())
}

// POST /productsManager/discard - Close the modal
pub async fn discard(State(state): State<AppState>) -> Response {
    state.screen.lock().await.close_modal();
    back_to_screen()
}

// POST /productsManager/delete/{barcode} - Delete a product
#[instrument(skip(state))]
pub async fn delete_product(State(state): State<AppState>, Path(barcode): Path<String>) -> Response {
    state.screen.delete(&barcode).await;
    back_to_screen()
}

// POST /productsManager/reload - Fetch the list again
pub async fn reload(State(state): State<AppState>) -> Response {
    state.screen.reload().await;
    back_to_screen()
}
