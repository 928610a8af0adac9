// src/state.rs
use std::sync::Arc;

use crate::view_model::manager::ProductManager;
use crate::view_model::screen::Screen;
use crate::views::ScreenRenderer;

/// Shared application state.
///
/// The server drives a single inventory screen for a single operator: every
/// browser client sees the same search term, modal and pending toasts.
/// Running several operators needs one [`Screen`] per session.
#[derive(Clone)]
pub struct AppState {
    pub screen: Screen,
    pub renderer: Arc<ScreenRenderer>,
}

impl AppState {
    pub fn new(screen: ProductManager, renderer: ScreenRenderer) -> Self {
        Self {
            screen: Screen::new(screen),
            renderer: Arc::new(renderer),
        }
    }
}
