//! Application state shared by the HTTP handlers.

use crate::engine::SheetHandlerFactory;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Builds per-sheet selection engines over the configured stores
    pub factory: SheetHandlerFactory,
}

impl AppState {
    pub fn new(factory: SheetHandlerFactory) -> Self {
        Self { factory }
    }
}
