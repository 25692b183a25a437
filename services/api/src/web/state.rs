//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use lecture_tracker_core::ports::{LectureStore, SummaryProvider};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store is a handle, not a cache: each request reloads the document through it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LectureStore>,
    pub summary_provider: Arc<dyn SummaryProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn LectureStore>, summary_provider: Arc<dyn SummaryProvider>) -> Self {
        Self {
            store,
            summary_provider,
        }
    }
}
