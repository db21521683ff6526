use std::sync::Arc;

use crate::db::SurveyStore;

/// Shared by every request handler.
pub struct AppState {
    pub store: SurveyStore,
    pub strict: bool,
}

impl AppState {
    pub fn new(store: SurveyStore, strict: bool) -> Arc<Self> {
        Arc::new(Self { store, strict })
    }
}
