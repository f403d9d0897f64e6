use std::sync::Arc;

use crate::{classifier::ThemePredictor, store::ArticleStore};

/// Shared application state
///
/// Long-lived dependencies constructed once at startup and injected into
/// handlers; no process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub predictor: Arc<ThemePredictor>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>, predictor: ThemePredictor) -> Self {
        Self {
            store,
            predictor: Arc::new(predictor),
        }
    }
}
