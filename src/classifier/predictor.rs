use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;

use crate::models::Theme;

use super::ThemeClassifier;

/// Default number of distinct titles the prediction cache retains
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Memoizing wrapper around the theme classifier
///
/// The cache is keyed by the raw title as received, not the normalized
/// form: two raw titles that normalize identically are classified
/// independently. This matches the upstream behavior; it only affects the
/// hit rate, never the result. Entries live until evicted as least
/// recently used; the classifier is deterministic within a process, so
/// there is no invalidation.
pub struct ThemePredictor {
    classifier: ThemeClassifier,
    cache: Mutex<LruCache<String, Theme>>,
}

impl ThemePredictor {
    pub fn new(classifier: ThemeClassifier) -> Self {
        Self::with_capacity(classifier, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(classifier: ThemeClassifier, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            classifier,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Predicted theme for a raw title, consulting the cache first
    ///
    /// The lock is held across classification so concurrent requests for
    /// the same title classify once.
    pub async fn get_theme(&self, title: &str) -> Theme {
        let mut cache = self.cache.lock().await;
        if let Some(&theme) = cache.get(title) {
            tracing::debug!(title = %title, theme = %theme, "Prediction cache hit");
            return theme;
        }

        let theme = self.classifier.predict(title);
        cache.put(title.to_string(), theme);
        tracing::debug!(title = %title, theme = %theme, "Prediction cache miss");
        theme
    }

    /// Number of predictions currently cached
    pub async fn cached_predictions(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Whether a raw title is cached, without touching recency
    pub async fn is_cached(&self, title: &str) -> bool {
        self.cache.lock().await.peek(title).is_some()
    }
}
