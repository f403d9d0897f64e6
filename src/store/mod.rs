pub mod firestore;

pub use firestore::FirestoreStore;

use crate::{
    error::AppResult,
    models::{Article, UserHistoryEntry},
};

/// Read-only access to the remote `articles` and `userHistory` collections
///
/// The store owns the data; this system never writes it. The trait is the
/// seam between handlers and the concrete Firestore client, so tests can
/// substitute a mock.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Enumerates the full `articles` collection in its natural order
    async fn fetch_articles(&self) -> AppResult<Vec<Article>>;

    /// History entries for one user, equality-filtered on `userId`
    async fn fetch_user_history(&self, user_id: &str) -> AppResult<Vec<UserHistoryEntry>>;

    /// Every record in the `userHistory` collection
    async fn fetch_all_history(&self) -> AppResult<Vec<UserHistoryEntry>>;
}
