//! Database layer (Firestore).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::UserRecord;

/// Collection names as constants.
pub mod collections {
    /// Per-user recommendations and preferences (keyed by user id)
    pub const USERS: &str = "users";
}

/// Document store holding one [`UserRecord`] per user id.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the user's document, if any.
    async fn get_user_record(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Merge-write the recommendation fields of the user's document.
    ///
    /// Only `recommendations`, `preferences` and `lastUpdated` are written;
    /// any other fields already on the document are left untouched. A store
    /// with its own clock may replace `record.last_updated` with its write time.
    async fn merge_user_record(&self, user_id: &str, record: &UserRecord)
        -> Result<(), AppError>;
}
