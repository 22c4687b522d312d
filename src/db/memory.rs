//! In-process document store.
//!
//! Same contract as [`FirestoreDb`](super::FirestoreDb); used by tests.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::UserRecord;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's document wholesale (bypasses merge semantics).
    pub async fn insert(&self, user_id: &str, record: UserRecord) {
        self.users.write().await.insert(user_id.to_string(), record);
    }

    /// Number of merge writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn get_user_record(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn merge_user_record(
        &self,
        user_id: &str,
        record: &UserRecord,
    ) -> Result<(), AppError> {
        // Every field of UserRecord is in the merge mask, so merging is a field-wise overwrite.
        let mut users = self.users.write().await;
        let doc = users.entry(user_id.to_string()).or_default();
        doc.recommendations = record.recommendations.clone();
        doc.preferences = record.preferences.clone();
        doc.last_updated = record.last_updated.clone();
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
