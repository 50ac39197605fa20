//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the `ProfileRepository` port. Profiles
//! live for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use voice_style_core::{PortError, PortResult, ProfileListItem, ProfileRecord, ProfileRepository};

/// A profile store that keeps every record in a shared map.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    records: RwLock<HashMap<Uuid, ProfileRecord>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn save(&self, record: ProfileRecord) -> PortResult<()> {
        let mut records = self.records.write().await;
        let profile_id = record.profile.id;
        if records.contains_key(&profile_id) {
            return Err(PortError::Unexpected(format!(
                "Profile {} already exists",
                profile_id
            )));
        }
        records.insert(profile_id, record);
        Ok(())
    }

    async fn get(&self, profile_id: Uuid) -> PortResult<ProfileRecord> {
        self.records
            .read()
            .await
            .get(&profile_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Profile {} not found", profile_id)))
    }

    async fn list(&self) -> PortResult<Vec<ProfileListItem>> {
        let records = self.records.read().await;
        let mut items: Vec<ProfileListItem> = records
            .values()
            .map(|record| ProfileListItem::from(&record.profile))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn delete(&self, profile_id: Uuid) -> PortResult<()> {
        self.records
            .write()
            .await
            .remove(&profile_id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(format!("Profile {} not found", profile_id)))
    }
}
