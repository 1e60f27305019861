use crate::domain::{
    models::draft::{DraftAction, StoredDraft},
    ports::DraftRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Drafts are scratch state and never outlive the process.
#[derive(Default)]
pub struct InMemoryDraftRepo {
    drafts: RwLock<HashMap<String, StoredDraft>>,
}

impl InMemoryDraftRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepo {
    async fn create(&self, draft: &StoredDraft) -> Result<StoredDraft, AppError> {
        let mut drafts = self.drafts.write().await;
        if drafts.contains_key(&draft.id) {
            return Err(AppError::Conflict("Draft already exists".into()));
        }
        drafts.insert(draft.id.clone(), draft.clone());
        Ok(draft.clone())
    }

    async fn find(&self, user_id: &str, id: &str) -> Result<Option<StoredDraft>, AppError> {
        let drafts = self.drafts.read().await;
        Ok(drafts.get(id).filter(|d| d.user_id == user_id).cloned())
    }

    async fn apply(&self, user_id: &str, id: &str, action: DraftAction, now: DateTime<Utc>) -> Result<Option<StoredDraft>, AppError> {
        let mut drafts = self.drafts.write().await;
        let Some(stored) = drafts.get_mut(id).filter(|d| d.user_id == user_id) else {
            return Ok(None);
        };

        stored.draft.apply(action, now);
        stored.updated_at = now;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let mut drafts = self.drafts.write().await;
        match drafts.get(id) {
            Some(d) if d.user_id == user_id => {
                drafts.remove(id);
                Ok(())
            }
            _ => Err(AppError::NotFound("Draft not found".into())),
        }
    }

    async fn delete_stale(&self, untouched_since: DateTime<Utc>) -> Result<u64, AppError> {
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| d.updated_at >= untouched_since);
        Ok((before - drafts.len()) as u64)
    }
}
