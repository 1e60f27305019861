use crate::domain::models::{
    user::User, auth::RefreshTokenRecord, event::Event, field::{Field, FieldOption},
    guest::{Guest, GuestRecord, NewGuestValue}, draft::{DraftAction, StoredDraft},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait FieldRepository: Send + Sync {
    /// Creates the field and its options in one transaction.
    async fn create(&self, field: &Field, options: &[FieldOption]) -> Result<Field, AppError>;
    /// PUBLIC fields plus the user's PRIVATE ones, options attached.
    async fn list_visible(&self, user_id: &str) -> Result<Vec<Field>, AppError>;
    /// The event's fields in form order, options attached.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Field>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts the event and its ordered field selection in one transaction.
    async fn create(&self, event: &Event, field_ids: &[String]) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn find_by_link(&self, link: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Event>, AppError>;
    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest, values: &[NewGuestValue]) -> Result<GuestRecord, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    /// Newest first. Guests confirmed at the same instant keep reverse insertion order.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<GuestRecord>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait DraftRepository: Send + Sync {
    async fn create(&self, draft: &StoredDraft) -> Result<StoredDraft, AppError>;
    async fn find(&self, user_id: &str, id: &str) -> Result<Option<StoredDraft>, AppError>;
    /// Applies the action under the store's lock, so concurrent edits of one
    /// draft never interleave.
    async fn apply(&self, user_id: &str, id: &str, action: DraftAction, now: DateTime<Utc>) -> Result<Option<StoredDraft>, AppError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError>;
    async fn delete_stale(&self, untouched_since: DateTime<Utc>) -> Result<u64, AppError>;
}
