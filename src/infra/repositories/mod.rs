pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_field_repo;
pub mod sqlite_event_repo;
pub mod sqlite_guest_repo;

pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_field_repo;
pub mod postgres_event_repo;
pub mod postgres_guest_repo;

pub mod memory_draft_repo;
