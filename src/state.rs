use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, DraftRepository, EventRepository, FieldRepository, GuestRepository,
    UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub field_repo: Arc<dyn FieldRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub draft_repo: Arc<dyn DraftRepository>,
    pub auth_service: Arc<AuthService>,
}
