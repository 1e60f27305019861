use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::handlers::event::persist_event;
use crate::domain::models::{
    draft::{DraftAction, DraftField, StoredDraft},
    user::User,
};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info};

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let created = state.draft_repo.create(&StoredDraft::new(user.id.clone())).await?;
    info!("Opened draft {} for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let draft = state.draft_repo.find(&user.id, &draft_id).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;
    Ok(Json(draft))
}

pub async fn delete_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.draft_repo.delete(&user.id, &draft_id).await?;
    info!("Discarded draft {}", draft_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_draft_field(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
    Json(field): Json<DraftField>,
) -> Result<impl IntoResponse, AppError> {
    apply(&state, &user, &draft_id, DraftAction::Set(field)).await
}

pub async fn toggle_sync_link(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    apply(&state, &user, &draft_id, DraftAction::ToggleSyncLink).await
}

pub async fn reset_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    apply(&state, &user, &draft_id, DraftAction::Reset).await
}

/// Persists the draft as an event and discards it. The draft survives a
/// failed submission.
pub async fn submit_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(draft_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stored = state.draft_repo.find(&user.id, &draft_id).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;

    let input = stored.draft.to_event_input(Utc::now())?;
    let created = persist_event(&state, &user, &input).await?;

    state.draft_repo.delete(&user.id, &draft_id).await?;
    info!("Draft {} submitted as event {}", draft_id, created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

async fn apply(state: &AppState, user: &User, draft_id: &str, action: DraftAction) -> Result<Json<StoredDraft>, AppError> {
    debug!("Applying {:?} to draft {}", action, draft_id);
    let updated = state.draft_repo.apply(&user.id, draft_id, action, Utc::now()).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;
    Ok(Json(updated))
}
