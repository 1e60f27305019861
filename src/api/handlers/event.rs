use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{event::{Event, EventInput, EventWithFields}, user::User};
use crate::domain::services::validation::validate_event_input;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// Validates and persists an event for `owner`. Shared by direct creation
/// and draft submission.
pub(crate) async fn persist_event(state: &AppState, owner: &User, input: &EventInput) -> Result<Event, AppError> {
    validate_event_input(input, Utc::now())?;

    let visible = state.field_repo.list_visible(&owner.id).await?;
    if let Some(unknown) = input.fields.iter().find(|id| !visible.iter().any(|f| &f.id == *id)) {
        return Err(AppError::Validation(format!("Unknown field '{}'", unknown)));
    }

    if state.event_repo.find_by_link(&input.link).await?.is_some() {
        return Err(AppError::Conflict(format!("Link '{}' is already in use", input.link)));
    }

    let event = Event::new(owner.id.clone(), input);
    let created = state.event_repo.create(&event, &input.fields).await?;

    info!("Created event {} ({}) for user {}", created.id, created.link, owner.id);
    Ok(created)
}

/// The event behind `link`, or 404 when it does not belong to `owner_id`.
pub(crate) async fn owned_event_by_link(state: &AppState, owner_id: &str, link: &str) -> Result<Event, AppError> {
    state.event_repo.find_by_link(link).await?
        .filter(|event| event.owner_id == owner_id)
        .ok_or(AppError::NotFound("Event not found".into()))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    let created = persist_event(&state, &user, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_owner(&user.id).await?;
    Ok(Json(events))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&user.id, &event_id).await?;
    info!("Deleted event {}", event_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_public_event(
    State(state): State<Arc<AppState>>,
    Path(link): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_link(&link).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let fields = state.field_repo.list_by_event(&event.id).await?;
    Ok(Json(EventWithFields { event, fields }))
}
