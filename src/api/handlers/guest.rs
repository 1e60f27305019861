use axum::{
    extract::{State, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{ConfirmGuestRequest, GroupingQuery},
    responses::{GroupingResponse, GuestConfirmedResponse, GuestListResponse},
};
use crate::api::handlers::event::owned_event_by_link;
use crate::domain::models::{
    event::Event,
    field::{Field, FieldType},
    guest::{Guest, NewGuestValue},
};
use crate::domain::services::{
    export,
    grouping::{group, GroupingResult},
    guest_filter::{filter_guests, GuestFilter},
};
use crate::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn confirm_guest(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfirmGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&payload.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.confirmations_closed(Utc::now()) {
        return Err(AppError::Conflict("Confirmations for this event are closed".into()));
    }

    let fields = state.field_repo.list_by_event(&event.id).await?;

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(payload.fields.len());
    for submitted in payload.fields {
        if !fields.iter().any(|f| f.id == submitted.id) {
            return Err(AppError::Validation(format!("Field '{}' is not part of this event", submitted.id)));
        }
        if !seen.insert(submitted.id.clone()) {
            return Err(AppError::Validation(format!("Field '{}' answered more than once", submitted.id)));
        }
        values.push(NewGuestValue {
            field_id: submitted.id,
            value: submitted.value.into_text(),
        });
    }

    if values.iter().all(|v| v.value.trim().is_empty()) {
        return Err(AppError::Validation("At least one field must be filled in".into()));
    }

    let record = state.guest_repo.create(&Guest::new(event.id.clone()), &values).await?;

    info!("Guest {} confirmed for event {}", record.guest.id, event.link);

    Ok((StatusCode::CREATED, Json(GuestConfirmedResponse {
        guest_id: record.guest.id,
        action: payload.action,
    })))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(link): Path<String>,
    Query(filter): Query<GuestFilter>,
) -> Result<impl IntoResponse, AppError> {
    let event = owned_event_by_link(&state, &user.id, &link).await?;
    let fields = state.field_repo.list_by_event(&event.id).await?;
    let guests = state.guest_repo.list_by_event(&event.id).await?;
    let guests = filter_guests(guests, &fields, &filter);

    Ok(Json(GuestListResponse { event, fields, guests }))
}

pub async fn export_guests(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(link): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = owned_event_by_link(&state, &user.id, &link).await?;
    let fields = state.field_repo.list_by_event(&event.id).await?;
    let guests = state.guest_repo.list_by_event(&event.id).await?;

    let (columns, rows) = export::guest_list_table(&fields, &guests);
    let body = export::encode(&columns, &rows);

    Ok(csv_response(export::guest_list_filename(&event.link), body))
}

pub async fn remove_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_id(&guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    state.event_repo.find_by_id(&guest.event_id).await?
        .filter(|event| event.owner_id == user.id)
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    state.guest_repo.delete(&guest.id).await?;
    info!("Removed guest {} from event {}", guest.id, guest.event_id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn grouping(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(link): Path<String>,
    Query(query): Query<GroupingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (_, result) = grouping_for(&state, &user.id, &link, &query.field_id).await?;
    let total = result.total();

    Ok(Json(GroupingResponse { field_id: query.field_id, result, total }))
}

pub async fn export_grouping(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(link): Path<String>,
    Query(query): Query<GroupingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (event, result) = grouping_for(&state, &user.id, &link, &query.field_id).await?;

    let (columns, rows) = export::grouping_table(&result);
    let body = export::encode(&columns, &rows);

    Ok(csv_response(export::grouping_filename(&event.link, &result.field), body))
}

async fn grouping_for(state: &AppState, owner_id: &str, link: &str, field_id: &str) -> Result<(Event, GroupingResult), AppError> {
    let event = owned_event_by_link(state, owner_id, link).await?;
    let fields = state.field_repo.list_by_event(&event.id).await?;

    let field: &Field = fields.iter()
        .find(|f| f.id == field_id)
        .ok_or_else(|| AppError::Validation(format!("Field '{}' is not part of this event", field_id)))?;

    if field.kind() == FieldType::Text {
        return Err(AppError::Validation("Only NUMBER and OPTION fields can be grouped".into()));
    }

    let guests = state.guest_repo.list_by_event(&event.id).await?;
    let result = GroupingResult {
        field: field.name.clone(),
        values: group(&guests, &field.id, field.kind()),
    };

    Ok((event, result))
}

fn csv_response(filename: String, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
}
