use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateFieldRequest;
use crate::domain::models::field::{Field, FieldOption, FieldType};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_fields(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let fields = state.field_repo.list_visible(&user.id).await?;
    Ok(Json(fields))
}

pub async fn create_field(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateFieldRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Field name is required".into()));
    }

    match payload.field_type {
        FieldType::Choice if payload.options.is_empty() => {
            return Err(AppError::Validation("OPTION fields need at least one option".into()));
        }
        FieldType::Text | FieldType::Number if !payload.options.is_empty() => {
            return Err(AppError::Validation("Only OPTION fields take options".into()));
        }
        _ => {}
    }

    let field = Field::new_private(user.id.clone(), name, payload.field_type, payload.category);

    let mut options = Vec::with_capacity(payload.options.len());
    for (sequence, option) in payload.options.into_iter().enumerate() {
        let label = option.label.trim().to_string();
        if label.is_empty() {
            return Err(AppError::Validation("Option labels cannot be empty".into()));
        }
        let value = option.value.unwrap_or_else(|| label.clone());
        options.push(FieldOption::new(field.id.clone(), label, value, sequence as i32));
    }

    let created = state.field_repo.create(&field, &options).await?;

    info!("Created field {} ({}) for user {}", created.id, created.field_type, user.id);

    Ok((StatusCode::CREATED, Json(created)))
}
