use crate::api::dtos::requests::ConfirmAction;
use crate::domain::models::{event::Event, field::Field, guest::GuestRecord};
use crate::domain::services::grouping::GroupingResult;
use serde::Serialize;

#[derive(Serialize)]
pub struct GuestListResponse {
    pub event: Event,
    pub fields: Vec<Field>,
    pub guests: Vec<GuestRecord>,
}

#[derive(Serialize)]
pub struct GroupingResponse {
    pub field_id: String,
    #[serde(flatten)]
    pub result: GroupingResult,
    /// `null` when a NUMBER value failed to parse.
    pub total: f64,
}

#[derive(Serialize)]
pub struct GuestConfirmedResponse {
    pub guest_id: String,
    pub action: ConfirmAction,
}
