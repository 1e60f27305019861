use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::field::Field;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub link: String,
    pub description: String,
    pub image_url: String,
    pub date: DateTime<Utc>,
    pub confirmation_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(owner_id: String, input: &EventInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name: input.name.trim().to_string(),
            link: input.link.clone(),
            description: input.description.trim().to_string(),
            image_url: input.image_url.clone(),
            date: input.date,
            confirmation_deadline: input.confirmation_deadline,
            created_at: Utc::now(),
        }
    }

    pub fn confirmations_closed(&self, now: DateTime<Utc>) -> bool {
        self.confirmation_deadline.is_some_and(|deadline| now > deadline)
    }
}

/// Payload that becomes an [`Event`]: sent directly to the create endpoint
/// or derived from a submitted draft.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventInput {
    pub name: String,
    pub link: String,
    pub description: String,
    pub image_url: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub confirmation_deadline: Option<DateTime<Utc>>,
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct EventWithFields {
    #[serde(flatten)]
    pub event: Event,
    pub fields: Vec<Field>,
}
