use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(event_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            created_at: Utc::now(),
        }
    }
}

/// A submitted value joined with the field it answers.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct GuestValue {
    pub guest_id: String,
    pub field_id: String,
    pub field_name: String,
    pub field_type: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct NewGuestValue {
    pub field_id: String,
    pub value: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct GuestRecord {
    #[serde(flatten)]
    pub guest: Guest,
    pub values: Vec<GuestValue>,
}

impl GuestRecord {
    pub fn value_of(&self, field_id: &str) -> Option<&str> {
        self.values.iter()
            .find(|v| v.field_id == field_id)
            .map(|v| v.value.as_str())
    }
}

/// Groups joined value rows under their guests, keeping the guests' order.
pub fn assemble_records(guests: Vec<Guest>, values: Vec<GuestValue>) -> Vec<GuestRecord> {
    let mut records: Vec<GuestRecord> = guests.into_iter()
        .map(|guest| GuestRecord { guest, values: Vec::new() })
        .collect();

    for value in values {
        if let Some(record) = records.iter_mut().find(|r| r.guest.id == value.guest_id) {
            record.values.push(value);
        }
    }
    records
}
