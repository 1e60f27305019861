use crate::domain::models::field::{FieldCategory, FieldType};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateFieldRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub category: Option<FieldCategory>,
    #[serde(default)]
    pub options: Vec<CreateFieldOption>,
}

#[derive(Deserialize)]
pub struct CreateFieldOption {
    pub label: String,
    /// Defaults to the label.
    pub value: Option<String>,
}

/// Guests answer NUMBER fields with JSON numbers and everything else with
/// strings; both are stored as text.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SubmittedValue {
    Text(String),
    Number(serde_json::Number),
}

impl SubmittedValue {
    pub fn into_text(self) -> String {
        match self {
            SubmittedValue::Text(s) => s,
            SubmittedValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SubmittedField {
    pub id: String,
    pub value: SubmittedValue,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmAction {
    Next,
    Finalize,
}

#[derive(Deserialize, Debug)]
pub struct ConfirmGuestRequest {
    pub event_id: String,
    pub fields: Vec<SubmittedField>,
    pub action: ConfirmAction,
}

#[derive(Deserialize)]
pub struct GroupingQuery {
    pub field_id: String,
}
