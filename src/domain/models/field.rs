use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "NUMBER")]
    Number,
    /// Single choice among the field's options.
    #[serde(rename = "OPTION")]
    Choice,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Choice => "OPTION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TEXT" => Some(FieldType::Text),
            "NUMBER" => Some(FieldType::Number),
            "OPTION" => Some(FieldType::Choice),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldCategory {
    Name,
    Age,
    Email,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Name => "NAME",
            FieldCategory::Age => "AGE",
            FieldCategory::Email => "EMAIL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NAME" => Some(FieldCategory::Name),
            "AGE" => Some(FieldCategory::Age),
            "EMAIL" => Some(FieldCategory::Email),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FieldOption {
    pub id: String,
    pub field_id: String,
    pub label: String,
    pub value: String,
    pub sequence: i32,
}

impl FieldOption {
    pub fn new(field_id: String, label: String, value: String, sequence: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            field_id,
            label,
            value,
            sequence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String, // TEXT, NUMBER, OPTION
    pub category: Option<String>, // NAME, AGE, EMAIL
    pub visibility: String, // PUBLIC, PRIVATE
    #[serde(skip_serializing)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl Field {
    pub fn new_private(user_id: String, name: String, field_type: FieldType, category: Option<FieldCategory>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            field_type: field_type.as_str().to_string(),
            category: category.map(|c| c.as_str().to_string()),
            visibility: "PRIVATE".to_string(),
            user_id: Some(user_id),
            created_at: Utc::now(),
            options: Vec::new(),
        }
    }

    /// Unknown stored types degrade to TEXT, the only type that is never grouped.
    pub fn kind(&self) -> FieldType {
        FieldType::parse(&self.field_type).unwrap_or(FieldType::Text)
    }

    pub fn category(&self) -> Option<FieldCategory> {
        self.category.as_deref().and_then(FieldCategory::parse)
    }

    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.visibility == "PUBLIC" || self.user_id.as_deref() == Some(user_id)
    }
}

/// Attaches options (already ordered by sequence) to their fields.
pub fn attach_options(fields: &mut [Field], options: Vec<FieldOption>) {
    for option in options {
        if let Some(field) = fields.iter_mut().find(|f| f.id == option.field_id) {
            field.options.push(option);
        }
    }
}
