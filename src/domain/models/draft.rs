use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

pub const DEFAULT_EVENT_NAME: &str = "Nome do evento";
pub const DEFAULT_EVENT_DESCRIPTION: &str = "descrição do evento";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DraftData {
    pub name: String,
    pub link: String,
    pub description: String,
    pub image_url: String,
    /// Empty, `YYYY-MM-DD` or RFC 3339.
    pub date: String,
    pub confirmation_deadline: String,
    pub fields: Vec<String>,
}

/// An event being edited before it is created.
///
/// While `link_synced` is set, `data.link` follows `data.name`. Writing the
/// link directly switches to manual mode and freezes it until the sync is
/// toggled back on. `is_valid` is derived and recomputed on every change.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub data: DraftData,
    pub link_synced: bool,
    pub is_valid: bool,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            data: DraftData {
                name: DEFAULT_EVENT_NAME.to_string(),
                link: String::new(),
                description: DEFAULT_EVENT_DESCRIPTION.to_string(),
                image_url: String::new(),
                date: String::new(),
                confirmation_deadline: String::new(),
                fields: Vec::new(),
            },
            link_synced: true,
            is_valid: false,
        }
    }
}

/// One field assignment, e.g. `{"name": "link", "value": "festa-junina"}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum DraftField {
    Name(String),
    Link(String),
    Description(String),
    ImageUrl(String),
    Date(String),
    ConfirmationDeadline(String),
    Fields(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    Set(DraftField),
    ToggleSyncLink,
    Reset,
}

#[derive(Debug, Serialize, Clone)]
pub struct StoredDraft {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    #[serde(flatten)]
    pub draft: EventDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDraft {
    pub fn new(user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            draft: EventDraft::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
