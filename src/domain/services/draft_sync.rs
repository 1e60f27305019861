use chrono::{DateTime, Utc};
use crate::domain::models::draft::{DraftAction, DraftField, EventDraft};
use crate::domain::models::event::EventInput;
use crate::domain::services::{slug::slugify, validation::{fill_date_time, validate_event_input}};
use crate::error::AppError;

impl EventDraft {
    /// Applies one action. Never fails: an unusable draft is reported
    /// through `is_valid`.
    pub fn apply(&mut self, action: DraftAction, now: DateTime<Utc>) {
        match action {
            DraftAction::Set(field) => self.set_field(field, now),
            DraftAction::ToggleSyncLink => self.toggle_sync_link(now),
            DraftAction::Reset => self.reset(),
        }
    }

    pub fn set_field(&mut self, field: DraftField, now: DateTime<Utc>) {
        match field {
            DraftField::Name(name) => {
                if self.link_synced {
                    self.data.link = slugify(&name);
                }
                self.data.name = name;
            }
            DraftField::Link(link) => {
                if link != self.data.link {
                    self.data.link = slugify(&link).trim_end_matches('-').to_string();
                    self.link_synced = false;
                }
            }
            DraftField::Description(description) => self.data.description = description,
            DraftField::ImageUrl(image_url) => self.data.image_url = image_url,
            DraftField::Date(date) => self.data.date = date,
            DraftField::ConfirmationDeadline(deadline) => self.data.confirmation_deadline = deadline,
            DraftField::Fields(fields) => {
                let mut unique: Vec<String> = Vec::with_capacity(fields.len());
                for id in fields {
                    if !unique.contains(&id) {
                        unique.push(id);
                    }
                }
                self.data.fields = unique;
            }
        }

        self.revalidate(now);
    }

    /// Entering sync re-derives the link from the name; leaving it keeps the
    /// current link as the manual value.
    pub fn toggle_sync_link(&mut self, now: DateTime<Utc>) {
        self.link_synced = !self.link_synced;
        if self.link_synced {
            self.data.link = slugify(&self.data.name);
        }
        self.revalidate(now);
    }

    pub fn reset(&mut self) {
        *self = EventDraft::default();
    }

    pub fn to_event_input(&self, now: DateTime<Utc>) -> Result<EventInput, AppError> {
        let date = fill_date_time(&self.data.date, now)
            .ok_or_else(|| AppError::Validation("Event date is required".into()))?;

        let confirmation_deadline = if self.data.confirmation_deadline.trim().is_empty() {
            None
        } else {
            Some(fill_date_time(&self.data.confirmation_deadline, now)
                .ok_or_else(|| AppError::Validation("Invalid confirmation deadline".into()))?)
        };

        Ok(EventInput {
            name: self.data.name.clone(),
            link: self.data.link.clone(),
            description: self.data.description.clone(),
            image_url: self.data.image_url.clone(),
            date,
            confirmation_deadline,
            fields: self.data.fields.clone(),
        })
    }

    fn revalidate(&mut self, now: DateTime<Utc>) {
        self.is_valid = self.to_event_input(now)
            .and_then(|input| validate_event_input(&input, now))
            .is_ok();
    }
}
