use chrono::{DateTime, NaiveDate, Utc};
use url::Url;
use crate::domain::models::event::EventInput;
use crate::domain::services::slug::is_slug;
use crate::error::AppError;

/// Turns a form date into a timestamp.
///
/// RFC 3339 values are taken as they are. Anything else is reduced to its
/// `YYYY-MM-DD` part and completed with the current UTC time-of-day.
pub fn fill_date_time(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let only_date = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(only_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(now.time()).and_utc())
}

/// Latest moment a confirmation deadline may be set to: the event's UTC
/// calendar day at the current UTC time-of-day. Only its calendar day is
/// binding.
pub fn confirmation_cutoff(event_date: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    event_date.date_naive().and_time(now.time()).and_utc()
}

pub fn validate_event_input(input: &EventInput, now: DateTime<Utc>) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }
    if input.link.is_empty() {
        return Err(AppError::Validation("Event link is required".into()));
    }
    if !is_slug(&input.link) {
        return Err(AppError::Validation("Event link may only contain lowercase letters, digits and hyphens".into()));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Validation("Event description is required".into()));
    }

    match Url::parse(&input.image_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => return Err(AppError::Validation("Image URL must be a valid http(s) URL".into())),
    }

    if input.fields.is_empty() {
        return Err(AppError::Validation("At least one field is required".into()));
    }
    for (i, field_id) in input.fields.iter().enumerate() {
        if input.fields[..i].contains(field_id) {
            return Err(AppError::Validation(format!("Field '{}' selected more than once", field_id)));
        }
    }

    if let Some(deadline) = input.confirmation_deadline {
        let cutoff = confirmation_cutoff(input.date, now);
        if deadline.date_naive() > cutoff.date_naive() {
            return Err(AppError::Validation("Confirmation deadline cannot be after the event date".into()));
        }
    }

    Ok(())
}
