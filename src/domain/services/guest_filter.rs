use serde::Deserialize;
use crate::domain::models::{field::{Field, FieldCategory}, guest::GuestRecord};

/// Guest list filters keyed by field category. Blank values are inactive.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct GuestFilter {
    pub name: Option<String>,
    pub age: Option<String>,
    pub email: Option<String>,
}

enum Match {
    Contains,
    Exact,
}

impl GuestFilter {
    fn criteria(&self) -> Vec<(FieldCategory, &str, Match)> {
        [
            (FieldCategory::Name, self.name.as_deref(), Match::Contains),
            (FieldCategory::Age, self.age.as_deref(), Match::Exact),
            (FieldCategory::Email, self.email.as_deref(), Match::Contains),
        ]
            .into_iter()
            .filter_map(|(category, needle, mode)| {
                needle.map(str::trim).filter(|n| !n.is_empty()).map(|n| (category, n, mode))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    pub fn matches(&self, guest: &GuestRecord, fields: &[Field]) -> bool {
        self.criteria().iter().all(|(category, needle, mode)| {
            let value = fields.iter()
                .find(|f| f.category() == Some(*category))
                .and_then(|f| guest.value_of(&f.id));

            match (value, mode) {
                (Some(value), Match::Contains) => value.to_lowercase().contains(&needle.to_lowercase()),
                (Some(value), Match::Exact) => value.trim() == *needle,
                (None, _) => false,
            }
        })
    }
}

pub fn filter_guests(guests: Vec<GuestRecord>, fields: &[Field], filter: &GuestFilter) -> Vec<GuestRecord> {
    if filter.is_empty() {
        return guests;
    }
    guests.into_iter().filter(|g| filter.matches(g, fields)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::models::guest::{Guest, GuestValue};

    fn field(id: &str, category: Option<&str>) -> Field {
        Field {
            id: id.into(),
            name: id.into(),
            field_type: "TEXT".into(),
            category: category.map(String::from),
            visibility: "PUBLIC".into(),
            user_id: None,
            created_at: Utc::now(),
            options: vec![],
        }
    }

    fn guest(values: &[(&str, &str)]) -> GuestRecord {
        let guest = Guest::new("e1".into());
        let values = values.iter().map(|(field_id, value)| GuestValue {
            guest_id: guest.id.clone(),
            field_id: field_id.to_string(),
            field_name: field_id.to_string(),
            field_type: "TEXT".into(),
            value: value.to_string(),
        }).collect();
        GuestRecord { guest, values }
    }

    fn fields() -> Vec<Field> {
        vec![field("nome", Some("NAME")), field("idade", Some("AGE")), field("email", Some("EMAIL"))]
    }

    #[test]
    fn test_empty_filter_keeps_everyone() {
        let guests = vec![guest(&[("nome", "Ana")]), guest(&[])];
        let filter = GuestFilter { name: Some("  ".into()), ..Default::default() };
        assert!(filter.is_empty());
        assert_eq!(filter_guests(guests, &fields(), &filter).len(), 2);
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let guests = vec![guest(&[("nome", "Ana Maria")]), guest(&[("nome", "Bruno")])];
        let filter = GuestFilter { name: Some("maria".into()), ..Default::default() };
        let kept = filter_guests(guests, &fields(), &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value_of("nome"), Some("Ana Maria"));
    }

    #[test]
    fn test_age_is_exact() {
        let guests = vec![guest(&[("idade", "3")]), guest(&[("idade", "30")])];
        let filter = GuestFilter { age: Some("3".into()), ..Default::default() };
        let kept = filter_guests(guests, &fields(), &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value_of("idade"), Some("3"));
    }

    #[test]
    fn test_filters_combine_and_missing_values_fail() {
        let guests = vec![
            guest(&[("nome", "Ana"), ("email", "ana@example.com")]),
            guest(&[("nome", "Ana")]),
            guest(&[("nome", "Bia"), ("email", "bia@example.com")]),
        ];
        let filter = GuestFilter { name: Some("ana".into()), email: Some("EXAMPLE".into()), ..Default::default() };
        assert_eq!(filter_guests(guests, &fields(), &filter).len(), 1);
    }

    #[test]
    fn test_filter_on_category_absent_from_event() {
        let guests = vec![guest(&[("nome", "Ana")])];
        let filter = GuestFilter { age: Some("30".into()), ..Default::default() };
        assert!(filter_guests(guests, &[field("nome", Some("NAME"))], &filter).is_empty());
    }
}
