use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

/// One logged coffee-drink visit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: String,
    pub drink_name: String,
    pub location_name: String,
    pub sweetness: Option<i64>,
    pub rating: Option<i64>,
    pub price: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub date: Option<String>,
    pub added_by: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
}

/// Request body for creating or updating an entry. Numeric fields accept
/// numbers or numeric strings; empty strings and nulls become absent.
#[derive(Debug, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub drink_name: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub sweetness: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl EntryInput {
    /// Trimmed required fields, or `None` when either is empty.
    pub fn required_names(&self) -> Option<(String, String)> {
        let drink_name = self.drink_name.trim();
        let location_name = self.location_name.trim();
        if drink_name.is_empty() || location_name.is_empty() {
            return None;
        }
        Some((drink_name.to_string(), location_name.to_string()))
    }

    /// Coordinates only when both halves are present; a lone lat or lng
    /// is dropped rather than stored half-populated.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Calendar date normalized to an RFC 3339 UTC timestamp. Accepts
    /// `YYYY-MM-DD` (date pickers) or a full RFC 3339 string; anything
    /// else is treated as absent.
    pub fn normalized_date(&self) -> Option<String> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc).to_rfc3339());
        }
        let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        Some(day.and_hms_opt(0, 0, 0)?.and_utc().to_rfc3339())
    }

    pub fn trimmed_added_by(&self) -> Option<String> {
        trim_to_none(self.added_by.as_deref())
    }

    pub fn trimmed_notes(&self) -> Option<String> {
        trim_to_none(self.notes.as_deref())
    }
}

fn trim_to_none(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> EntryInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn required_names_trims_whitespace() {
        let i = input(r#"{"drink_name": "  Latte ", "location_name": "Cafe X"}"#);
        assert_eq!(
            i.required_names(),
            Some(("Latte".to_string(), "Cafe X".to_string()))
        );
    }

    #[test]
    fn required_names_rejects_blank_fields() {
        assert!(input(r#"{"drink_name": "", "location_name": "Cafe X"}"#)
            .required_names()
            .is_none());
        assert!(input(r#"{"drink_name": "Latte", "location_name": "   "}"#)
            .required_names()
            .is_none());
        assert!(input("{}").required_names().is_none());
    }

    #[test]
    fn lone_coordinate_is_dropped() {
        let i = input(r#"{"drink_name": "Latte", "location_name": "X", "lat": 41.5}"#);
        assert_eq!(i.coordinates(), None);

        let i = input(r#"{"drink_name": "Latte", "location_name": "X", "lat": 41.5, "lng": -81.6}"#);
        assert_eq!(i.coordinates(), Some((41.5, -81.6)));
    }

    #[test]
    fn date_normalizes_to_rfc3339() {
        let i = input(r#"{"date": "2024-06-01"}"#);
        assert_eq!(i.normalized_date().unwrap(), "2024-06-01T00:00:00+00:00");

        let i = input(r#"{"date": "2024-06-01T12:30:00-04:00"}"#);
        assert_eq!(i.normalized_date().unwrap(), "2024-06-01T16:30:00+00:00");

        let i = input(r#"{"date": "yesterday"}"#);
        assert_eq!(i.normalized_date(), None);

        let i = input(r#"{"date": ""}"#);
        assert_eq!(i.normalized_date(), None);
    }

    #[test]
    fn optional_text_trims_to_absent() {
        let i = input(r#"{"added_by": "  ", "notes": " oat milk "}"#);
        assert_eq!(i.trimmed_added_by(), None);
        assert_eq!(i.trimmed_notes(), Some("oat milk".to_string()));
    }
}
