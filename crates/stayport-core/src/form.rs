//! Form snapshot and draft types.
//!
//! `HotelForm` is the superset of everything the merchant fills in,
//! including fields that never reach the submit payload directly
//! (`hotspots` is draft-only; `traffic` and `promotions` merge into
//! `highlights`). Image slots hold `Attachment` values so hosted URLs and
//! still-local files travel through the same shape.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::room_type::{Breakfast, RoomType, DEFAULT_CAPACITY};

/// One attachment in an image slot: an already-hosted URL passes through
/// resolution untouched, a local path is uploaded first. Recognition is by
/// `http(s)://` prefix so blob/preview pseudo-URLs never leak into payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attachment {
    Hosted(String),
    Local(PathBuf),
}

impl Attachment {
    pub fn hosted_url(&self) -> Option<&str> {
        match self {
            Attachment::Hosted(url) => Some(url),
            Attachment::Local(_) => None,
        }
    }
}

impl From<String> for Attachment {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Attachment::Hosted(value)
        } else {
            Attachment::Local(PathBuf::from(value))
        }
    }
}

impl From<Attachment> for String {
    fn from(value: Attachment) -> Self {
        match value {
            Attachment::Hosted(url) => url,
            Attachment::Local(path) => path.display().to_string(),
        }
    }
}

/// One editable room row. Row order is the contract that ties uploaded
/// images back to rooms, so rows must never be reordered independently of
/// their images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomRow {
    pub name: String,
    pub price: Option<f64>,
    pub capacity: u32,
    pub breakfast: Option<Breakfast>,
    pub image: Option<Attachment>,
}

impl Default for RoomRow {
    fn default() -> Self {
        RoomRow {
            name: String::new(),
            price: None,
            capacity: DEFAULT_CAPACITY,
            breakfast: None,
            image: None,
        }
    }
}

impl RoomRow {
    /// Strip the attachment down to the codec's row shape.
    pub fn to_room_type(&self) -> RoomType {
        RoomType {
            id: None,
            name: self.name.clone(),
            price: self.price,
            capacity: self.capacity,
            breakfast: self.breakfast,
            image: self.image.as_ref().and_then(|a| a.hosted_url().map(String::from)),
        }
    }

    /// Back-fill a row from a fetched record; server images come back as
    /// hosted attachments.
    pub fn from_room_type(room: &RoomType) -> Self {
        RoomRow {
            name: room.name.clone(),
            price: room.price,
            capacity: room.capacity,
            breakfast: room.breakfast,
            image: room
                .image
                .clone()
                .filter(|u| !u.is_empty())
                .map(Attachment::Hosted),
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty() || self.price.is_some()
    }
}

/// In-progress form values for one hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelForm {
    #[validate(length(min = 1, message = "Hotel name is required"))]
    pub name: String,
    pub name_en: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub star: Option<u8>,
    pub opened_at: Option<NaiveDate>,
    pub base_price: Option<f64>,
    pub room_types: Vec<RoomRow>,
    /// Free text, comma separated.
    pub facilities: String,
    /// Tag names or codes, comma separated.
    pub tags: String,
    /// Draft-only field, not part of the submit payload.
    pub hotspots: String,
    pub traffic: String,
    pub promotions: String,
    pub cover: Option<Attachment>,
    pub gallery: Vec<Attachment>,
}

impl HotelForm {
    /// Fresh form with the single initial blank room row.
    pub fn new() -> Self {
        HotelForm {
            room_types: vec![RoomRow::default()],
            star: Some(5),
            ..HotelForm::default()
        }
    }
}

/// The single locally cached draft: form values plus a save timestamp.
///
/// `updated_at` stays a raw string so a mangled stamp cannot take the whole
/// draft down with it; an unparsable stamp reads as "not expired".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(flatten)]
    pub form: HotelForm,
    pub updated_at: Option<String>,
}

impl Draft {
    pub fn new(form: HotelForm, now: DateTime<Utc>) -> Self {
        Draft {
            form,
            updated_at: Some(now.to_rfc3339()),
        }
    }

    /// Whether the draft is older than `max_age`. Fail-open: a missing or
    /// unparsable timestamp never expires a draft.
    pub fn is_expired(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        match self
            .updated_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
            Some(saved) => now.signed_duration_since(saved.with_timezone(&Utc)) > max_age,
            None => false,
        }
    }
}

/// Split free-text facility/tag input on half- or full-width commas.
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split([',', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Join names back into the comma-separated form representation.
pub fn join_comma_list(names: &[String]) -> String {
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn attachment_classifies_by_url_prefix() {
        assert_eq!(
            Attachment::from("https://x/a.jpg".to_string()),
            Attachment::Hosted("https://x/a.jpg".to_string())
        );
        assert_eq!(
            Attachment::from("http://x/a.jpg".to_string()),
            Attachment::Hosted("http://x/a.jpg".to_string())
        );
        assert_eq!(
            Attachment::from("./photos/a.jpg".to_string()),
            Attachment::Local(PathBuf::from("./photos/a.jpg"))
        );
        // blob preview pseudo-URLs must not count as hosted
        assert_eq!(
            Attachment::from("blob:http://localhost/123".to_string()).hosted_url(),
            None
        );
    }

    #[test]
    fn comma_list_handles_both_comma_widths() {
        assert_eq!(
            parse_comma_list("免费WiFi, 停车场，健身房 , "),
            vec!["免费WiFi", "停车场", "健身房"]
        );
        assert!(parse_comma_list("  ").is_empty());
    }

    #[test]
    fn draft_expiry_is_fail_open() {
        let now = Utc::now();
        let fresh = Draft::new(HotelForm::new(), now);
        assert!(!fresh.is_expired(now + Duration::days(6), Duration::days(7)));
        assert!(fresh.is_expired(
            now + Duration::days(7) + Duration::seconds(1),
            Duration::days(7)
        ));

        let unparsable = Draft {
            form: HotelForm::new(),
            updated_at: Some("not-a-date".to_string()),
        };
        assert!(!unparsable.is_expired(now + Duration::days(365), Duration::days(7)));

        let missing = Draft {
            form: HotelForm::new(),
            updated_at: None,
        };
        assert!(!missing.is_expired(now + Duration::days(365), Duration::days(7)));
    }

    #[test]
    fn draft_round_trips_with_date_rehydration() {
        let mut form = HotelForm::new();
        form.name = "禧酒店".to_string();
        form.opened_at = Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.cover = Some(Attachment::Hosted("https://x/cover.jpg".to_string()));
        let draft = Draft::new(form.clone(), Utc::now());

        let raw = serde_json::to_string(&draft).unwrap();
        let back: Draft = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.form, form);
        assert_eq!(
            back.form.opened_at,
            Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
    }
}
