//! Hotel wire records and list pagination metadata.
//!
//! Backend responses vary across versions: ids arrive as numbers or strings,
//! `city` as a plain string or a `{name}` object (with `cityName` beside it),
//! room types as a structured array or a legacy summary string, and
//! timestamps under several spellings, sometimes nested under `extra`. The
//! looser fields stay `serde_json::Value` and the accessors below normalize
//! them to one canonical shape.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::room_type::{self, RoomType};
use super::status::ReviewStatus;
use crate::constants::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub id: Option<JsonValue>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub address: Option<String>,
    pub city: Option<JsonValue>,
    pub city_name: Option<String>,
    pub star: Option<u8>,
    pub star_level: Option<u8>,
    pub opened_at: Option<String>,
    pub base_price: Option<f64>,
    pub min_price: Option<f64>,
    pub room_types: Option<JsonValue>,
    pub room_types_summary: Option<String>,
    pub cover_image: Option<String>,
    pub carousel_images: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub facilities: Option<Vec<JsonValue>>,
    pub tags: Option<Vec<JsonValue>>,
    pub highlights: Option<JsonValue>,
    pub status: Option<JsonValue>,
    #[serde(alias = "reject_reason", alias = "reject_reason_display")]
    pub reject_reason: Option<String>,
    #[serde(alias = "updated_at")]
    pub updated_at: Option<JsonValue>,
    #[serde(alias = "reviewed_at")]
    pub reviewed_at: Option<JsonValue>,
    #[serde(alias = "created_at")]
    pub created_at: Option<JsonValue>,
    pub extra: Option<JsonValue>,
}

impl Hotel {
    /// A response object counts as a hotel record iff it carries an id or a
    /// name; anything else is treated as not-found.
    pub fn is_valid_record(&self) -> bool {
        self.id.is_some() || self.name.is_some()
    }

    /// Hotel id as a string, tolerating numeric ids.
    pub fn id_str(&self) -> Option<String> {
        match &self.id {
            Some(JsonValue::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Canonical review status for this record.
    pub fn status(&self) -> ReviewStatus {
        ReviewStatus::normalize(self.status.as_ref())
    }

    /// City for display: `cityName` wins, then a `{name}` object, then the
    /// plain string.
    pub fn city_display(&self) -> Option<String> {
        if let Some(name) = &self.city_name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        match &self.city {
            Some(JsonValue::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Some(JsonValue::Object(obj)) => obj
                .get("name")
                .and_then(JsonValue::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    pub fn star_or_level(&self) -> Option<u8> {
        self.star.or(self.star_level)
    }

    /// Cover URL: explicit `coverImage`, else the first legacy `images`
    /// entry.
    pub fn cover_url(&self) -> Option<String> {
        if let Some(cover) = &self.cover_image {
            if !cover.is_empty() {
                return Some(cover.clone());
            }
        }
        self.images
            .as_ref()
            .and_then(|imgs| imgs.first())
            .filter(|u| !u.is_empty())
            .cloned()
    }

    /// Carousel URLs: explicit `carouselImages`, else the legacy `images`
    /// tail; the cover URL never appears in the result.
    pub fn carousel_urls(&self) -> Vec<String> {
        let cover = self.cover_url();
        let source: Vec<String> = match &self.carousel_images {
            Some(urls) if !urls.is_empty() => urls.clone(),
            _ => self
                .images
                .as_ref()
                .map(|imgs| imgs.iter().skip(1).cloned().collect())
                .unwrap_or_default(),
        };
        source
            .into_iter()
            .filter(|u| !u.is_empty() && Some(u) != cover.as_ref())
            .collect()
    }

    /// All image URLs for display, deduplicated in order: `images`, else
    /// `carouselImages`, else the cover alone.
    pub fn all_image_urls(&self) -> Vec<String> {
        let source: Vec<String> = if let Some(imgs) = self.images.as_ref().filter(|v| !v.is_empty())
        {
            imgs.clone()
        } else if let Some(imgs) = self.carousel_images.as_ref().filter(|v| !v.is_empty()) {
            imgs.clone()
        } else {
            self.cover_url().into_iter().collect()
        };
        let mut seen = std::collections::HashSet::new();
        source
            .into_iter()
            .filter(|u| !u.is_empty() && seen.insert(u.clone()))
            .collect()
    }

    /// Room rows, preferring the structured array (it carries ids and
    /// images) and falling back to the legacy summary string.
    pub fn room_type_rows(&self) -> Vec<RoomType> {
        if let Some(value) = &self.room_types {
            match value {
                JsonValue::Array(items) if !items.is_empty() => {
                    return room_type::decode_rows(value);
                }
                JsonValue::String(s) if !s.trim().is_empty() => {
                    return room_type::parse_summary(s);
                }
                _ => {}
            }
        }
        match self.room_types_summary.as_deref() {
            Some(s) => room_type::parse_summary(s),
            None => vec![RoomType::blank()],
        }
    }

    /// Reject reason, checking the flat field and the `extra` nesting.
    pub fn reject_reason(&self) -> Option<String> {
        if let Some(reason) = &self.reject_reason {
            let trimmed = reason.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        self.extra_str(&["rejectReason", "reject_reason"])
    }

    /// Most recent update time for list display, formatted `YYYY-MM-DD`.
    /// Checks `updatedAt`, `reviewedAt`, their `extra` nestings, then
    /// `createdAt`.
    pub fn updated_at_display(&self) -> Option<String> {
        self.updated_at
            .as_ref()
            .and_then(format_wire_date)
            .or_else(|| self.reviewed_at.as_ref().and_then(format_wire_date))
            .or_else(|| {
                self.extra_value(&["updatedAt", "reviewedAt"])
                    .as_ref()
                    .and_then(format_wire_date)
            })
            .or_else(|| self.created_at.as_ref().and_then(format_wire_date))
    }

    /// List price: `minPrice` with `basePrice` fallback.
    pub fn display_min_price(&self) -> Option<f64> {
        self.min_price.or(self.base_price)
    }

    /// Facility names; entries may be strings or `{name, code}` objects.
    pub fn facility_names(&self) -> Vec<String> {
        labeled_names(self.facilities.as_deref())
    }

    /// Tag names; entries may be strings or `{name, code}` objects.
    pub fn tag_names(&self) -> Vec<String> {
        labeled_names(self.tags.as_deref())
    }

    fn extra_str(&self, keys: &[&str]) -> Option<String> {
        self.extra_value(keys).and_then(|v| match v {
            JsonValue::String(s) => {
                let trimmed = s.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        })
    }

    fn extra_value(&self, keys: &[&str]) -> Option<JsonValue> {
        let extra = self.extra.as_ref()?.as_object()?;
        keys.iter()
            .find_map(|k| extra.get(*k))
            .filter(|v| !v.is_null())
            .cloned()
    }
}

fn labeled_names(entries: Option<&[JsonValue]>) -> Vec<String> {
    entries
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match entry {
            JsonValue::String(s) => Some(s.trim().to_string()),
            JsonValue::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("code"))
                .and_then(JsonValue::as_str)
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render the assorted timestamp shapes seen on the wire (`2024-05-01T...`,
/// `2024/05/01`, epoch seconds or milliseconds) as `YYYY-MM-DD`. Strings
/// that cannot be interpreted as a date are returned as-is rather than
/// dropped.
fn format_wire_date(raw: &JsonValue) -> Option<String> {
    match raw {
        JsonValue::String(s) if !s.is_empty() => {
            if starts_with_iso_date(s) {
                return Some(s[..10].to_string());
            }
            if starts_with_slash_date(s) {
                return Some(s[..10].replace('/', "-"));
            }
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(n) = s.parse::<i64>() {
                    return epoch_to_date(n);
                }
            }
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.date_naive().format("%Y-%m-%d").to_string());
            }
            Some(s.clone())
        }
        JsonValue::Number(n) => n.as_i64().and_then(epoch_to_date),
        _ => None,
    }
}

fn starts_with_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

fn starts_with_slash_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'/'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'/'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Values below 1e12 read as epoch seconds, larger ones as milliseconds.
fn epoch_to_date(n: i64) -> Option<String> {
    let parsed = if n < 1_000_000_000_000 {
        Utc.timestamp_opt(n, 0).single()
    } else {
        Utc.timestamp_millis_opt(n).single()
    };
    parsed.map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        PageMeta {
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
