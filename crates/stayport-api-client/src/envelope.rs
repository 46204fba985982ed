//! Response-envelope normalization.
//!
//! The backend wraps responses inconsistently across versions: bare objects,
//! `{data}`, `{data: {data}}`, list arrays under half a dozen keys, and an
//! optional `{code, message}` application envelope. Callers go through these
//! helpers so every shape normalizes to one canonical result.

use serde_json::Value as JsonValue;
use stayport_core::{AppError, Hotel, PageMeta};

/// Application-level failure check: an object with a non-zero numeric
/// `code` is a server-rejected response regardless of HTTP status.
pub fn check_app_code(value: &JsonValue) -> Result<(), AppError> {
    let Some(obj) = value.as_object() else {
        return Ok(());
    };
    if let Some(code) = obj.get("code").and_then(JsonValue::as_i64) {
        if code != 0 {
            return Err(AppError::Server {
                code,
                message: error_message(value).unwrap_or_default(),
            });
        }
    }
    Ok(())
}

/// Server-supplied error text under `message` or the legacy `msg` key.
pub fn error_message(value: &JsonValue) -> Option<String> {
    let obj = value.as_object()?;
    obj.get("message")
        .or_else(|| obj.get("msg"))
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Unwrap a detail response: `{data: {data: hotel}}`, `{data: hotel}`, or
/// the bare object. A result only counts when it has an `id` or `name`;
/// anything else reads as not-found.
pub fn extract_record(value: &JsonValue) -> Option<Hotel> {
    if let Some(data) = value.get("data") {
        let inner = match data.get("data") {
            Some(nested) if nested.is_object() => nested,
            _ => data,
        };
        if inner.is_object() {
            if let Some(hotel) = parse_hotel(inner) {
                return Some(hotel);
            }
        }
    }
    parse_hotel(value)
}

/// Locate a list array: `data.data`, `data` itself, `data.list`,
/// `data.records`, then top-level `list`/`records`; empty when none match.
pub fn extract_list(value: &JsonValue) -> Vec<Hotel> {
    locate_list_array(value)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn locate_list_array(value: &JsonValue) -> Option<&Vec<JsonValue>> {
    if let Some(data) = value.get("data") {
        if let Some(arr) = data.get("data").and_then(JsonValue::as_array) {
            return Some(arr);
        }
        if let Some(arr) = data.as_array() {
            return Some(arr);
        }
        if let Some(arr) = data.get("list").and_then(JsonValue::as_array) {
            return Some(arr);
        }
        if let Some(arr) = data.get("records").and_then(JsonValue::as_array) {
            return Some(arr);
        }
    }
    if let Some(arr) = value.get("list").and_then(JsonValue::as_array) {
        return Some(arr);
    }
    value.get("records").and_then(JsonValue::as_array)
}

/// Pagination metadata from a list response.
pub fn extract_meta(value: &JsonValue) -> PageMeta {
    value
        .get("meta")
        .and_then(|m| serde_json::from_value(m.clone()).ok())
        .unwrap_or_default()
}

/// Created/updated id from a write response: `data.id`, `data.data.id`, or
/// top-level `id`.
pub fn extract_id(value: &JsonValue) -> Option<String> {
    let data = value.get("data").filter(|d| !d.is_null()).unwrap_or(value);
    id_of(data)
        .or_else(|| data.get("data").and_then(id_of))
        .or_else(|| id_of(value))
}

fn id_of(value: &JsonValue) -> Option<String> {
    match value.get("id") {
        Some(JsonValue::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_hotel(value: &JsonValue) -> Option<Hotel> {
    serde_json::from_value::<Hotel>(value.clone())
        .ok()
        .filter(Hotel::is_valid_record)
}
