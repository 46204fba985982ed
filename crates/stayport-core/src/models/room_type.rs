//! Room types and the legacy summary-string codec.
//!
//! The server persists room types as a single delimited string
//! (`豪华大床房 399元/晚 含早；高级双床房 299元/晚`) for backwards
//! compatibility, while newer detail responses return a structured array.
//! `decode_rows`/`parse_summary` accept both shapes; `encode_summary`
//! produces the string form for create/update payloads.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Wire label used for rows submitted without a name.
const FALLBACK_ROOM_NAME: &str = "房型";

/// Full-width row separator used when encoding.
const ROW_SEPARATOR: &str = "；";

/// Default sleeping capacity when a row does not specify one.
pub const DEFAULT_CAPACITY: u32 = 2;

const BREAKFAST_INCLUDED: &str = "含早";
const BREAKFAST_EXCLUDED: &str = "不含早";

fn price_token() -> &'static Regex {
    static PRICE_TOKEN: OnceLock<Regex> = OnceLock::new();
    PRICE_TOKEN.get_or_init(|| Regex::new(r"(\d+)\s*元/晚").expect("valid price pattern"))
}

/// Breakfast flag, persisted as `含早` / `不含早` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakfast {
    #[serde(rename = "含早")]
    Included,
    #[serde(rename = "不含早")]
    Excluded,
}

impl Breakfast {
    pub fn as_wire(self) -> &'static str {
        match self {
            Breakfast::Included => BREAKFAST_INCLUDED,
            Breakfast::Excluded => BREAKFAST_EXCLUDED,
        }
    }
}

/// One room-type row. Order within a hotel is significant and must be
/// preserved end-to-end: uploaded images are matched to rows by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomType {
    /// Server-side row id, present on fetched records; needed for the
    /// corrective per-room image update.
    pub id: Option<JsonValue>,
    pub name: String,
    pub price: Option<f64>,
    pub capacity: u32,
    pub breakfast: Option<Breakfast>,
    pub image: Option<String>,
}

impl Default for RoomType {
    fn default() -> Self {
        RoomType {
            id: None,
            name: String::new(),
            price: None,
            capacity: DEFAULT_CAPACITY,
            breakfast: None,
            image: None,
        }
    }
}

impl RoomType {
    pub fn blank() -> Self {
        RoomType::default()
    }

    /// A row counts as filled when it has a non-empty trimmed name or a
    /// price; only filled rows are encoded.
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty() || self.price.is_some()
    }

    /// Server row id as a string, tolerating numeric and string ids.
    pub fn id_str(&self) -> Option<String> {
        match &self.id {
            Some(JsonValue::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Render a price without a trailing `.0` for whole numbers.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{}", price)
    }
}

/// Encode rows into the legacy summary string. Rows with neither a name nor
/// a price are dropped; unnamed rows get the fallback label.
pub fn encode_summary(rows: &[RoomType]) -> String {
    rows.iter()
        .filter(|r| r.is_filled())
        .map(|r| {
            let name = r.name.trim();
            let mut parts: Vec<String> = Vec::new();
            parts.push(if name.is_empty() {
                FALLBACK_ROOM_NAME.to_string()
            } else {
                name.to_string()
            });
            if let Some(price) = r.price {
                parts.push(format!("{}元/晚", format_price(price)));
            }
            if let Some(breakfast) = r.breakfast {
                parts.push(breakfast.as_wire().to_string());
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}

/// Decode whatever the server returned for room types: a structured array is
/// passed through (capacity defaulted), a string goes through
/// `parse_summary`, anything else becomes a single blank row.
pub fn decode_rows(source: &JsonValue) -> Vec<RoomType> {
    match source {
        JsonValue::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_else(|_| RoomType::blank()))
            .collect(),
        JsonValue::String(s) => parse_summary(s),
        _ => vec![RoomType::blank()],
    }
}

/// Parse the delimited summary string back into rows. Segments split on
/// full- or half-width semicolons; the trailing `<n>元/晚` token is the
/// price, the text before it the name, and the breakfast flag is inferred by
/// substring. Empty or unparsable input yields a single blank row.
pub fn parse_summary(source: &str) -> Vec<RoomType> {
    let parts: Vec<&str> = source
        .split(['；', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        return vec![RoomType::blank()];
    }
    parts.into_iter().map(parse_summary_row).collect()
}

fn parse_summary_row(part: &str) -> RoomType {
    let mut price = None;
    let mut name_source = part;
    // the price token is trailing, so take the last match
    if let Some(caps) = price_token().captures_iter(part).last() {
        price = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
        if let Some(whole) = caps.get(0) {
            let prefix = part[..whole.start()].trim();
            if !prefix.is_empty() {
                name_source = prefix;
            }
        }
    }

    let breakfast = if part.contains(BREAKFAST_EXCLUDED) {
        Some(Breakfast::Excluded)
    } else if part.contains(BREAKFAST_INCLUDED) {
        Some(Breakfast::Included)
    } else {
        None
    };

    let name = name_source
        .trim_end_matches(BREAKFAST_EXCLUDED)
        .trim_end_matches(BREAKFAST_INCLUDED)
        .trim();

    RoomType {
        name: name.to_string(),
        price,
        breakfast,
        ..RoomType::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, price: Option<f64>, breakfast: Option<Breakfast>) -> RoomType {
        RoomType {
            name: name.to_string(),
            price,
            breakfast,
            ..RoomType::default()
        }
    }

    #[test]
    fn encode_basic_row() {
        let rows = vec![row("Deluxe", Some(399.0), Some(Breakfast::Included))];
        assert_eq!(encode_summary(&rows), "Deluxe 399元/晚 含早");
    }

    #[test]
    fn encode_joins_rows_and_drops_empty_ones() {
        let rows = vec![
            row("豪华大床房", Some(399.0), Some(Breakfast::Included)),
            row("", None, None),
            row("高级双床房", Some(299.0), Some(Breakfast::Excluded)),
        ];
        assert_eq!(
            encode_summary(&rows),
            "豪华大床房 399元/晚 含早；高级双床房 299元/晚 不含早"
        );
    }

    #[test]
    fn encode_unnamed_row_with_price_gets_fallback_label() {
        let rows = vec![row("  ", Some(128.0), None)];
        assert_eq!(encode_summary(&rows), "房型 128元/晚");
    }

    #[test]
    fn encode_empty_input() {
        assert_eq!(encode_summary(&[]), "");
        assert_eq!(encode_summary(&[RoomType::blank()]), "");
    }

    #[test]
    fn parse_extracts_price_name_and_breakfast() {
        let rows = parse_summary("豪华大床房 399元/晚 含早；标准间 199 元/晚 不含早");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "豪华大床房");
        assert_eq!(rows[0].price, Some(399.0));
        assert_eq!(rows[0].breakfast, Some(Breakfast::Included));
        assert_eq!(rows[0].capacity, DEFAULT_CAPACITY);
        assert_eq!(rows[1].name, "标准间");
        assert_eq!(rows[1].price, Some(199.0));
        assert_eq!(rows[1].breakfast, Some(Breakfast::Excluded));
    }

    #[test]
    fn parse_segment_without_price() {
        let rows = parse_summary("行政套房");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "行政套房");
        assert_eq!(rows[0].price, None);
        assert_eq!(rows[0].breakfast, None);
    }

    #[test]
    fn parse_empty_or_blank_yields_single_blank_row() {
        for source in ["", "   ", "；；"] {
            let rows = parse_summary(source);
            assert_eq!(rows.len(), 1, "source {:?}", source);
            assert_eq!(rows[0], RoomType::blank());
        }
    }

    #[test]
    fn decode_structured_array_passes_through_with_capacity_default() {
        let source = json!([
            {"id": 7, "name": "Deluxe", "price": 399, "breakfast": "含早", "image": "https://cdn/x.jpg"},
            {"name": "Twin", "price": 299, "capacity": 3}
        ]);
        let rows = decode_rows(&source);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id_str().as_deref(), Some("7"));
        assert_eq!(rows[0].capacity, DEFAULT_CAPACITY);
        assert_eq!(rows[0].image.as_deref(), Some("https://cdn/x.jpg"));
        assert_eq!(rows[1].capacity, 3);
    }

    #[test]
    fn decode_unknown_shape_yields_blank_row() {
        assert_eq!(decode_rows(&json!(null)), vec![RoomType::blank()]);
        assert_eq!(decode_rows(&json!(42)), vec![RoomType::blank()]);
        assert_eq!(decode_rows(&json!([])), vec![RoomType::blank()]);
    }

    #[test]
    fn round_trip_preserves_named_rows() {
        let cases = vec![
            vec![row("Deluxe", Some(399.0), Some(Breakfast::Included))],
            vec![
                row("豪华大床房", Some(399.0), Some(Breakfast::Included)),
                row("高级双床房", None, Some(Breakfast::Excluded)),
                row("亲子房", Some(520.0), None),
            ],
            vec![row("江景特价300元房", Some(450.0), None)],
        ];
        for rows in cases {
            let decoded = parse_summary(&encode_summary(&rows));
            assert_eq!(decoded.len(), rows.len());
            for (orig, back) in rows.iter().zip(decoded.iter()) {
                assert_eq!(back.name, orig.name.trim());
                assert_eq!(back.price, orig.price);
                assert_eq!(back.breakfast, orig.breakfast);
            }
        }
    }
}
