//! Outbound create/update payload.

use serde::{Deserialize, Serialize};

/// Payload for `POST /hotels` and `PUT /hotels/{id}`.
///
/// Optional fields serialize only when set. On update, `name_en` and `city`
/// are set to `Some("")` when blank so the server clears any previously
/// persisted value; on create they are omitted instead. `images` carries an
/// explicit empty list when neither a cover nor carousel images resolved,
/// which tells the server to drop stale banner photos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    /// Encoded room-type summary string; always present on submission so
    /// the server persists an empty value rather than keeping a stale one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Index-aligned with the submitted room rows; `null` entries mean "do
    /// not touch this row's image".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_images: Option<Vec<Option<String>>>,
    /// Stamped on every submission so an image-only edit still registers as
    /// a change server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted() {
        let payload = HotelPayload {
            name: Some("禧酒店".to_string()),
            room_types: Some("Deluxe 399元/晚 含早".to_string()),
            ..HotelPayload::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["name"], "禧酒店");
        assert_eq!(obj["roomTypes"], "Deluxe 399元/晚 含早");
        assert!(!obj.contains_key("coverImage"));
        assert!(!obj.contains_key("carouselImages"));
    }

    #[test]
    fn explicit_empty_values_survive() {
        let payload = HotelPayload {
            name_en: Some(String::new()),
            city: Some(String::new()),
            images: Some(vec![]),
            ..HotelPayload::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["nameEn"], "");
        assert_eq!(value["city"], "");
        assert_eq!(value["images"], serde_json::json!([]));
    }

    #[test]
    fn room_image_nulls_serialize_as_null() {
        let payload = HotelPayload {
            room_type_images: Some(vec![Some("https://x/r.jpg".to_string()), None]),
            ..HotelPayload::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value["roomTypeImages"],
            serde_json::json!(["https://x/r.jpg", null])
        );
    }
}
