//! Submission pipeline.
//!
//! One submission attempt walks `Idle -> Uploading -> BuildingPayload ->
//! Submitting -> Success | Failed`. Images resolve before anything is
//! written so an upload failure never leaves a half-written record. The
//! update path re-opens review, re-fetches the canonical record, reconciles
//! it into the form, and issues corrective per-room image updates for rows
//! the main call did not persist. The multi-step update is deliberately
//! best-effort rather than transactional: a failure partway leaves a valid
//! record, just possibly missing the corrective image patch.

use chrono::{DateTime, SecondsFormat, Utc};

use stayport_api_client::ApiClient;
use stayport_core::form::{join_comma_list, parse_comma_list};
use stayport_core::models::room_type;
use stayport_core::validation::validate_submission;
use stayport_core::{AppError, Attachment, Hotel, HotelForm, HotelPayload, RoomRow, RoomType};

use crate::draft::DraftStore;
use crate::uploader::{resolve_images, ResolvedImages};

/// Phase of the current submission attempt. A failure after uploads start
/// always lands in `Failed`; no stale `Uploading` state survives an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Uploading,
    BuildingPayload,
    Submitting,
    Success,
    Failed,
}

/// Result of a successful submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// New hotel created; the draft is cleared and review starts pending.
    Created { id: Option<String> },
    /// Existing hotel updated and re-opened for review. `form` is the local
    /// state reconciled against the fresh server record.
    Updated {
        id: String,
        form: HotelForm,
        hotel: Option<Hotel>,
    },
}

pub struct SubmissionPipeline {
    client: ApiClient,
    drafts: DraftStore,
    phase: SubmissionPhase,
}

impl SubmissionPipeline {
    pub fn new(client: ApiClient, drafts: DraftStore) -> Self {
        SubmissionPipeline {
            client,
            drafts,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Submit the form: create when `hotel_id` is `None`, update otherwise.
    /// Validation runs before any network call.
    pub async fn submit(
        &mut self,
        form: &HotelForm,
        hotel_id: Option<&str>,
    ) -> Result<SubmissionOutcome, AppError> {
        self.phase = SubmissionPhase::Idle;
        validate_submission(form)?;

        let result = self.run(form, hotel_id).await;
        self.phase = match &result {
            Ok(_) => SubmissionPhase::Success,
            Err(_) => SubmissionPhase::Failed,
        };
        result
    }

    async fn run(
        &mut self,
        form: &HotelForm,
        hotel_id: Option<&str>,
    ) -> Result<SubmissionOutcome, AppError> {
        self.phase = SubmissionPhase::Uploading;
        tracing::info!("resolving form images");
        let resolved = resolve_images(form, &self.client).await?;

        self.phase = SubmissionPhase::BuildingPayload;
        let payload = build_payload(form, &resolved, hotel_id.is_some(), Utc::now());

        self.phase = SubmissionPhase::Submitting;
        match hotel_id {
            None => {
                let id = self.client.create_hotel(&payload).await?;
                self.drafts.clear().await;
                tracing::info!(id = id.as_deref().unwrap_or("?"), "hotel created, pending review");
                Ok(SubmissionOutcome::Created { id })
            }
            Some(id) => {
                self.client.update_hotel(id, &payload).await?;
                // editing always re-opens review, even for image-only changes
                self.client.set_hotel_status(id, "pending").await?;

                let mut hotel = self.client.fetch_hotel(id).await?;
                if let Some(server) = &hotel {
                    if patch_room_images(&self.client, id, server, &resolved.room_images).await? {
                        hotel = self.client.fetch_hotel(id).await?;
                    }
                }

                let merged = match &hotel {
                    Some(server) => reconcile(form, server, &resolved),
                    None => form.clone(),
                };
                tracing::info!(id, "hotel updated and re-submitted for review");
                Ok(SubmissionOutcome::Updated {
                    id: id.to_string(),
                    form: merged,
                    hotel,
                })
            }
        }
    }
}

/// Assemble the outbound payload from form values and resolved image URLs.
///
/// Text fields are trimmed. Empty optionals are omitted on create; on update
/// `nameEn` and `city` are sent even when empty so the server clears prior
/// values. The carousel never repeats the cover, and an explicit empty
/// `images` list is sent when no banner image resolved at all. Every payload
/// carries a fresh `submittedAt` so image-only edits still register as
/// changes.
pub fn build_payload(
    form: &HotelForm,
    images: &ResolvedImages,
    is_update: bool,
    now: DateTime<Utc>,
) -> HotelPayload {
    let name = form.name.trim();
    let name_en = form.name_en.trim();
    let address = form.address.trim();
    let city = form.city.trim();

    let room_rows: Vec<RoomType> = form.room_types.iter().map(RoomRow::to_room_type).collect();
    let room_types = room_type::encode_summary(&room_rows);

    let highlights = [form.traffic.trim(), form.promotions.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let facilities = parse_comma_list(&form.facilities);
    let tags = parse_comma_list(&form.tags);

    let mut payload = HotelPayload {
        name: (!name.is_empty()).then(|| name.to_string()),
        name_en: if is_update {
            Some(name_en.to_string())
        } else {
            (!name_en.is_empty()).then(|| name_en.to_string())
        },
        address: (!address.is_empty()).then(|| address.to_string()),
        city: if is_update {
            Some(city.to_string())
        } else {
            (!city.is_empty()).then(|| city.to_string())
        },
        star: form.star,
        opened_at: form.opened_at.map(|d| d.format("%Y-%m-%d").to_string()),
        base_price: form.base_price,
        room_types: Some(room_types),
        highlights: (!highlights.is_empty()).then_some(highlights),
        facilities: (!facilities.is_empty()).then_some(facilities),
        tags: (!tags.is_empty()).then_some(tags),
        submitted_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ..HotelPayload::default()
    };

    if let Some(cover) = images.cover.as_ref().filter(|u| !u.is_empty()) {
        payload.cover_image = Some(cover.clone());
    }
    let carousel: Vec<String> = images
        .gallery
        .iter()
        .filter(|url| !url.is_empty() && Some(*url) != images.cover.as_ref())
        .cloned()
        .collect();
    if !carousel.is_empty() {
        payload.carousel_images = Some(carousel);
    }
    if payload.cover_image.is_none() && payload.carousel_images.is_none() {
        payload.images = Some(Vec::new());
    }
    if !images.room_images.is_empty() {
        payload.room_type_images = Some(images.room_images.clone());
    }

    payload
}

/// Merge the fresh server record into the just-submitted local form. Server
/// fields win when present and non-empty; otherwise the local value stays,
/// so an in-flight edit the server does not yet reflect is never erased.
pub fn reconcile(local: &HotelForm, server: &Hotel, images: &ResolvedImages) -> HotelForm {
    let mut merged = local.clone();

    if let Some(name) = trimmed(server.name.as_deref()) {
        merged.name = name;
    }
    if let Some(name_en) = trimmed(server.name_en.as_deref()) {
        merged.name_en = name_en;
    }
    if let Some(address) = trimmed(server.address.as_deref()) {
        merged.address = address;
    }
    if let Some(city) = server.city_display() {
        merged.city = city;
    }
    if let Some(star) = server.star_or_level() {
        merged.star = Some(star);
    }
    if let Some(opened) = server.opened_at.as_deref() {
        if let Ok(date) = opened.get(..10).unwrap_or(opened).parse() {
            merged.opened_at = Some(date);
        }
    }
    if let Some(price) = server.base_price {
        merged.base_price = Some(price);
    }

    // room rows: the server wins once it carries content, else keep local;
    // row images prefer this submission's resolved URLs (index-aligned)
    let server_rows = server.room_type_rows();
    let base_rows: Vec<RoomRow> = if server_rows.iter().any(RoomType::is_filled) {
        server_rows.iter().map(RoomRow::from_room_type).collect()
    } else {
        local.room_types.clone()
    };
    merged.room_types = base_rows
        .into_iter()
        .enumerate()
        .map(|(index, mut row)| {
            if let Some(Some(url)) = images.room_images.get(index) {
                row.image = Some(Attachment::Hosted(url.clone()));
            }
            row
        })
        .collect();

    let facilities = server.facility_names();
    if !facilities.is_empty() {
        merged.facilities = join_comma_list(&facilities);
    }
    let tags = server.tag_names();
    if !tags.is_empty() {
        merged.tags = join_comma_list(&tags);
    }

    merged.cover = server
        .cover_url()
        .or_else(|| images.cover.clone())
        .map(Attachment::Hosted);
    let carousel = server.carousel_urls();
    merged.gallery = if carousel.is_empty() {
        images.gallery.iter().cloned().map(Attachment::Hosted).collect()
    } else {
        carousel.into_iter().map(Attachment::Hosted).collect()
    };

    merged
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Issue one corrective image PATCH per server room row that matches a
/// resolved upload. Rows parsed from the legacy summary string carry no ids
/// and cannot be patched. Returns whether any PATCH went out.
async fn patch_room_images(
    client: &ApiClient,
    hotel_id: &str,
    server: &Hotel,
    resolved: &[Option<String>],
) -> Result<bool, AppError> {
    if resolved.iter().all(Option::is_none) {
        return Ok(false);
    }
    let mut patched = false;
    for (row, url) in server.room_type_rows().iter().zip(resolved.iter()) {
        if let (Some(room_id), Some(url)) = (row.id_str(), url) {
            tracing::info!(hotel_id, room_id = %room_id, "re-sending room image");
            client
                .update_room_images(hotel_id, &room_id, std::slice::from_ref(url))
                .await?;
            patched = true;
        }
    }
    Ok(patched)
}
