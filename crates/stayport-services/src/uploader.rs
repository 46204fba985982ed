//! Image slot resolution.
//!
//! A submission carries three image slots: the single cover, the ordered
//! gallery, and one optional image per room row. Each attachment resolves to
//! a hosted URL, either by pass-through (already hosted) or by uploading the
//! local file. Resolution is strictly sequential in slot order so a failure
//! always attributes to exactly one attachment; the first failure aborts the
//! whole operation and no create/update call is made.

use async_trait::async_trait;

use stayport_api_client::ApiClient;
use stayport_core::{AppError, Attachment, HotelForm};

/// Seam to the external Upload collaborator.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload one raw file and return its hosted URL.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError>;
}

#[async_trait]
impl ImageUploader for ApiClient {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        self.upload_image(filename, bytes).await
    }
}

/// Hosted URLs for the three slots after resolution. `room_images` is
/// index-aligned with the form's room rows; `None` means the row has no
/// image, which is distinct from clearing an existing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedImages {
    pub cover: Option<String>,
    pub gallery: Vec<String>,
    pub room_images: Vec<Option<String>>,
}

impl ResolvedImages {
    pub fn has_any(&self) -> bool {
        self.cover.is_some()
            || !self.gallery.is_empty()
            || self.room_images.iter().any(Option::is_some)
    }
}

/// Resolve every attachment in the form: cover first, then gallery items in
/// list order, then room-type images in row order.
pub async fn resolve_images(
    form: &HotelForm,
    uploader: &dyn ImageUploader,
) -> Result<ResolvedImages, AppError> {
    let mut resolved = ResolvedImages::default();

    if let Some(attachment) = &form.cover {
        tracing::info!(slot = "cover", "resolving image");
        resolved.cover = Some(resolve_one(attachment, uploader).await?);
    }

    for (index, attachment) in form.gallery.iter().enumerate() {
        tracing::info!(slot = "gallery", index, "resolving image");
        resolved.gallery.push(resolve_one(attachment, uploader).await?);
    }

    for (index, row) in form.room_types.iter().enumerate() {
        match &row.image {
            Some(attachment) => {
                tracing::info!(slot = "room", index, "resolving image");
                resolved
                    .room_images
                    .push(Some(resolve_one(attachment, uploader).await?));
            }
            None => resolved.room_images.push(None),
        }
    }

    Ok(resolved)
}

async fn resolve_one(
    attachment: &Attachment,
    uploader: &dyn ImageUploader,
) -> Result<String, AppError> {
    match attachment {
        Attachment::Hosted(url) => Ok(url.clone()),
        Attachment::Local(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|err| {
                AppError::Upload(format!("Failed to read {}: {}", path.display(), err))
            })?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image.jpg");
            uploader.upload(filename, bytes).await
        }
    }
}
