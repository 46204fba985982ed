//! Image upload through the Upload collaborator.

use serde_json::Value as JsonValue;
use stayport_core::AppError;

use crate::ApiClient;

impl ApiClient {
    /// Upload one raw image and return its hosted URL.
    ///
    /// `POST /upload/image`, multipart field `file`. A non-zero application
    /// code surfaces the server message; a success response without a URL is
    /// still an upload failure.
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let size = bytes.len();
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
        );

        let value = self.post_multipart_value("/upload/image", form).await?;

        let url = value
            .get("data")
            .and_then(|d| d.get("url"))
            .and_then(JsonValue::as_str)
            .filter(|u| !u.is_empty());

        match url {
            Some(url) => {
                tracing::info!(filename, size_bytes = size, url, "image uploaded");
                Ok(url.to_string())
            }
            None => Err(AppError::Upload(
                "Upload succeeded but no image URL was returned".to_string(),
            )),
        }
    }
}
