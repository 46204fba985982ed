//! File-backed store for the single pending draft.
//!
//! Exactly one draft exists per client, under a well-known file name in the
//! configured directory. Storage failures never propagate into the submit
//! flow: every operation degrades to "no draft" with a warning.

use std::io;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use tokio::fs;

use stayport_core::constants::{DRAFT_FILE_NAME, DRAFT_MAX_AGE_DAYS};
use stayport_core::{ClientConfig, Draft, HotelForm};

#[derive(Clone, Debug)]
pub struct DraftStore {
    base_path: PathBuf,
}

impl DraftStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        DraftStore {
            base_path: base_path.into(),
        }
    }

    /// Configured draft directory, or a `stayport` directory under the
    /// platform temp dir.
    pub fn from_config(config: &ClientConfig) -> Self {
        let base_path = config
            .draft_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("stayport"));
        DraftStore::new(base_path)
    }

    fn draft_path(&self) -> PathBuf {
        self.base_path.join(DRAFT_FILE_NAME)
    }

    /// Overwrite the draft with the current form values, stamped now.
    /// Returns whether the write landed; a `false` is already logged and
    /// must not abort the caller.
    pub async fn save(&self, form: &HotelForm) -> bool {
        let draft = Draft::new(form.clone(), Utc::now());
        let bytes = match serde_json::to_vec_pretty(&draft) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize draft");
                return false;
            }
        };
        if let Err(err) = fs::create_dir_all(&self.base_path).await {
            tracing::warn!(error = %err, path = %self.base_path.display(), "failed to create draft directory");
            return false;
        }
        let path = self.draft_path();
        match fs::write(&path, bytes).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "draft saved");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "failed to write draft");
                false
            }
        }
    }

    /// Load the draft when present and fresh. Drafts older than 7 days are
    /// deleted on read so stale data never overwrites fresh edits; an
    /// unreadable file reads as "no draft".
    pub async fn load(&self) -> Option<HotelForm> {
        let path = self.draft_path();
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "failed to read draft");
                return None;
            }
        };
        let draft: Draft = match serde_json::from_slice(&raw) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(error = %err, "stored draft is not readable, ignoring it");
                return None;
            }
        };
        if draft.is_expired(Utc::now(), Duration::days(DRAFT_MAX_AGE_DAYS)) {
            tracing::info!(path = %path.display(), "expired draft discarded");
            if let Err(err) = fs::remove_file(&path).await {
                tracing::warn!(error = %err, "failed to delete expired draft");
            }
            return None;
        }
        Some(draft.form)
    }

    /// Remove the draft; already-missing files are fine.
    pub async fn clear(&self) {
        let path = self.draft_path();
        match fs::remove_file(&path).await {
            Ok(()) => tracing::info!(path = %path.display(), "draft cleared"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(error = %err, "failed to clear draft"),
        }
    }
}
