//! Administrator review workflow.
//!
//! Keeps one filtered, paginated view keyed by `(page, status filter,
//! keyword)` and applies the review transitions. The status filter is
//! server-side; the keyword filters the fetched page client-side and never
//! requests additional pages.

use serde_json::json;

use stayport_api_client::ApiClient;
use stayport_core::constants::DEFAULT_PAGE_SIZE;
use stayport_core::validation::validate_reject_reason;
use stayport_core::{AppError, Hotel, PageMeta, ReviewStatus};

pub struct ReviewWorkflow {
    client: ApiClient,
    page_size: u32,
    status_filter: Option<ReviewStatus>,
    keyword: String,
    rows: Vec<Hotel>,
    meta: PageMeta,
}

impl ReviewWorkflow {
    pub fn new(client: ApiClient) -> Self {
        ReviewWorkflow {
            client,
            page_size: DEFAULT_PAGE_SIZE,
            status_filter: None,
            keyword: String::new(),
            rows: Vec::new(),
            meta: PageMeta::default(),
        }
    }

    pub fn rows(&self) -> &[Hotel] {
        &self.rows
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Set the status filter (`None` means "all") and the keyword.
    pub fn set_filters(&mut self, status: Option<ReviewStatus>, keyword: &str) {
        self.status_filter = status;
        self.keyword = keyword.trim().to_string();
    }

    /// Fetch one page from the server. On failure the view empties rather
    /// than showing stale rows.
    pub async fn refresh(&mut self, page: u32) -> Result<(), AppError> {
        match self
            .client
            .list_review(page, self.page_size, self.status_filter)
            .await
        {
            Ok((rows, meta)) => {
                self.rows = rows;
                self.meta = meta;
                Ok(())
            }
            Err(err) => {
                self.rows.clear();
                Err(err)
            }
        }
    }

    /// Rows after the client-side keyword filter: case-insensitive substring
    /// match on name and address.
    pub fn filtered_rows(&self) -> Vec<&Hotel> {
        if self.keyword.is_empty() {
            return self.rows.iter().collect();
        }
        let keyword = self.keyword.to_lowercase();
        self.rows
            .iter()
            .filter(|hotel| {
                contains_keyword(hotel.name.as_deref(), &keyword)
                    || contains_keyword(hotel.address.as_deref(), &keyword)
            })
            .collect()
    }

    /// Approve a hotel. The local row flips optimistically before the view
    /// reconciles with a re-fetch.
    pub async fn approve(&mut self, hotel_id: &str, remark: Option<&str>) -> Result<(), AppError> {
        if let Some(status) = self.row_status(hotel_id) {
            if !status.can_approve() {
                return Err(AppError::InvalidInput(
                    "Hotel is already approved".to_string(),
                ));
            }
        }
        self.client.approve_hotel(hotel_id, remark).await?;

        for row in &mut self.rows {
            if row.id_str().as_deref() == Some(hotel_id) {
                row.status = Some(json!("approved"));
            }
        }
        self.refresh_current_page().await;
        Ok(())
    }

    /// Reject a hotel. A blank reason fails locally; no API call goes out.
    pub async fn reject(&mut self, hotel_id: &str, reason: &str) -> Result<(), AppError> {
        let reason = validate_reject_reason(reason)?;
        if let Some(status) = self.row_status(hotel_id) {
            if !status.can_reject() {
                return Err(AppError::InvalidInput(
                    "Hotel is already rejected".to_string(),
                ));
            }
        }
        self.client.reject_hotel(hotel_id, &reason).await?;
        self.refresh_current_page().await;
        Ok(())
    }

    /// Flip approved <-> offline. Rejected hotels are not eligible.
    pub async fn toggle_offline(&mut self, hotel_id: &str) -> Result<(), AppError> {
        let status = match self.row_status(hotel_id) {
            Some(status) => status,
            None => self
                .client
                .fetch_hotel(hotel_id)
                .await?
                .map(|hotel| hotel.status())
                .ok_or_else(|| AppError::NotFound(format!("Hotel {} not found", hotel_id)))?,
        };
        if !status.can_toggle_offline() {
            return Err(AppError::InvalidInput(
                "Rejected hotels cannot be taken online or offline".to_string(),
            ));
        }
        let target = if status == ReviewStatus::Offline {
            "online"
        } else {
            "offline"
        };
        self.client.set_hotel_status(hotel_id, target).await?;
        self.refresh_current_page().await;
        Ok(())
    }

    fn row_status(&self, hotel_id: &str) -> Option<ReviewStatus> {
        self.rows
            .iter()
            .find(|hotel| hotel.id_str().as_deref() == Some(hotel_id))
            .map(Hotel::status)
    }

    /// A transition succeeded even when the follow-up refresh does not. A
    /// failed refresh keeps the (optimistically updated) rows instead of
    /// emptying the view.
    async fn refresh_current_page(&mut self) {
        let page = self.meta.page;
        match self
            .client
            .list_review(page, self.page_size, self.status_filter)
            .await
        {
            Ok((rows, meta)) => {
                self.rows = rows;
                self.meta = meta;
            }
            Err(err) => {
                tracing::warn!(error = %err, "post-transition list refresh failed");
            }
        }
    }
}

fn contains_keyword(field: Option<&str>, keyword: &str) -> bool {
    field
        .map(|value| value.to_lowercase().contains(keyword))
        .unwrap_or(false)
}
