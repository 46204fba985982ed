//! Merchant-side hotel list.
//!
//! Maps the raw merchant-scoped list into display rows: normalized status,
//! the best available update timestamp, the reject reason (shown so the
//! merchant can fix and resubmit), and the list price.

use serde::Serialize;

use stayport_api_client::ApiClient;
use stayport_core::{AppError, Hotel, ReviewStatus};

/// One row of "my hotels".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantHotelRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub status: ReviewStatus,
    pub updated_at: Option<String>,
    pub reject_reason: Option<String>,
    pub min_price: Option<f64>,
}

impl MerchantHotelRow {
    pub fn from_hotel(hotel: &Hotel) -> Self {
        MerchantHotelRow {
            id: hotel.id_str(),
            name: hotel.name.clone(),
            city: hotel.city_display(),
            status: hotel.status(),
            updated_at: hotel.updated_at_display(),
            reject_reason: hotel.reject_reason(),
            min_price: hotel.display_min_price(),
        }
    }
}

/// Fetch and map the merchant's own hotels. Callers re-run this whenever the
/// view regains focus so an administrator decision does not linger unseen.
pub async fn merchant_hotel_rows(client: &ApiClient) -> Result<Vec<MerchantHotelRow>, AppError> {
    let hotels = client.list_my_hotels().await?;
    Ok(hotels.iter().map(MerchantHotelRow::from_hotel).collect())
}
