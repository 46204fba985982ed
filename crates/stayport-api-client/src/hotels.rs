//! Domain methods for the hotel listing API.

use serde_json::json;
use stayport_core::{AppError, Hotel, HotelPayload, PageMeta, ReviewStatus};

use crate::{envelope, ApiClient};

impl ApiClient {
    /// Fetch one hotel record. Returns `Ok(None)` when the server has no
    /// such hotel (404) or the response does not contain a valid record.
    pub async fn fetch_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, AppError> {
        let value = match self.get_value(&format!("/hotels/{}", hotel_id), &[]).await {
            Ok(value) => value,
            Err(AppError::Server { code: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
        Ok(envelope::extract_record(&value))
    }

    /// Create a hotel; new records start in pending review. Returns the
    /// created id when the server includes one.
    pub async fn create_hotel(&self, payload: &HotelPayload) -> Result<Option<String>, AppError> {
        let value = self.post_value("/hotels", payload).await?;
        Ok(envelope::extract_id(&value))
    }

    /// Update an existing hotel with the full payload shape.
    pub async fn update_hotel(&self, hotel_id: &str, payload: &HotelPayload) -> Result<(), AppError> {
        self.put_value(&format!("/hotels/{}", hotel_id), payload)
            .await?;
        Ok(())
    }

    /// Merchant-scoped hotel list.
    pub async fn list_my_hotels(&self) -> Result<Vec<Hotel>, AppError> {
        let value = self.get_value("/hotels", &[]).await?;
        Ok(envelope::extract_list(&value))
    }

    /// Administrator review list, server-paginated with an optional status
    /// filter.
    pub async fn list_review(
        &self,
        page: u32,
        page_size: u32,
        status: Option<ReviewStatus>,
    ) -> Result<(Vec<Hotel>, PageMeta), AppError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        let value = self.get_value("/hotels/review", &query).await?;
        Ok((envelope::extract_list(&value), envelope::extract_meta(&value)))
    }

    /// Approve a hotel (administrator).
    pub async fn approve_hotel(&self, hotel_id: &str, remark: Option<&str>) -> Result<(), AppError> {
        let body = match remark {
            Some(remark) => json!({ "remark": remark }),
            None => json!({}),
        };
        self.post_value(&format!("/hotels/{}/approve", hotel_id), &body)
            .await?;
        Ok(())
    }

    /// Reject a hotel with a reason (administrator).
    pub async fn reject_hotel(&self, hotel_id: &str, reason: &str) -> Result<(), AppError> {
        self.post_value(
            &format!("/hotels/{}/reject", hotel_id),
            &json!({ "reason": reason }),
        )
        .await?;
        Ok(())
    }

    /// Set the raw wire status (`online`, `offline`, `pending`, `rejected`).
    pub async fn set_hotel_status(&self, hotel_id: &str, status: &str) -> Result<(), AppError> {
        self.post_value(
            &format!("/hotels/{}/status", hotel_id),
            &json!({ "status": status }),
        )
        .await?;
        Ok(())
    }

    /// Corrective per-room image update for rows the main update call did
    /// not persist.
    pub async fn update_room_images(
        &self,
        hotel_id: &str,
        room_id: &str,
        image_urls: &[String],
    ) -> Result<(), AppError> {
        self.patch_value(
            &format!("/hotels/{}/rooms/{}", hotel_id, room_id),
            &json!({ "imageUrls": image_urls }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use stayport_core::ClientConfig;

    fn test_client(base_url: String) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_base_url: base_url,
            api_token: Some("test-token".to_string()),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_hotel_unwraps_nested_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/hotels/7")
            .with_status(200)
            .with_body(
                json!({"code": 0, "data": {"data": {"id": 7, "name": "禧酒店", "status": 2}}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let hotel = client.fetch_hotel("7").await.unwrap().expect("record");
        assert_eq!(hotel.id_str().as_deref(), Some("7"));
        assert_eq!(hotel.status(), ReviewStatus::Approved);
    }

    #[tokio::test]
    async fn fetch_hotel_404_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/hotels/404")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(server.url());
        assert!(client.fetch_hotel("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_hotel_invalid_record_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/hotels/8")
            .with_status(200)
            .with_body(json!({"code": 0, "data": {"total": 0}}).to_string())
            .create_async()
            .await;

        let client = test_client(server.url());
        assert!(client.fetch_hotel("8").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn review_list_sends_pagination_and_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hotels/review")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("pageSize".into(), "10".into()),
                Matcher::UrlEncoded("status".into(), "pending".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "code": 0,
                    "data": {"data": [{"id": 1, "name": "A", "status": 1}]},
                    "meta": {"total": 11, "page": 2, "pageSize": 10}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let (list, meta) = client
            .list_review(2, 10, Some(ReviewStatus::Pending))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(meta.total, 11);
        assert_eq!(meta.page, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn review_list_omits_status_for_all() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hotels/review")
            .match_query(Matcher::Exact("page=1&pageSize=10".into()))
            .with_status(200)
            .with_body(json!({"code": 0, "data": {"data": []}}).to_string())
            .create_async()
            .await;

        let client = test_client(server.url());
        let (list, _) = client.list_review(1, 10, None).await.unwrap();
        assert!(list.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transitions_post_expected_bodies() {
        let mut server = mockito::Server::new_async().await;
        let approve = server
            .mock("POST", "/hotels/5/approve")
            .match_body(Matcher::Json(json!({})))
            .with_status(200)
            .with_body(json!({"code": 0}).to_string())
            .create_async()
            .await;
        let reject = server
            .mock("POST", "/hotels/5/reject")
            .match_body(Matcher::Json(json!({"reason": "poor photos"})))
            .with_status(200)
            .with_body(json!({"code": 0}).to_string())
            .create_async()
            .await;
        let status = server
            .mock("POST", "/hotels/5/status")
            .match_body(Matcher::Json(json!({"status": "offline"})))
            .with_status(200)
            .with_body(json!({"code": 0}).to_string())
            .create_async()
            .await;
        let rooms = server
            .mock("PATCH", "/hotels/5/rooms/2")
            .match_body(Matcher::Json(json!({"imageUrls": ["https://x/r.jpg"]})))
            .with_status(200)
            .with_body(json!({"code": 0}).to_string())
            .create_async()
            .await;

        let client = test_client(server.url());
        client.approve_hotel("5", None).await.unwrap();
        client.reject_hotel("5", "poor photos").await.unwrap();
        client.set_hotel_status("5", "offline").await.unwrap();
        client
            .update_room_images("5", "2", &["https://x/r.jpg".to_string()])
            .await
            .unwrap();

        approve.assert_async().await;
        reject.assert_async().await;
        status.assert_async().await;
        rooms.assert_async().await;
    }

    #[tokio::test]
    async fn create_returns_new_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/hotels")
            .with_status(200)
            .with_body(json!({"code": 0, "data": {"id": 31}}).to_string())
            .create_async()
            .await;

        let client = test_client(server.url());
        let id = client
            .create_hotel(&HotelPayload::default())
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("31"));
    }
}
