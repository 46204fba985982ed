//! End-to-end submission scenarios against a mocked hotel API.

use mockito::Matcher;
use serde_json::json;
use tempfile::tempdir;

use stayport_api_client::ApiClient;
use stayport_core::{
    AppError, Attachment, Breakfast, ClientConfig, HotelForm, RoomRow,
};
use stayport_services::{DraftStore, SubmissionOutcome, SubmissionPhase, SubmissionPipeline};

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(&ClientConfig {
        api_base_url: base_url,
        api_token: Some("merchant-token".to_string()),
        ..ClientConfig::default()
    })
    .unwrap()
}

fn deluxe_form() -> HotelForm {
    HotelForm {
        name: "上海陆家嘴禧酒店".to_string(),
        city: "上海".to_string(),
        address: "浦东新区世纪大道 1 号".to_string(),
        star: Some(5),
        base_price: Some(800.0),
        room_types: vec![RoomRow {
            name: "Deluxe".to_string(),
            price: Some(399.0),
            breakfast: Some(Breakfast::Included),
            ..RoomRow::default()
        }],
        ..HotelForm::default()
    }
}

#[tokio::test]
async fn create_submits_encoded_rooms_and_clears_the_draft() {
    let mut server = mockito::Server::new_async().await;
    let create_mock = server
        .mock("POST", "/hotels")
        .match_body(Matcher::PartialJson(json!({
            "name": "上海陆家嘴禧酒店",
            "roomTypes": "Deluxe 399元/晚 含早"
        })))
        .with_status(200)
        .with_body(json!({"code": 0, "data": {"id": 31}}).to_string())
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let drafts = DraftStore::new(dir.path());
    drafts.save(&deluxe_form()).await;
    assert!(drafts.load().await.is_some());

    let mut pipeline = SubmissionPipeline::new(client_for(server.url()), drafts.clone());
    let outcome = pipeline.submit(&deluxe_form(), None).await.unwrap();

    match outcome {
        SubmissionOutcome::Created { id } => assert_eq!(id.as_deref(), Some("31")),
        other => panic!("expected Created, got {:?}", other),
    }
    assert_eq!(pipeline.phase(), SubmissionPhase::Success);
    create_mock.assert_async().await;
    // successful creation consumes the draft
    assert!(drafts.load().await.is_none());
}

#[tokio::test]
async fn image_only_update_still_reopens_review_with_fresh_timestamp() {
    let mut server = mockito::Server::new_async().await;
    let update_mock = server
        .mock("PUT", "/hotels/7")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""submittedAt":"#.to_string()),
            Matcher::PartialJson(json!({
                "roomTypeImages": ["https://cdn/r1.jpg"]
            })),
        ]))
        .with_status(200)
        .with_body(json!({"code": 0, "data": {"id": 7}}).to_string())
        .create_async()
        .await;
    let pending_mock = server
        .mock("POST", "/hotels/7/status")
        .match_body(Matcher::Json(json!({"status": "pending"})))
        .with_status(200)
        .with_body(json!({"code": 0}).to_string())
        .create_async()
        .await;
    let detail_mock = server
        .mock("GET", "/hotels/7")
        .with_status(200)
        .with_body(
            json!({
                "code": 0,
                "data": {
                    "id": 7,
                    "name": "上海陆家嘴禧酒店",
                    "status": 1,
                    "roomTypes": [{"id": 21, "name": "Deluxe", "price": 399, "breakfast": "含早"}]
                }
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let patch_mock = server
        .mock("PATCH", "/hotels/7/rooms/21")
        .match_body(Matcher::Json(json!({"imageUrls": ["https://cdn/r1.jpg"]})))
        .with_status(200)
        .with_body(json!({"code": 0}).to_string())
        .create_async()
        .await;

    // only change: the first room row now has an image
    let mut form = deluxe_form();
    form.room_types[0].image = Some(Attachment::Hosted("https://cdn/r1.jpg".to_string()));

    let dir = tempdir().unwrap();
    let mut pipeline =
        SubmissionPipeline::new(client_for(server.url()), DraftStore::new(dir.path()));
    let outcome = pipeline.submit(&form, Some("7")).await.unwrap();

    update_mock.assert_async().await;
    pending_mock.assert_async().await;
    patch_mock.assert_async().await;
    detail_mock.assert_async().await;

    match outcome {
        SubmissionOutcome::Updated { id, form, hotel } => {
            assert_eq!(id, "7");
            assert!(hotel.is_some());
            // the reconciled form keeps this submission's room image
            assert_eq!(
                form.room_types[0].image,
                Some(Attachment::Hosted("https://cdn/r1.jpg".to_string()))
            );
            // server record fields win where present
            assert_eq!(form.name, "上海陆家嘴禧酒店");
            // local values the server does not reflect yet survive
            assert_eq!(form.base_price, Some(800.0));
        }
        other => panic!("expected Updated, got {:?}", other),
    }
    assert_eq!(pipeline.phase(), SubmissionPhase::Success);
}

#[tokio::test]
async fn upload_failure_aborts_before_any_write() {
    let mut server = mockito::Server::new_async().await;
    let create_mock = server.mock("POST", "/hotels").expect(0).create_async().await;
    let update_mock = server
        .mock("PUT", Matcher::Regex(r"^/hotels/".to_string()))
        .expect(0)
        .create_async()
        .await;

    let mut form = deluxe_form();
    form.cover = Some(Attachment::Local("/no/such/image.jpg".into()));

    let dir = tempdir().unwrap();
    let mut pipeline =
        SubmissionPipeline::new(client_for(server.url()), DraftStore::new(dir.path()));
    let err = pipeline.submit(&form, None).await.unwrap_err();

    assert!(matches!(err, AppError::Upload(_)));
    // the pipeline never stays stuck in Uploading after a failure
    assert_eq!(pipeline.phase(), SubmissionPhase::Failed);
    create_mock.assert_async().await;
    update_mock.assert_async().await;
}

#[tokio::test]
async fn validation_failure_issues_no_network_calls() {
    let mut server = mockito::Server::new_async().await;
    let any_mock = server
        .mock("POST", Matcher::Regex(".*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let mut form = deluxe_form();
    form.name = "   ".to_string();

    let dir = tempdir().unwrap();
    let mut pipeline =
        SubmissionPipeline::new(client_for(server.url()), DraftStore::new(dir.path()));
    let err = pipeline.submit(&form, None).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    any_mock.assert_async().await;
}

#[tokio::test]
async fn update_with_unfetchable_record_keeps_local_form() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", "/hotels/9")
        .with_status(200)
        .with_body(json!({"code": 0}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/hotels/9/status")
        .with_status(200)
        .with_body(json!({"code": 0}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/hotels/9")
        .with_status(404)
        .with_body("{}")
        .create_async()
        .await;

    let form = deluxe_form();
    let dir = tempdir().unwrap();
    let mut pipeline =
        SubmissionPipeline::new(client_for(server.url()), DraftStore::new(dir.path()));
    let outcome = pipeline.submit(&form, Some("9")).await.unwrap();

    match outcome {
        SubmissionOutcome::Updated { form: merged, hotel, .. } => {
            assert!(hotel.is_none());
            assert_eq!(merged, form);
        }
        other => panic!("expected Updated, got {:?}", other),
    }
}

#[tokio::test]
async fn server_rejection_surfaces_verbatim_message_once() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/hotels")
        .with_status(200)
        .with_body(json!({"code": 40001, "message": "城市不存在"}).to_string())
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let drafts = DraftStore::new(dir.path());
    drafts.save(&deluxe_form()).await;

    let mut pipeline = SubmissionPipeline::new(client_for(server.url()), drafts.clone());
    let err = pipeline.submit(&deluxe_form(), None).await.unwrap_err();

    assert!(err.has_server_message());
    assert_eq!(err.user_message(), "城市不存在");
    assert_eq!(pipeline.phase(), SubmissionPhase::Failed);
    // a failed create must not consume the draft
    assert!(drafts.load().await.is_some());
}
