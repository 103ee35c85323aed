use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use petharbor_server::api;
use petharbor_server::api::images::ImagesDir;
use petharbor_server::api::middleware::AuthConfig;
use petharbor_server::migrator::Migrator;

const ADMIN: &str = "test-admin";
const USER: &str = "test-user";

async fn test_app() -> (Router, tempfile::TempDir) {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");

    let auth = AuthConfig {
        admin_token: ADMIN.to_string(),
        staff_token: "test-staff".to_string(),
        user_token: USER.to_string(),
    };
    let images = tempfile::tempdir().expect("temp images dir");
    let app = api::router(db, auth, ImagesDir(images.path().to_path_buf()));
    (app, images)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn envelope(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn room_type_create_rejects_duplicate_name_any_case() {
    let (app, _images) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(ADMIN),
            Some(json!({"name": "Deluxe", "price": 500000.0})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = envelope(response).await;
    assert_eq!(body["flag"], json!(true));
    assert!(body["data"]["id"].is_string());

    let response = app
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(ADMIN),
            Some(json!({"name": "deluxe", "price": 500000.0})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = envelope(response).await;
    assert_eq!(body["flag"], json!(false));
}

#[tokio::test]
async fn room_delete_is_soft_then_permanent() {
    let (app, _images) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(ADMIN),
            Some(json!({"name": "Standard", "price": 250000.0})),
        ))
        .await
        .unwrap();
    let type_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let room_id = Uuid::new_v4().to_string();
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/Room",
            Some(ADMIN),
            Some(json!({"id": room_id, "room_type_id": type_id, "status": "Free"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // First delete: soft
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(envelope(response).await["flag"], json!(true));

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(envelope(response).await["data"]["is_deleted"], json!(true));

    // Second delete: permanent
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_list_is_404_not_empty_array() {
    let (app, _images) = test_app().await;

    let response = app
        .oneshot(request("GET", "/api/Service", Some(USER), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = envelope(response).await;
    assert_eq!(body["flag"], json!(false));
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn room_create_with_missing_type_is_404() {
    let (app, _images) = test_app().await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/Room",
            Some(ADMIN),
            Some(json!({"room_type_id": Uuid::new_v4().to_string()})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(envelope(response).await["flag"], json!(false));
}

#[tokio::test]
async fn write_routes_enforce_admin_or_staff() {
    let (app, _images) = test_app().await;

    // No token at all
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            None,
            Some(json!({"name": "Suite", "price": 1.0})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // User token can read but not write
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(USER),
            Some(json!({"name": "Suite", "price": 1.0})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request("GET", "/api/RoomType", Some(USER), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn room_type_hard_delete_blocked_while_rooms_exist() {
    let (app, _images) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(ADMIN),
            Some(json!({"name": "Family", "price": 750000.0})),
        ))
        .await
        .unwrap();
    let type_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/Room",
            Some(ADMIN),
            Some(json!({"room_type_id": type_id})),
        ))
        .await
        .unwrap();
    let room_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Soft delete cascades to the room
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/RoomType/{}", type_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(envelope(response).await["data"]["is_deleted"], json!(true));

    // Hard delete refused while the room row remains
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/RoomType/{}", type_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(envelope(response).await["flag"], json!(false));
}

#[tokio::test]
async fn check_in_then_check_out_flips_room_status() {
    let (app, _images) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomType",
            Some(ADMIN),
            Some(json!({"name": "Kennel", "price": 90000.0})),
        ))
        .await
        .unwrap();
    let type_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/Room",
            Some(ADMIN),
            Some(json!({"room_type_id": type_id})),
        ))
        .await
        .unwrap();
    let room_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomHistory/checkin",
            Some(ADMIN),
            Some(json!({"room_id": room_id, "booking_id": Uuid::new_v4().to_string()})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stay_id = envelope(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(envelope(response).await["data"]["status"], json!("In Use"));

    // A second open stay for the same room is refused
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/RoomHistory/checkin",
            Some(ADMIN),
            Some(json!({"room_id": room_id, "booking_id": Uuid::new_v4().to_string()})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/RoomHistory/{}/checkout", stay_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/Room/{}", room_id),
            Some(ADMIN),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(envelope(response).await["data"]["status"], json!("Free"));
}
