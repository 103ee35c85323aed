use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::camera;
use crate::repository::{CameraRepository, DeleteOutcome};
use crate::response;

#[derive(Deserialize)]
pub struct CreateCameraRequest {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub camera_type: String,
    pub code: String,
    pub status: Option<String>,
    pub rtsp_url: String,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCameraRequest {
    #[serde(rename = "type")]
    pub camera_type: String,
    pub code: String,
    pub status: String,
    pub rtsp_url: String,
    pub address: Option<String>,
}

// GET /api/Camera
pub async fn list_cameras(Extension(db): Extension<DatabaseConnection>) -> Response {
    match CameraRepository::new(db).get_all().await {
        Ok(cameras) if cameras.is_empty() => response::not_found("No cameras found"),
        Ok(cameras) => response::ok("Cameras retrieved", cameras),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Camera/:id
pub async fn get_camera(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match CameraRepository::new(db).get_by_id(id).await {
        Ok(camera) => response::ok("Camera retrieved", camera),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Camera
pub async fn create_camera(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateCameraRequest>,
) -> Response {
    if payload.code.trim().is_empty() {
        return response::bad_request("Camera code is required");
    }
    if payload.rtsp_url.trim().is_empty() {
        return response::bad_request("Camera RTSP url is required");
    }

    let model = camera::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        camera_type: payload.camera_type,
        code: payload.code,
        status: payload.status.unwrap_or_else(|| "Active".to_string()),
        rtsp_url: payload.rtsp_url,
        address: payload.address,
        is_deleted: false,
    };

    match CameraRepository::new(db).create(model).await {
        Ok(created) => {
            let message = format!("{} added successfully", created.id);
            response::ok(message, created)
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/Camera/:id
pub async fn update_camera(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCameraRequest>,
) -> Response {
    let model = camera::Model {
        id,
        camera_type: payload.camera_type,
        code: payload.code,
        status: payload.status,
        rtsp_url: payload.rtsp_url,
        address: payload.address,
        is_deleted: false,
    };

    match CameraRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Camera updated", updated),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/Camera/:id
pub async fn delete_camera(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match CameraRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Camera {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Camera {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
