use axum::{
    extract::{Extension, Multipart, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::images::{self, ImagesDir};
use crate::entities::room::{self, RoomStatus};
use crate::repository::{DeleteOutcome, RoomRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub id: Option<Uuid>,
    pub room_type_id: Uuid,
    pub description: Option<String>,
    pub status: Option<RoomStatus>,
    pub has_camera: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    pub room_type_id: Uuid,
    pub description: Option<String>,
    pub status: RoomStatus,
    pub has_camera: bool,
}

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub description: Option<String>,
    pub status: RoomStatus,
    pub room_image: Option<String>,
    pub has_camera: bool,
    pub is_deleted: bool,
}

impl From<room::Model> for RoomResponse {
    fn from(model: room::Model) -> Self {
        Self {
            id: model.id,
            room_type_id: model.room_type_id,
            description: model.description,
            status: model.status,
            room_image: model.room_image,
            has_camera: model.has_camera,
            is_deleted: model.is_deleted,
        }
    }
}

// GET /api/Room
pub async fn list_rooms(Extension(db): Extension<DatabaseConnection>) -> Response {
    match RoomRepository::new(db).get_all().await {
        Ok(rooms) if rooms.is_empty() => response::not_found("No rooms found"),
        Ok(rooms) => {
            let data: Vec<RoomResponse> = rooms.into_iter().map(Into::into).collect();
            response::ok("Rooms retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Room/available
pub async fn list_available_rooms(Extension(db): Extension<DatabaseConnection>) -> Response {
    match RoomRepository::new(db).list_available().await {
        Ok(rooms) if rooms.is_empty() => response::not_found("No available rooms"),
        Ok(rooms) => {
            let data: Vec<RoomResponse> = rooms.into_iter().map(Into::into).collect();
            response::ok("Available rooms retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Room/:id
pub async fn get_room(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match RoomRepository::new(db).get_by_id(id).await {
        Ok(room) => response::ok("Room retrieved", RoomResponse::from(room)),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Room
pub async fn create_room(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateRoomRequest>,
) -> Response {
    let model = room::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        room_type_id: payload.room_type_id,
        description: payload.description,
        status: payload.status.unwrap_or(RoomStatus::Free),
        room_image: None,
        has_camera: payload.has_camera.unwrap_or(false),
        is_deleted: false,
    };

    match RoomRepository::new(db).create(model).await {
        Ok(created) => {
            tracing::Span::current()
                .record("table", "rooms")
                .record("action", "create_room")
                .record("business_event", "Room created");
            metrics::counter!("petharbor_rooms_created_total").increment(1);
            let message = format!("{} added successfully", created.id);
            response::ok(message, RoomResponse::from(created))
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/Room/:id
pub async fn update_room(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Response {
    let model = room::Model {
        id,
        room_type_id: payload.room_type_id,
        description: payload.description,
        status: payload.status,
        room_image: None,
        has_camera: payload.has_camera,
        is_deleted: false,
    };

    match RoomRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Room updated", RoomResponse::from(updated)),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/Room/:id
pub async fn delete_room(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match RoomRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Room {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Room {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Room/:id/image
pub async fn upload_room_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(images_dir): Extension<ImagesDir>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Response {
    let path = match images::save_image(&images_dir.0, multipart).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match RoomRepository::new(db).set_image(id, path.clone()).await {
        Ok(previous) => {
            if let Some(prev) = previous {
                images::remove_image(&images_dir.0, &prev).await;
            }
            response::ok("Room image uploaded", path)
        }
        Err(e) => {
            // The row rejected the path; don't leave the file behind.
            images::remove_image(&images_dir.0, &path).await;
            response::repo_error(e)
        }
    }
}
