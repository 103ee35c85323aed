use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::room_type;
use crate::repository::{DeleteOutcome, RoomTypeRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateRoomTypeRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRoomTypeRequest {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

// GET /api/RoomType
pub async fn list_room_types(Extension(db): Extension<DatabaseConnection>) -> Response {
    match RoomTypeRepository::new(db).get_all().await {
        Ok(types) if types.is_empty() => response::not_found("No room types found"),
        Ok(types) => response::ok("Room types retrieved", types),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/RoomType/:id
pub async fn get_room_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match RoomTypeRepository::new(db).get_by_id(id).await {
        Ok(room_type) => response::ok("Room type retrieved", room_type),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/RoomType
pub async fn create_room_type(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateRoomTypeRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Room type name is required");
    }
    if payload.price < 0.0 {
        return response::bad_request("Room type price cannot be negative");
    }

    let model = room_type::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        name: payload.name,
        price: payload.price,
        description: payload.description,
        is_deleted: false,
    };

    match RoomTypeRepository::new(db).create(model).await {
        Ok(created) => {
            tracing::Span::current()
                .record("table", "room_types")
                .record("action", "create_room_type")
                .record("business_event", "Room type created");
            let message = format!("{} added successfully", created.id);
            response::ok(message, created)
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/RoomType/:id
pub async fn update_room_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomTypeRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Room type name is required");
    }

    let model = room_type::Model {
        id,
        name: payload.name,
        price: payload.price,
        description: payload.description,
        is_deleted: false,
    };

    match RoomTypeRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Room type updated", updated),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/RoomType/:id
pub async fn delete_room_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match RoomTypeRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Room type {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Room type {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
