use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::service_type;
use crate::repository::{DeleteOutcome, ServiceTypeRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateServiceTypeRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateServiceTypeRequest {
    pub name: String,
    pub description: Option<String>,
}

// GET /api/ServiceType
pub async fn list_service_types(Extension(db): Extension<DatabaseConnection>) -> Response {
    match ServiceTypeRepository::new(db).get_all().await {
        Ok(types) if types.is_empty() => response::not_found("No service types found"),
        Ok(types) => response::ok("Service types retrieved", types),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/ServiceType/:id
pub async fn get_service_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceTypeRepository::new(db).get_by_id(id).await {
        Ok(service_type) => response::ok("Service type retrieved", service_type),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/ServiceType
pub async fn create_service_type(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateServiceTypeRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Service type name is required");
    }

    let model = service_type::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        name: payload.name,
        description: payload.description,
        is_deleted: false,
    };

    match ServiceTypeRepository::new(db).create(model).await {
        Ok(created) => {
            let message = format!("{} added successfully", created.id);
            response::ok(message, created)
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/ServiceType/:id
pub async fn update_service_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceTypeRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Service type name is required");
    }

    let model = service_type::Model {
        id,
        name: payload.name,
        description: payload.description,
        is_deleted: false,
    };

    match ServiceTypeRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Service type updated", updated),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/ServiceType/:id
pub async fn delete_service_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceTypeRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Service type {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Service type {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
