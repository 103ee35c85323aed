use axum::{
    extract::{Extension, Multipart, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::images::{self, ImagesDir};
use crate::entities::service;
use crate::repository::{DeleteOutcome, ServiceRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub id: Option<Uuid>,
    pub service_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub service_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub service_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_image: Option<String>,
    pub is_deleted: bool,
}

impl From<service::Model> for ServiceResponse {
    fn from(model: service::Model) -> Self {
        Self {
            id: model.id,
            service_type_id: model.service_type_id,
            name: model.name,
            description: model.description,
            service_image: model.service_image,
            is_deleted: model.is_deleted,
        }
    }
}

// GET /api/Service
pub async fn list_services(Extension(db): Extension<DatabaseConnection>) -> Response {
    match ServiceRepository::new(db).get_all().await {
        Ok(services) if services.is_empty() => response::not_found("No services found"),
        Ok(services) => {
            let data: Vec<ServiceResponse> = services.into_iter().map(Into::into).collect();
            response::ok("Services retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Service/:id
pub async fn get_service(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceRepository::new(db).get_by_id(id).await {
        Ok(service) => response::ok("Service retrieved", ServiceResponse::from(service)),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Service
pub async fn create_service(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateServiceRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Service name is required");
    }

    let model = service::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        service_type_id: payload.service_type_id,
        name: payload.name,
        description: payload.description,
        service_image: None,
        is_deleted: false,
    };

    match ServiceRepository::new(db).create(model).await {
        Ok(created) => {
            tracing::Span::current()
                .record("table", "services")
                .record("action", "create_service")
                .record("business_event", "Service created");
            metrics::counter!("petharbor_services_created_total").increment(1);
            let message = format!("{} added successfully", created.id);
            response::ok(message, ServiceResponse::from(created))
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/Service/:id
pub async fn update_service(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Service name is required");
    }

    let model = service::Model {
        id,
        service_type_id: payload.service_type_id,
        name: payload.name,
        description: payload.description,
        service_image: None,
        is_deleted: false,
    };

    match ServiceRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Service updated", ServiceResponse::from(updated)),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/Service/:id
pub async fn delete_service(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Service {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Service {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Service/:id/image
pub async fn upload_service_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(images_dir): Extension<ImagesDir>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Response {
    let path = match images::save_image(&images_dir.0, multipart).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match ServiceRepository::new(db).set_image(id, path.clone()).await {
        Ok(previous) => {
            if let Some(prev) = previous {
                images::remove_image(&images_dir.0, &prev).await;
            }
            response::ok("Service image uploaded", path)
        }
        Err(e) => {
            images::remove_image(&images_dir.0, &path).await;
            response::repo_error(e)
        }
    }
}
