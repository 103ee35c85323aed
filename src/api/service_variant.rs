use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::service_variant;
use crate::repository::{DeleteOutcome, ServiceVariantRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateServiceVariantRequest {
    pub id: Option<Uuid>,
    pub service_id: Uuid,
    pub content: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct UpdateServiceVariantRequest {
    pub content: String,
    pub price: f64,
}

#[derive(Serialize)]
pub struct ServiceVariantResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub content: String,
    pub price: f64,
    pub is_deleted: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<service_variant::Model> for ServiceVariantResponse {
    fn from(model: service_variant::Model) -> Self {
        Self {
            id: model.id,
            service_id: model.service_id,
            content: model.content,
            price: model.price,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// GET /api/ServiceVariant
pub async fn list_service_variants(Extension(db): Extension<DatabaseConnection>) -> Response {
    match ServiceVariantRepository::new(db).get_all().await {
        Ok(variants) if variants.is_empty() => response::not_found("No service variants found"),
        Ok(variants) => {
            let data: Vec<ServiceVariantResponse> = variants.into_iter().map(Into::into).collect();
            response::ok("Service variants retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/ServiceVariant/service/:service_id
pub async fn list_variants_by_service(
    Extension(db): Extension<DatabaseConnection>,
    Path(service_id): Path<Uuid>,
) -> Response {
    match ServiceVariantRepository::new(db)
        .list_by_service(service_id)
        .await
    {
        Ok(variants) if variants.is_empty() => {
            response::not_found("No service variants for this service")
        }
        Ok(variants) => {
            let data: Vec<ServiceVariantResponse> = variants.into_iter().map(Into::into).collect();
            response::ok("Service variants retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/ServiceVariant/:id
pub async fn get_service_variant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceVariantRepository::new(db).get_by_id(id).await {
        Ok(variant) => response::ok(
            "Service variant retrieved",
            ServiceVariantResponse::from(variant),
        ),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/ServiceVariant
pub async fn create_service_variant(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateServiceVariantRequest>,
) -> Response {
    if payload.content.trim().is_empty() {
        return response::bad_request("Service variant content is required");
    }
    if payload.price < 0.0 {
        return response::bad_request("Service variant price cannot be negative");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = service_variant::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        service_id: payload.service_id,
        content: payload.content,
        price: payload.price,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match ServiceVariantRepository::new(db).create(model).await {
        Ok(created) => {
            let message = format!("{} added successfully", created.id);
            response::ok(message, ServiceVariantResponse::from(created))
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/ServiceVariant/:id
pub async fn update_service_variant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceVariantRequest>,
) -> Response {
    if payload.content.trim().is_empty() {
        return response::bad_request("Service variant content is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = service_variant::Model {
        id,
        // service_id is not updatable; the repository keeps the stored value.
        service_id: Uuid::nil(),
        content: payload.content,
        price: payload.price,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match ServiceVariantRepository::new(db).update(model).await {
        Ok(updated) => response::ok(
            "Service variant updated",
            ServiceVariantResponse::from(updated),
        ),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/ServiceVariant/:id
pub async fn delete_service_variant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match ServiceVariantRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Service variant {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Service variant {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
