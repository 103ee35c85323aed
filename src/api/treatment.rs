use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::treatment;
use crate::repository::{DeleteOutcome, TreatmentRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateTreatmentRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTreatmentRequest {
    pub name: String,
    pub description: Option<String>,
}

// GET /api/Treatment
pub async fn list_treatments(Extension(db): Extension<DatabaseConnection>) -> Response {
    match TreatmentRepository::new(db).get_all().await {
        Ok(treatments) if treatments.is_empty() => response::not_found("No treatments found"),
        Ok(treatments) => response::ok("Treatments retrieved", treatments),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Treatment/:id
pub async fn get_treatment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match TreatmentRepository::new(db).get_by_id(id).await {
        Ok(treatment) => response::ok("Treatment retrieved", treatment),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Treatment
pub async fn create_treatment(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateTreatmentRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Treatment name is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = treatment::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        name: payload.name,
        description: payload.description,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match TreatmentRepository::new(db).create(model).await {
        Ok(created) => {
            let message = format!("{} added successfully", created.id);
            response::ok(message, created)
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/Treatment/:id
pub async fn update_treatment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTreatmentRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Treatment name is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = treatment::Model {
        id,
        name: payload.name,
        description: payload.description,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match TreatmentRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Treatment updated", updated),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/Treatment/:id
pub async fn delete_treatment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match TreatmentRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Treatment {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Treatment {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
