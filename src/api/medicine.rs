use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::medicine;
use crate::repository::{DeleteOutcome, MedicineRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreateMedicineRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub dosage: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMedicineRequest {
    pub name: String,
    pub description: Option<String>,
    pub dosage: Option<String>,
}

// GET /api/Medicine
pub async fn list_medicines(Extension(db): Extension<DatabaseConnection>) -> Response {
    match MedicineRepository::new(db).get_all().await {
        Ok(medicines) if medicines.is_empty() => response::not_found("No medicines found"),
        Ok(medicines) => response::ok("Medicines retrieved", medicines),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/Medicine/:id
pub async fn get_medicine(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match MedicineRepository::new(db).get_by_id(id).await {
        Ok(medicine) => response::ok("Medicine retrieved", medicine),
        Err(e) => response::repo_error(e),
    }
}

// POST /api/Medicine
pub async fn create_medicine(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateMedicineRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Medicine name is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = medicine::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        name: payload.name,
        description: payload.description,
        dosage: payload.dosage,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match MedicineRepository::new(db).create(model).await {
        Ok(created) => {
            let message = format!("{} added successfully", created.id);
            response::ok(message, created)
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/Medicine/:id
pub async fn update_medicine(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMedicineRequest>,
) -> Response {
    if payload.name.trim().is_empty() {
        return response::bad_request("Medicine name is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = medicine::Model {
        id,
        name: payload.name,
        description: payload.description,
        dosage: payload.dosage,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match MedicineRepository::new(db).update(model).await {
        Ok(updated) => response::ok("Medicine updated", updated),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/Medicine/:id
pub async fn delete_medicine(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match MedicineRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Medicine {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Medicine {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
