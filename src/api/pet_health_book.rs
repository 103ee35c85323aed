use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::pet_health_book::{self, MedicineIds};
use crate::repository::{DeleteOutcome, PetHealthBookRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CreatePetHealthBookRequest {
    pub id: Option<Uuid>,
    pub booking_service_item_id: Uuid,
    #[serde(default)]
    pub medicine_ids: Vec<Uuid>,
    pub visit_date: chrono::NaiveDateTime,
    pub next_visit_date: Option<chrono::NaiveDateTime>,
    pub performer: String,
}

#[derive(Deserialize)]
pub struct UpdatePetHealthBookRequest {
    #[serde(default)]
    pub medicine_ids: Vec<Uuid>,
    pub visit_date: chrono::NaiveDateTime,
    pub next_visit_date: Option<chrono::NaiveDateTime>,
    pub performer: String,
}

#[derive(Serialize)]
pub struct PetHealthBookResponse {
    pub id: Uuid,
    pub booking_service_item_id: Uuid,
    pub medicine_ids: Vec<Uuid>,
    pub visit_date: chrono::NaiveDateTime,
    pub next_visit_date: Option<chrono::NaiveDateTime>,
    pub performer: String,
    pub is_deleted: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<pet_health_book::Model> for PetHealthBookResponse {
    fn from(model: pet_health_book::Model) -> Self {
        Self {
            id: model.id,
            booking_service_item_id: model.booking_service_item_id,
            medicine_ids: model.medicine_ids.0,
            visit_date: model.visit_date,
            next_visit_date: model.next_visit_date,
            performer: model.performer,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// GET /api/PetHealthBook
pub async fn list_pet_health_books(Extension(db): Extension<DatabaseConnection>) -> Response {
    match PetHealthBookRepository::new(db).get_all().await {
        Ok(entries) if entries.is_empty() => response::not_found("No health book entries found"),
        Ok(entries) => {
            let data: Vec<PetHealthBookResponse> = entries.into_iter().map(Into::into).collect();
            response::ok("Health book entries retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/PetHealthBook/:id
pub async fn get_pet_health_book(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match PetHealthBookRepository::new(db).get_by_id(id).await {
        Ok(entry) => response::ok(
            "Health book entry retrieved",
            PetHealthBookResponse::from(entry),
        ),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/PetHealthBook/booking-item/:id
pub async fn list_by_booking_item(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match PetHealthBookRepository::new(db)
        .list_by_booking_item(id)
        .await
    {
        Ok(entries) if entries.is_empty() => {
            response::not_found("No health book entries for this booking item")
        }
        Ok(entries) => {
            let data: Vec<PetHealthBookResponse> = entries.into_iter().map(Into::into).collect();
            response::ok("Health book entries retrieved", data)
        }
        Err(e) => response::repo_error(e),
    }
}

// POST /api/PetHealthBook
pub async fn create_pet_health_book(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreatePetHealthBookRequest>,
) -> Response {
    if payload.performer.trim().is_empty() {
        return response::bad_request("Performer name is required");
    }

    let now = chrono::Utc::now().naive_utc();
    let model = pet_health_book::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        booking_service_item_id: payload.booking_service_item_id,
        medicine_ids: MedicineIds(payload.medicine_ids),
        visit_date: payload.visit_date,
        next_visit_date: payload.next_visit_date,
        performer: payload.performer,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    match PetHealthBookRepository::new(db).create(model).await {
        Ok(created) => {
            tracing::Span::current()
                .record("table", "pet_health_books")
                .record("action", "create_health_book_entry")
                .record("business_event", "Health book entry created");
            let message = format!("{} added successfully", created.id);
            response::ok(message, PetHealthBookResponse::from(created))
        }
        Err(e) => response::repo_error(e),
    }
}

// PUT /api/PetHealthBook/:id
pub async fn update_pet_health_book(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePetHealthBookRequest>,
) -> Response {
    if payload.performer.trim().is_empty() {
        return response::bad_request("Performer name is required");
    }

    let repo = PetHealthBookRepository::new(db);
    let existing = match repo.get_by_id(id).await {
        Ok(entry) => entry,
        Err(e) => return response::repo_error(e),
    };

    let model = pet_health_book::Model {
        id,
        booking_service_item_id: existing.booking_service_item_id,
        medicine_ids: MedicineIds(payload.medicine_ids),
        visit_date: payload.visit_date,
        next_visit_date: payload.next_visit_date,
        performer: payload.performer,
        is_deleted: existing.is_deleted,
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    };

    match repo.update(model).await {
        Ok(updated) => response::ok(
            "Health book entry updated",
            PetHealthBookResponse::from(updated),
        ),
        Err(e) => response::repo_error(e),
    }
}

// DELETE /api/PetHealthBook/:id
pub async fn delete_pet_health_book(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match PetHealthBookRepository::new(db).delete(id).await {
        Ok(DeleteOutcome::SoftDeleted) => {
            response::ok(format!("Health book entry {} marked as deleted", id), id)
        }
        Ok(DeleteOutcome::Removed) => {
            response::ok(format!("Health book entry {} permanently removed", id), id)
        }
        Err(e) => response::repo_error(e),
    }
}
