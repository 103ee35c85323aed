use axum::{
    extract::{Extension, Path},
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::room_history;
use crate::repository::{room_history::STATUS_CHECKED_IN, RoomHistoryRepository};
use crate::response;

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub id: Option<Uuid>,
    pub room_id: Uuid,
    pub booking_id: Uuid,
    pub camera_id: Option<Uuid>,
    pub check_in: Option<chrono::NaiveDateTime>,
}

// POST /api/RoomHistory/checkin
pub async fn check_in(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CheckInRequest>,
) -> Response {
    let model = room_history::Model {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        room_id: payload.room_id,
        booking_id: payload.booking_id,
        camera_id: payload.camera_id,
        check_in: payload
            .check_in
            .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
        check_out: None,
        status: STATUS_CHECKED_IN.to_string(),
    };

    match RoomHistoryRepository::new(db).check_in(model).await {
        Ok(created) => {
            tracing::Span::current()
                .record("table", "room_histories")
                .record("action", "check_in")
                .record("business_event", "Room checked in");
            metrics::counter!("petharbor_check_ins_total").increment(1);
            response::ok("Checked in", created)
        }
        Err(e) => response::repo_error(e),
    }
}

// POST /api/RoomHistory/:id/checkout
pub async fn check_out(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match RoomHistoryRepository::new(db).check_out(id).await {
        Ok(closed) => {
            metrics::counter!("petharbor_check_outs_total").increment(1);
            response::ok("Checked out", closed)
        }
        Err(e) => response::repo_error(e),
    }
}

// GET /api/RoomHistory/room/:room_id
pub async fn list_by_room(
    Extension(db): Extension<DatabaseConnection>,
    Path(room_id): Path<Uuid>,
) -> Response {
    match RoomHistoryRepository::new(db).list_by_room(room_id).await {
        Ok(histories) if histories.is_empty() => {
            response::not_found("No room history for this room")
        }
        Ok(histories) => response::ok("Room history retrieved", histories),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/RoomHistory/open
pub async fn list_open_stays(Extension(db): Extension<DatabaseConnection>) -> Response {
    match RoomHistoryRepository::new(db).open_stays().await {
        Ok(stays) if stays.is_empty() => response::not_found("No open stays"),
        Ok(stays) => response::ok("Open stays retrieved", stays),
        Err(e) => response::repo_error(e),
    }
}
