use axum::{
    extract::{Extension, Path},
    response::Response,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::repository::BookingServiceItemRepository;
use crate::response;

// GET /api/BookingServiceItems/:id
pub async fn get_booking_service_item(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Response {
    match BookingServiceItemRepository::new(db).get_by_id(id).await {
        Ok(item) => response::ok("Booking service item retrieved", item),
        Err(e) => response::repo_error(e),
    }
}

// GET /api/BookingServiceItems/booking/:booking_id
pub async fn list_items_by_booking(
    Extension(db): Extension<DatabaseConnection>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    match BookingServiceItemRepository::new(db)
        .list_by_booking(booking_id)
        .await
    {
        Ok(items) if items.is_empty() => {
            response::not_found("No booking service items for this booking")
        }
        Ok(items) => response::ok("Booking service items retrieved", items),
        Err(e) => response::repo_error(e),
    }
}
