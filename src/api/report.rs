use axum::{extract::Extension, response::Response};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{booking_service_item, room, service_variant};
use crate::response;

#[derive(Serialize)]
pub struct RoomStatusReport {
    pub total: u64,
    pub free: u64,
    pub in_use: u64,
    pub maintenance: u64,
}

#[derive(Serialize)]
pub struct VariantUsage {
    pub service_variant_id: Uuid,
    pub content: String,
    pub booking_count: u64,
}

// GET /api/ReportFacility/room-status
pub async fn room_status(Extension(db): Extension<DatabaseConnection>) -> Response {
    let live = room::Entity::find().filter(room::Column::IsDeleted.eq(false));

    let total = match live.clone().count(&db).await {
        Ok(n) => n,
        Err(e) => return response::repo_error(e.into()),
    };
    let free = match live
        .clone()
        .filter(room::Column::Status.eq(room::RoomStatus::Free))
        .count(&db)
        .await
    {
        Ok(n) => n,
        Err(e) => return response::repo_error(e.into()),
    };
    let in_use = match live
        .clone()
        .filter(room::Column::Status.eq(room::RoomStatus::InUse))
        .count(&db)
        .await
    {
        Ok(n) => n,
        Err(e) => return response::repo_error(e.into()),
    };
    let maintenance = match live
        .filter(room::Column::Status.eq(room::RoomStatus::Maintenance))
        .count(&db)
        .await
    {
        Ok(n) => n,
        Err(e) => return response::repo_error(e.into()),
    };

    response::ok(
        "Room status report",
        RoomStatusReport {
            total,
            free,
            in_use,
            maintenance,
        },
    )
}

// GET /api/ReportFacility/service-usage
pub async fn service_usage(Extension(db): Extension<DatabaseConnection>) -> Response {
    let variants = match service_variant::Entity::find()
        .filter(service_variant::Column::IsDeleted.eq(false))
        .all(&db)
        .await
    {
        Ok(v) => v,
        Err(e) => return response::repo_error(e.into()),
    };

    // Variant cardinality is small; a count per variant keeps this simple.
    let mut usage = Vec::with_capacity(variants.len());
    for variant in variants {
        let booking_count = match booking_service_item::Entity::find()
            .filter(booking_service_item::Column::ServiceVariantId.eq(variant.id))
            .count(&db)
            .await
        {
            Ok(n) => n,
            Err(e) => return response::repo_error(e.into()),
        };
        usage.push(VariantUsage {
            service_variant_id: variant.id,
            content: variant.content,
            booking_count,
        });
    }

    response::ok("Service usage report", usage)
}
