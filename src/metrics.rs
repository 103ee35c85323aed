use crate::entities::{camera, room, room_history, service};
use crate::repository::room_history::STATUS_CHECKED_IN;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

pub async fn init_metrics(db: &DatabaseConnection) {
    let room_count = room::Entity::find()
        .filter(room::Column::IsDeleted.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("petharbor_rooms_total").set(room_count as f64);

    let service_count = service::Entity::find()
        .filter(service::Column::IsDeleted.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("petharbor_services_total").set(service_count as f64);

    let camera_count = camera::Entity::find()
        .filter(camera::Column::IsDeleted.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("petharbor_cameras_total").set(camera_count as f64);

    let open_stays = room_history::Entity::find()
        .filter(room_history::Column::Status.eq(STATUS_CHECKED_IN))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("petharbor_open_stays_total").set(open_stays as f64);

    tracing::info!(
        "Initialized metrics: Rooms={}, Services={}, Cameras={}, OpenStays={}",
        room_count,
        service_count,
        camera_count,
        open_stays
    );
}
