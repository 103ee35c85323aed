use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::entities::{camera, room, room_history};

pub const STATUS_CHECKED_IN: &str = "CheckedIn";
pub const STATUS_CHECKED_OUT: &str = "CheckedOut";

pub struct RoomHistoryRepository {
    db: DatabaseConnection,
}

impl RoomHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a stay. One open stay per room at a time; the room flips to
    /// In Use.
    pub async fn check_in(&self, input: room_history::Model) -> RepoResult<room_history::Model> {
        let room_row = room::Entity::find_by_id(input.room_id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Room",
                id: input.room_id,
            })?;
        if room_row.is_deleted {
            return Err(RepoError::Conflict(format!(
                "Room {} is deleted",
                input.room_id
            )));
        }

        let open = room_history::Entity::find()
            .filter(room_history::Column::RoomId.eq(input.room_id))
            .filter(room_history::Column::Status.eq(STATUS_CHECKED_IN))
            .count(&self.db)
            .await?;
        if open > 0 {
            return Err(RepoError::Conflict(format!(
                "Room {} already has an open stay",
                input.room_id
            )));
        }

        if let Some(camera_id) = input.camera_id {
            if camera::Entity::find_by_id(camera_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(RepoError::NotFound {
                    entity: "Camera",
                    id: camera_id,
                });
            }
        }

        let model = room_history::ActiveModel {
            id: Set(input.id),
            room_id: Set(input.room_id),
            booking_id: Set(input.booking_id),
            camera_id: Set(input.camera_id),
            check_in: Set(input.check_in),
            check_out: Set(None),
            status: Set(STATUS_CHECKED_IN.to_string()),
        };
        let created = model.insert(&self.db).await?;

        let mut occupied: room::ActiveModel = room_row.into();
        occupied.status = Set(room::RoomStatus::InUse);
        occupied.update(&self.db).await?;

        info!("room {} checked in ({})", created.room_id, created.id);
        Ok(created)
    }

    /// Closes a stay and frees the room. Rejected when the stay is already
    /// closed.
    pub async fn check_out(&self, id: Uuid) -> RepoResult<room_history::Model> {
        let history = room_history::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "RoomHistory",
                id,
            })?;
        if history.status == STATUS_CHECKED_OUT {
            return Err(RepoError::Conflict(format!("Stay {} is already closed", id)));
        }

        let room_id = history.room_id;
        let mut model: room_history::ActiveModel = history.into();
        model.check_out = Set(Some(chrono::Utc::now().naive_utc()));
        model.status = Set(STATUS_CHECKED_OUT.to_string());
        let closed = model.update(&self.db).await?;

        if let Some(room_row) = room::Entity::find_by_id(room_id).one(&self.db).await? {
            let mut freed: room::ActiveModel = room_row.into();
            freed.status = Set(room::RoomStatus::Free);
            freed.update(&self.db).await?;
        }

        info!("room {} checked out ({})", room_id, id);
        Ok(closed)
    }

    pub async fn list_by_room(&self, room_id: Uuid) -> RepoResult<Vec<room_history::Model>> {
        Ok(room_history::Entity::find()
            .filter(room_history::Column::RoomId.eq(room_id))
            .order_by_desc(room_history::Column::CheckIn)
            .all(&self.db)
            .await?)
    }

    pub async fn open_stays(&self) -> RepoResult<Vec<room_history::Model>> {
        Ok(room_history::Entity::find()
            .filter(room_history::Column::Status.eq(STATUS_CHECKED_IN))
            .order_by_asc(room_history::Column::CheckIn)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::room_type;
    use crate::repository::{test_util, RoomRepository, RoomTypeRepository};

    async fn seed_room(db: &DatabaseConnection) -> Uuid {
        let type_id = Uuid::new_v4();
        RoomTypeRepository::new(db.clone())
            .create(room_type::Model {
                id: type_id,
                name: format!("type-{}", type_id),
                price: 100_000.0,
                description: None,
                is_deleted: false,
            })
            .await
            .unwrap();
        let room_id = Uuid::new_v4();
        RoomRepository::new(db.clone())
            .create(room::Model {
                id: room_id,
                room_type_id: type_id,
                description: None,
                status: room::RoomStatus::Free,
                room_image: None,
                has_camera: false,
                is_deleted: false,
            })
            .await
            .unwrap();
        room_id
    }

    fn stay(room_id: Uuid) -> room_history::Model {
        room_history::Model {
            id: Uuid::new_v4(),
            room_id,
            booking_id: Uuid::new_v4(),
            camera_id: None,
            check_in: chrono::Utc::now().naive_utc(),
            check_out: None,
            status: STATUS_CHECKED_IN.to_string(),
        }
    }

    #[tokio::test]
    async fn check_in_marks_room_in_use_and_rejects_double_booking() {
        let db = test_util::connect().await;
        let repo = RoomHistoryRepository::new(db.clone());
        let room_repo = RoomRepository::new(db.clone());
        let room_id = seed_room(&db).await;

        repo.check_in(stay(room_id)).await.unwrap();
        assert_eq!(
            room_repo.get_by_id(room_id).await.unwrap().status,
            room::RoomStatus::InUse
        );

        assert!(matches!(
            repo.check_in(stay(room_id)).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn check_out_closes_the_stay_once() {
        let db = test_util::connect().await;
        let repo = RoomHistoryRepository::new(db.clone());
        let room_repo = RoomRepository::new(db.clone());
        let room_id = seed_room(&db).await;

        let opened = repo.check_in(stay(room_id)).await.unwrap();
        let closed = repo.check_out(opened.id).await.unwrap();
        assert_eq!(closed.status, STATUS_CHECKED_OUT);
        assert!(closed.check_out.is_some());
        assert_eq!(
            room_repo.get_by_id(room_id).await.unwrap().status,
            room::RoomStatus::Free
        );

        assert!(matches!(
            repo.check_out(opened.id).await,
            Err(RepoError::Conflict(_))
        ));
    }
}
