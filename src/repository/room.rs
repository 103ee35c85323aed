use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::{room, room_history, room_type};

pub struct RoomRepository {
    db: DatabaseConnection,
}

impl RoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: room::Model) -> RepoResult<room::Model> {
        if room::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Room {} already exists",
                input.id
            )));
        }
        self.require_active_type(input.room_type_id).await?;

        let model = room::ActiveModel {
            id: Set(input.id),
            room_type_id: Set(input.room_type_id),
            description: Set(input.description),
            status: Set(input.status),
            room_image: Set(input.room_image),
            has_camera: Set(input.has_camera),
            is_deleted: Set(false),
        };
        let created = model.insert(&self.db).await?;
        info!("room created: {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, input: room::Model) -> RepoResult<room::Model> {
        let existing = room::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Room",
                id: input.id,
            })?;
        self.require_active_type(input.room_type_id).await?;

        let mut model: room::ActiveModel = existing.into();
        model.room_type_id = Set(input.room_type_id);
        model.description = Set(input.description);
        model.status = Set(input.status);
        model.has_camera = Set(input.has_camera);
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, room::Entity, id)? {
            info!("room {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }

        let histories = room_history::Entity::find()
            .filter(room_history::Column::RoomId.eq(id))
            .count(&self.db)
            .await?;
        if histories > 0 {
            return Err(RepoError::DependentsExist {
                entity: "Room",
                dependents: "room histories",
            });
        }

        if purge_deleted!(&self.db, room::Entity, id)? {
            info!("room {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound { entity: "Room", id })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<room::Model>> {
        Ok(room::Entity::find()
            .filter(room::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<room::Model> {
        room::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound { entity: "Room", id })
    }

    /// Free, live rooms whose type is itself live.
    pub async fn list_available(&self) -> RepoResult<Vec<room::Model>> {
        Ok(room::Entity::find()
            .join(JoinType::InnerJoin, room::Relation::RoomType.def())
            .filter(room::Column::Status.eq(room::RoomStatus::Free))
            .filter(room::Column::IsDeleted.eq(false))
            .filter(room_type::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    /// Stores the new image path and hands back the one it replaced so the
    /// caller can unlink the old file.
    pub async fn set_image(&self, id: Uuid, path: String) -> RepoResult<Option<String>> {
        let existing = room::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound { entity: "Room", id })?;
        let previous = existing.room_image.clone();

        let mut model: room::ActiveModel = existing.into();
        model.room_image = Set(Some(path));
        model.update(&self.db).await?;
        Ok(previous)
    }

    async fn require_active_type(&self, room_type_id: Uuid) -> RepoResult<()> {
        match room_type::Entity::find_by_id(room_type_id)
            .one(&self.db)
            .await?
        {
            Some(rt) if !rt.is_deleted => Ok(()),
            Some(_) => Err(RepoError::Conflict(format!(
                "Room type {} is deleted",
                room_type_id
            ))),
            None => Err(RepoError::NotFound {
                entity: "RoomType",
                id: room_type_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{test_util, RoomTypeRepository};

    async fn seed_type(db: &DatabaseConnection) -> Uuid {
        let id = Uuid::new_v4();
        RoomTypeRepository::new(db.clone())
            .create(room_type::Model {
                id,
                name: format!("type-{}", id),
                price: 100_000.0,
                description: None,
                is_deleted: false,
            })
            .await
            .unwrap();
        id
    }

    fn free_room(id: Uuid, type_id: Uuid) -> room::Model {
        room::Model {
            id,
            room_type_id: type_id,
            description: Some("ground floor".to_string()),
            status: room::RoomStatus::Free,
            room_image: None,
            has_camera: false,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn create_requires_live_room_type() {
        let db = test_util::connect().await;
        let repo = RoomRepository::new(db.clone());

        let missing = repo
            .create(free_room(Uuid::new_v4(), Uuid::new_v4()))
            .await;
        assert!(matches!(missing, Err(RepoError::NotFound { .. })));

        let type_id = seed_type(&db).await;
        RoomTypeRepository::new(db.clone())
            .delete(type_id)
            .await
            .unwrap();
        let deleted_type = repo.create(free_room(Uuid::new_v4(), type_id)).await;
        assert!(matches!(deleted_type, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_twice_removes_the_row() {
        let db = test_util::connect().await;
        let repo = RoomRepository::new(db.clone());
        let type_id = seed_type(&db).await;
        let id = Uuid::new_v4();
        repo.create(free_room(id, type_id)).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::SoftDeleted);
        assert!(repo.get_by_id(id).await.unwrap().is_deleted);
        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::Removed);
        assert!(matches!(
            repo.get_by_id(id).await,
            Err(RepoError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_available_skips_busy_and_deleted_rooms() {
        let db = test_util::connect().await;
        let repo = RoomRepository::new(db.clone());
        let type_id = seed_type(&db).await;

        let free_id = Uuid::new_v4();
        repo.create(free_room(free_id, type_id)).await.unwrap();

        let mut busy = free_room(Uuid::new_v4(), type_id);
        busy.status = room::RoomStatus::InUse;
        repo.create(busy).await.unwrap();

        let gone_id = Uuid::new_v4();
        repo.create(free_room(gone_id, type_id)).await.unwrap();
        repo.delete(gone_id).await.unwrap();

        let available = repo.list_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, free_id);
    }

    #[tokio::test]
    async fn set_image_returns_replaced_path() {
        let db = test_util::connect().await;
        let repo = RoomRepository::new(db.clone());
        let type_id = seed_type(&db).await;
        let id = Uuid::new_v4();
        repo.create(free_room(id, type_id)).await.unwrap();

        let first = repo
            .set_image(id, "Images/a.png".to_string())
            .await
            .unwrap();
        assert_eq!(first, None);
        let second = repo
            .set_image(id, "Images/b.png".to_string())
            .await
            .unwrap();
        assert_eq!(second.as_deref(), Some("Images/a.png"));
        assert_eq!(
            repo.get_by_id(id).await.unwrap().room_image.as_deref(),
            Some("Images/b.png")
        );
    }
}
