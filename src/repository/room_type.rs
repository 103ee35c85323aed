use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::{room, room_type};

pub struct RoomTypeRepository {
    db: DatabaseConnection,
}

impl RoomTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: room_type::Model) -> RepoResult<room_type::Model> {
        if room_type::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Room type {} already exists",
                input.id
            )));
        }
        if self.name_taken(&input.name).await? {
            return Err(RepoError::Conflict(format!(
                "Room type name '{}' is already in use",
                input.name
            )));
        }

        let model = room_type::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            price: Set(input.price),
            description: Set(input.description),
            is_deleted: Set(false),
        };
        let created = model.insert(&self.db).await?;
        info!("room type created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: room_type::Model) -> RepoResult<room_type::Model> {
        let existing = room_type::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "RoomType",
                id: input.id,
            })?;

        let mut model: room_type::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.price = Set(input.price);
        model.description = Set(input.description);
        Ok(model.update(&self.db).await?)
    }

    /// Soft phase cascades to every room of this type; hard phase is blocked
    /// while any room row still references it.
    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, room_type::Entity, id)? {
            let cascaded = room::Entity::update_many()
                .col_expr(room::Column::IsDeleted, Expr::value(true))
                .filter(room::Column::RoomTypeId.eq(id))
                .exec(&self.db)
                .await?;
            info!(
                "room type {} soft-deleted, {} rooms cascaded",
                id, cascaded.rows_affected
            );
            return Ok(DeleteOutcome::SoftDeleted);
        }

        if self.room_count(id).await? > 0 {
            return Err(RepoError::DependentsExist {
                entity: "RoomType",
                dependents: "rooms",
            });
        }

        if purge_deleted!(&self.db, room_type::Entity, id)? {
            info!("room type {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "RoomType",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<room_type::Model>> {
        Ok(room_type::Entity::find()
            .filter(room_type::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<room_type::Model> {
        room_type::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "RoomType",
                id,
            })
    }

    /// Rooms referencing this type, soft-deleted ones included.
    pub async fn room_count(&self, id: Uuid) -> RepoResult<u64> {
        Ok(room::Entity::find()
            .filter(room::Column::RoomTypeId.eq(id))
            .count(&self.db)
            .await?)
    }

    /// Case-insensitive name lookup.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<room_type::Model>> {
        Ok(room_type::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(room_type::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await?)
    }

    async fn name_taken(&self, name: &str) -> RepoResult<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_util;

    fn deluxe(id: Uuid) -> room_type::Model {
        room_type::Model {
            id,
            name: "Deluxe".to_string(),
            price: 500_000.0,
            description: None,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let db = test_util::connect().await;
        let repo = RoomTypeRepository::new(db);
        let id = Uuid::new_v4();

        repo.create(deluxe(id)).await.unwrap();
        let mut again = deluxe(id);
        again.name = "Other".to_string();
        assert!(matches!(
            repo.create(again).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name_case_insensitively() {
        let db = test_util::connect().await;
        let repo = RoomTypeRepository::new(db);

        repo.create(deluxe(Uuid::new_v4())).await.unwrap();
        let mut lower = deluxe(Uuid::new_v4());
        lower.name = "deluxe".to_string();
        assert!(matches!(
            repo.create(lower).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn delete_is_soft_then_hard() {
        let db = test_util::connect().await;
        let repo = RoomTypeRepository::new(db.clone());
        let id = Uuid::new_v4();
        repo.create(deluxe(id)).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::SoftDeleted);
        let row = repo.get_by_id(id).await.unwrap();
        assert!(row.is_deleted);

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::Removed);
        assert!(matches!(
            repo.get_by_id(id).await,
            Err(RepoError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn soft_delete_cascades_to_rooms_and_hard_delete_is_blocked() {
        let db = test_util::connect().await;
        let repo = RoomTypeRepository::new(db.clone());
        let type_id = Uuid::new_v4();
        repo.create(deluxe(type_id)).await.unwrap();

        let room_repo = crate::repository::RoomRepository::new(db.clone());
        let room_id = Uuid::new_v4();
        room_repo
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

        assert_eq!(
            repo.delete(type_id).await.unwrap(),
            DeleteOutcome::SoftDeleted
        );
        let cascaded = room_repo.get_by_id(room_id).await.unwrap();
        assert!(cascaded.is_deleted);

        // Second delete would purge, but the room row still exists.
        assert!(matches!(
            repo.delete(type_id).await,
            Err(RepoError::DependentsExist { .. })
        ));
        assert!(repo.get_by_id(type_id).await.unwrap().is_deleted);

        // Once the room is gone the type can be purged.
        room_repo.delete(room_id).await.unwrap();
        assert_eq!(repo.delete(type_id).await.unwrap(), DeleteOutcome::Removed);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let db = test_util::connect().await;
        let repo = RoomTypeRepository::new(db);
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound { .. })
        ));
    }
}
