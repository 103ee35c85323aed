use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::camera;

pub struct CameraRepository {
    db: DatabaseConnection,
}

impl CameraRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: camera::Model) -> RepoResult<camera::Model> {
        if camera::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Camera {} already exists",
                input.id
            )));
        }
        let code_taken = camera::Entity::find()
            .filter(camera::Column::Code.eq(input.code.clone()))
            .count(&self.db)
            .await?;
        if code_taken > 0 {
            return Err(RepoError::Conflict(format!(
                "Camera code '{}' is already in use",
                input.code
            )));
        }

        let model = camera::ActiveModel {
            id: Set(input.id),
            camera_type: Set(input.camera_type),
            code: Set(input.code),
            status: Set(input.status),
            rtsp_url: Set(input.rtsp_url),
            address: Set(input.address),
            is_deleted: Set(false),
        };
        let created = model.insert(&self.db).await?;
        info!("camera created: {} ({})", created.code, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: camera::Model) -> RepoResult<camera::Model> {
        let existing = camera::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Camera",
                id: input.id,
            })?;

        let mut model: camera::ActiveModel = existing.into();
        model.camera_type = Set(input.camera_type);
        model.code = Set(input.code);
        model.status = Set(input.status);
        model.rtsp_url = Set(input.rtsp_url);
        model.address = Set(input.address);
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, camera::Entity, id)? {
            info!("camera {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }
        if purge_deleted!(&self.db, camera::Entity, id)? {
            info!("camera {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "Camera",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<camera::Model>> {
        Ok(camera::Entity::find()
            .filter(camera::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<camera::Model> {
        camera::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Camera",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_util;

    fn cam(id: Uuid, code: &str) -> camera::Model {
        camera::Model {
            id,
            camera_type: "IP".to_string(),
            code: code.to_string(),
            status: "Active".to_string(),
            rtsp_url: "rtsp://cam.local/stream".to_string(),
            address: None,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code() {
        let db = test_util::connect().await;
        let repo = CameraRepository::new(db);
        repo.create(cam(Uuid::new_v4(), "CAM-01")).await.unwrap();
        assert!(matches!(
            repo.create(cam(Uuid::new_v4(), "CAM-01")).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn delete_is_soft_then_hard() {
        let db = test_util::connect().await;
        let repo = CameraRepository::new(db);
        let id = Uuid::new_v4();
        repo.create(cam(id, "CAM-02")).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::SoftDeleted);
        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::Removed);
        assert!(matches!(
            repo.delete(id).await,
            Err(RepoError::NotFound { .. })
        ));
    }
}
