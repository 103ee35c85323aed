use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::treatment;

pub struct TreatmentRepository {
    db: DatabaseConnection,
}

impl TreatmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: treatment::Model) -> RepoResult<treatment::Model> {
        if treatment::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Treatment {} already exists",
                input.id
            )));
        }

        let now = chrono::Utc::now().naive_utc();
        let model = treatment::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            description: Set(input.description),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;
        info!("treatment created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: treatment::Model) -> RepoResult<treatment::Model> {
        let existing = treatment::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Treatment",
                id: input.id,
            })?;

        let mut model: treatment::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        model.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, treatment::Entity, id)? {
            info!("treatment {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }
        if purge_deleted!(&self.db, treatment::Entity, id)? {
            info!("treatment {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "Treatment",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<treatment::Model>> {
        Ok(treatment::Entity::find()
            .filter(treatment::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<treatment::Model> {
        treatment::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Treatment",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_util;

    #[tokio::test]
    async fn create_then_double_delete() {
        let db = test_util::connect().await;
        let repo = TreatmentRepository::new(db);
        let id = Uuid::new_v4();
        repo.create(treatment::Model {
            id,
            name: "Deworming".to_string(),
            description: None,
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        })
        .await
        .unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::SoftDeleted);
        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::Removed);
    }
}
