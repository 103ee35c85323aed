use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::medicine;

pub struct MedicineRepository {
    db: DatabaseConnection,
}

impl MedicineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: medicine::Model) -> RepoResult<medicine::Model> {
        if medicine::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Medicine {} already exists",
                input.id
            )));
        }
        if self.find_by_name(&input.name).await?.is_some() {
            return Err(RepoError::Conflict(format!(
                "Medicine name '{}' is already in use",
                input.name
            )));
        }

        let now = chrono::Utc::now().naive_utc();
        let model = medicine::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            description: Set(input.description),
            dosage: Set(input.dosage),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;
        info!("medicine created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: medicine::Model) -> RepoResult<medicine::Model> {
        let existing = medicine::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Medicine",
                id: input.id,
            })?;

        let mut model: medicine::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        model.dosage = Set(input.dosage);
        model.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, medicine::Entity, id)? {
            info!("medicine {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }
        if purge_deleted!(&self.db, medicine::Entity, id)? {
            info!("medicine {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "Medicine",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<medicine::Model>> {
        Ok(medicine::Entity::find()
            .filter(medicine::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<medicine::Model> {
        medicine::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Medicine",
                id,
            })
    }

    /// Case-insensitive name lookup.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<medicine::Model>> {
        Ok(medicine::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(medicine::Column::Name))).eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await?)
    }

    /// True when every id names a live medicine row.
    pub async fn all_active(&self, ids: &[Uuid]) -> RepoResult<bool> {
        if ids.is_empty() {
            return Ok(true);
        }
        let count = medicine::Entity::find()
            .filter(medicine::Column::Id.is_in(ids.to_vec()))
            .filter(medicine::Column::IsDeleted.eq(false))
            .count(&self.db)
            .await?;
        Ok(count as usize == ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_util;

    fn amoxicillin(id: Uuid) -> medicine::Model {
        medicine::Model {
            id,
            name: "Amoxicillin".to_string(),
            description: None,
            dosage: Some("250mg".to_string()),
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn duplicate_name_any_case_is_rejected() {
        let db = test_util::connect().await;
        let repo = MedicineRepository::new(db);
        repo.create(amoxicillin(Uuid::new_v4())).await.unwrap();

        let mut upper = amoxicillin(Uuid::new_v4());
        upper.name = "AMOXICILLIN".to_string();
        assert!(matches!(
            repo.create(upper).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn all_active_spots_deleted_ids() {
        let db = test_util::connect().await;
        let repo = MedicineRepository::new(db);
        let keep = Uuid::new_v4();
        repo.create(amoxicillin(keep)).await.unwrap();
        let mut other = amoxicillin(Uuid::new_v4());
        other.name = "Ibuprofen".to_string();
        let dropped = other.id;
        repo.create(other).await.unwrap();
        repo.delete(dropped).await.unwrap();

        assert!(repo.all_active(&[keep]).await.unwrap());
        assert!(!repo.all_active(&[keep, dropped]).await.unwrap());
        assert!(!repo.all_active(&[Uuid::new_v4()]).await.unwrap());
    }
}
