use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::{service, service_type};

pub struct ServiceTypeRepository {
    db: DatabaseConnection,
}

impl ServiceTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: service_type::Model) -> RepoResult<service_type::Model> {
        if service_type::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Service type {} already exists",
                input.id
            )));
        }
        if self.name_taken(&input.name).await? {
            return Err(RepoError::Conflict(format!(
                "Service type name '{}' is already in use",
                input.name
            )));
        }

        let model = service_type::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            description: Set(input.description),
            is_deleted: Set(false),
        };
        let created = model.insert(&self.db).await?;
        info!("service type created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: service_type::Model) -> RepoResult<service_type::Model> {
        let existing = service_type::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "ServiceType",
                id: input.id,
            })?;

        let mut model: service_type::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, service_type::Entity, id)? {
            let cascaded = service::Entity::update_many()
                .col_expr(service::Column::IsDeleted, Expr::value(true))
                .filter(service::Column::ServiceTypeId.eq(id))
                .exec(&self.db)
                .await?;
            info!(
                "service type {} soft-deleted, {} services cascaded",
                id, cascaded.rows_affected
            );
            return Ok(DeleteOutcome::SoftDeleted);
        }

        let services = service::Entity::find()
            .filter(service::Column::ServiceTypeId.eq(id))
            .count(&self.db)
            .await?;
        if services > 0 {
            return Err(RepoError::DependentsExist {
                entity: "ServiceType",
                dependents: "services",
            });
        }

        if purge_deleted!(&self.db, service_type::Entity, id)? {
            info!("service type {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "ServiceType",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<service_type::Model>> {
        Ok(service_type::Entity::find()
            .filter(service_type::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<service_type::Model> {
        service_type::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "ServiceType",
                id,
            })
    }

    /// Case-insensitive name lookup.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<service_type::Model>> {
        Ok(service_type::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(service_type::Column::Name)))
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

    fn grooming(id: Uuid) -> service_type::Model {
        service_type::Model {
            id,
            name: "Grooming".to_string(),
            description: None,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn name_uniqueness_ignores_case() {
        let db = test_util::connect().await;
        let repo = ServiceTypeRepository::new(db);
        repo.create(grooming(Uuid::new_v4())).await.unwrap();

        let mut upper = grooming(Uuid::new_v4());
        upper.name = "GROOMING".to_string();
        assert!(matches!(
            repo.create(upper).await,
            Err(RepoError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn two_phase_delete_without_children() {
        let db = test_util::connect().await;
        let repo = ServiceTypeRepository::new(db);
        let id = Uuid::new_v4();
        repo.create(grooming(id)).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::SoftDeleted);
        assert_eq!(repo.delete(id).await.unwrap(), DeleteOutcome::Removed);
    }
}
