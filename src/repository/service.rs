use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::{service, service_type, service_variant};

pub struct ServiceRepository {
    db: DatabaseConnection,
}

impl ServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: service::Model) -> RepoResult<service::Model> {
        if service::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Service {} already exists",
                input.id
            )));
        }
        self.require_active_type(input.service_type_id).await?;
        if self.name_taken(&input.name).await? {
            return Err(RepoError::Conflict(format!(
                "Service name '{}' is already in use",
                input.name
            )));
        }

        let model = service::ActiveModel {
            id: Set(input.id),
            service_type_id: Set(input.service_type_id),
            name: Set(input.name),
            description: Set(input.description),
            service_image: Set(input.service_image),
            is_deleted: Set(false),
        };
        let created = model.insert(&self.db).await?;
        info!("service created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, input: service::Model) -> RepoResult<service::Model> {
        let existing = service::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Service",
                id: input.id,
            })?;
        self.require_active_type(input.service_type_id).await?;

        let mut model: service::ActiveModel = existing.into();
        model.service_type_id = Set(input.service_type_id);
        model.name = Set(input.name);
        model.description = Set(input.description);
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, service::Entity, id)? {
            let cascaded = service_variant::Entity::update_many()
                .col_expr(service_variant::Column::IsDeleted, Expr::value(true))
                .filter(service_variant::Column::ServiceId.eq(id))
                .exec(&self.db)
                .await?;
            info!(
                "service {} soft-deleted, {} variants cascaded",
                id, cascaded.rows_affected
            );
            return Ok(DeleteOutcome::SoftDeleted);
        }

        if self.has_variant(id).await? {
            return Err(RepoError::DependentsExist {
                entity: "Service",
                dependents: "service variants",
            });
        }

        if purge_deleted!(&self.db, service::Entity, id)? {
            info!("service {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "Service",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<service::Model>> {
        Ok(service::Entity::find()
            .filter(service::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<service::Model> {
        service::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Service",
                id,
            })
    }

    /// Any variant row, soft-deleted ones included.
    pub async fn has_variant(&self, id: Uuid) -> RepoResult<bool> {
        let count = service_variant::Entity::find()
            .filter(service_variant::Column::ServiceId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn set_image(&self, id: Uuid, path: String) -> RepoResult<Option<String>> {
        let existing = service::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "Service",
                id,
            })?;
        let previous = existing.service_image.clone();

        let mut model: service::ActiveModel = existing.into();
        model.service_image = Set(Some(path));
        model.update(&self.db).await?;
        Ok(previous)
    }

    async fn require_active_type(&self, service_type_id: Uuid) -> RepoResult<()> {
        match service_type::Entity::find_by_id(service_type_id)
            .one(&self.db)
            .await?
        {
            Some(st) if !st.is_deleted => Ok(()),
            Some(_) => Err(RepoError::Conflict(format!(
                "Service type {} is deleted",
                service_type_id
            ))),
            None => Err(RepoError::NotFound {
                entity: "ServiceType",
                id: service_type_id,
            }),
        }
    }

    /// Case-insensitive name lookup.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<service::Model>> {
        Ok(service::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(service::Column::Name))).eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await?)
    }

    async fn name_taken(&self, name: &str) -> RepoResult<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}
