use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::{mark_deleted, purge_deleted, DeleteOutcome, RepoError, RepoResult};
use crate::entities::{booking_service_item, service, service_variant};

pub struct ServiceVariantRepository {
    db: DatabaseConnection,
}

impl ServiceVariantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: service_variant::Model) -> RepoResult<service_variant::Model> {
        if service_variant::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Service variant {} already exists",
                input.id
            )));
        }
        self.require_active_service(input.service_id).await?;

        let now = chrono::Utc::now().naive_utc();
        let model = service_variant::ActiveModel {
            id: Set(input.id),
            service_id: Set(input.service_id),
            content: Set(input.content),
            price: Set(input.price),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;
        info!("service variant created: {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, input: service_variant::Model) -> RepoResult<service_variant::Model> {
        let existing = service_variant::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "ServiceVariant",
                id: input.id,
            })?;

        let mut model: service_variant::ActiveModel = existing.into();
        model.content = Set(input.content);
        model.price = Set(input.price);
        model.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(model.update(&self.db).await?)
    }

    /// Hard phase is blocked while any booking item references the variant.
    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, service_variant::Entity, id)? {
            info!("service variant {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }

        if self.variant_has_booking(id).await? {
            return Err(RepoError::DependentsExist {
                entity: "ServiceVariant",
                dependents: "booking service items",
            });
        }

        if purge_deleted!(&self.db, service_variant::Entity, id)? {
            info!("service variant {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "ServiceVariant",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<service_variant::Model>> {
        Ok(service_variant::Entity::find()
            .filter(service_variant::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<service_variant::Model> {
        service_variant::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "ServiceVariant",
                id,
            })
    }

    pub async fn list_by_service(&self, service_id: Uuid) -> RepoResult<Vec<service_variant::Model>> {
        Ok(service_variant::Entity::find()
            .filter(service_variant::Column::ServiceId.eq(service_id))
            .filter(service_variant::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?)
    }

    pub async fn variant_has_booking(&self, id: Uuid) -> RepoResult<bool> {
        let count = booking_service_item::Entity::find()
            .filter(booking_service_item::Column::ServiceVariantId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn require_active_service(&self, service_id: Uuid) -> RepoResult<()> {
        match service::Entity::find_by_id(service_id).one(&self.db).await? {
            Some(s) if !s.is_deleted => Ok(()),
            Some(_) => Err(RepoError::Conflict(format!(
                "Service {} is deleted",
                service_id
            ))),
            None => Err(RepoError::NotFound {
                entity: "Service",
                id: service_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{test_util, ServiceRepository, ServiceTypeRepository};
    use crate::entities::service_type;

    async fn seed_service(db: &DatabaseConnection) -> Uuid {
        let type_id = Uuid::new_v4();
        ServiceTypeRepository::new(db.clone())
            .create(service_type::Model {
                id: type_id,
                name: format!("type-{}", type_id),
                description: None,
                is_deleted: false,
            })
            .await
            .unwrap();
        let service_id = Uuid::new_v4();
        ServiceRepository::new(db.clone())
            .create(service::Model {
                id: service_id,
                service_type_id: type_id,
                name: format!("svc-{}", service_id),
                description: None,
                service_image: None,
                is_deleted: false,
            })
            .await
            .unwrap();
        service_id
    }

    fn variant(id: Uuid, service_id: Uuid) -> service_variant::Model {
        service_variant::Model {
            id,
            service_id,
            content: "Under 5kg".to_string(),
            price: 120_000.0,
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn hard_delete_blocked_while_booked() {
        let db = test_util::connect().await;
        let repo = ServiceVariantRepository::new(db.clone());
        let service_id = seed_service(&db).await;
        let variant_id = Uuid::new_v4();
        repo.create(variant(variant_id, service_id)).await.unwrap();

        booking_service_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(Uuid::new_v4()),
            pet_id: Set(Uuid::new_v4()),
            service_variant_id: Set(variant_id),
        }
        .insert(&db)
        .await
        .unwrap();

        assert_eq!(
            repo.delete(variant_id).await.unwrap(),
            DeleteOutcome::SoftDeleted
        );
        assert!(matches!(
            repo.delete(variant_id).await,
            Err(RepoError::DependentsExist { .. })
        ));
        // Row is still there, still soft-deleted.
        assert!(repo.get_by_id(variant_id).await.unwrap().is_deleted);
    }

    #[tokio::test]
    async fn list_by_service_excludes_soft_deleted() {
        let db = test_util::connect().await;
        let repo = ServiceVariantRepository::new(db.clone());
        let service_id = seed_service(&db).await;

        let keep = Uuid::new_v4();
        repo.create(variant(keep, service_id)).await.unwrap();
        let drop = Uuid::new_v4();
        repo.create(variant(drop, service_id)).await.unwrap();
        repo.delete(drop).await.unwrap();

        let listed = repo.list_by_service(service_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep);
    }
}
