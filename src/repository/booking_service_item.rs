use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::entities::booking_service_item;

/// Booking items are written by the booking flow, which lives outside this
/// service. Here they are a read-only dependency-check target.
pub struct BookingServiceItemRepository {
    db: DatabaseConnection,
}

impl BookingServiceItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<booking_service_item::Model> {
        booking_service_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "BookingServiceItem",
                id,
            })
    }

    pub async fn list_by_booking(
        &self,
        booking_id: Uuid,
    ) -> RepoResult<Vec<booking_service_item::Model>> {
        Ok(booking_service_item::Entity::find()
            .filter(booking_service_item::Column::BookingId.eq(booking_id))
            .all(&self.db)
            .await?)
    }

    pub async fn exists(&self, id: Uuid) -> RepoResult<bool> {
        let count = booking_service_item::Entity::find_by_id(id)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn variant_in_booking(&self, variant_id: Uuid) -> RepoResult<bool> {
        let count = booking_service_item::Entity::find()
            .filter(booking_service_item::Column::ServiceVariantId.eq(variant_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{service, service_type, service_variant};
    use crate::repository::{
        test_util, ServiceRepository, ServiceTypeRepository, ServiceVariantRepository,
    };
    use sea_orm::{ActiveModelTrait, Set};

    async fn seed_variant(db: &DatabaseConnection) -> Uuid {
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
        let variant_id = Uuid::new_v4();
        ServiceVariantRepository::new(db.clone())
            .create(service_variant::Model {
                id: variant_id,
                service_id,
                content: "Standard".to_string(),
                price: 80_000.0,
                is_deleted: false,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: chrono::Utc::now().naive_utc(),
            })
            .await
            .unwrap();
        variant_id
    }

    #[tokio::test]
    async fn existence_queries_see_inserted_items() {
        let db = test_util::connect().await;
        let repo = BookingServiceItemRepository::new(db.clone());
        let variant_id = seed_variant(&db).await;

        let booking_id = Uuid::new_v4();
        let item_id = Uuid::new_v4();
        booking_service_item::ActiveModel {
            id: Set(item_id),
            booking_id: Set(booking_id),
            pet_id: Set(Uuid::new_v4()),
            service_variant_id: Set(variant_id),
        }
        .insert(&db)
        .await
        .unwrap();

        assert!(repo.exists(item_id).await.unwrap());
        assert!(!repo.exists(Uuid::new_v4()).await.unwrap());
        assert!(repo.variant_in_booking(variant_id).await.unwrap());
        assert!(!repo.variant_in_booking(Uuid::new_v4()).await.unwrap());

        let listed = repo.list_by_booking(booking_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, item_id);
        assert_eq!(repo.get_by_id(item_id).await.unwrap().booking_id, booking_id);
    }
}
