use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{
    mark_deleted, purge_deleted, BookingServiceItemRepository, DeleteOutcome, MedicineRepository,
    RepoError, RepoResult,
};
use crate::entities::pet_health_book;

pub struct PetHealthBookRepository {
    db: DatabaseConnection,
}

impl PetHealthBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: pet_health_book::Model) -> RepoResult<pet_health_book::Model> {
        if pet_health_book::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "Health book entry {} already exists",
                input.id
            )));
        }
        self.require_references(&input).await?;

        let now = chrono::Utc::now().naive_utc();
        let model = pet_health_book::ActiveModel {
            id: Set(input.id),
            booking_service_item_id: Set(input.booking_service_item_id),
            medicine_ids: Set(input.medicine_ids),
            visit_date: Set(input.visit_date),
            next_visit_date: Set(input.next_visit_date),
            performer: Set(input.performer),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;
        info!("health book entry created: {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, input: pet_health_book::Model) -> RepoResult<pet_health_book::Model> {
        let existing = pet_health_book::Entity::find_by_id(input.id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "PetHealthBook",
                id: input.id,
            })?;
        self.require_references(&input).await?;

        let mut model: pet_health_book::ActiveModel = existing.into();
        model.medicine_ids = Set(input.medicine_ids);
        model.visit_date = Set(input.visit_date);
        model.next_visit_date = Set(input.next_visit_date);
        model.performer = Set(input.performer);
        model.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<DeleteOutcome> {
        if mark_deleted!(&self.db, pet_health_book::Entity, id)? {
            info!("health book entry {} soft-deleted", id);
            return Ok(DeleteOutcome::SoftDeleted);
        }
        if purge_deleted!(&self.db, pet_health_book::Entity, id)? {
            info!("health book entry {} removed", id);
            Ok(DeleteOutcome::Removed)
        } else {
            Err(RepoError::NotFound {
                entity: "PetHealthBook",
                id,
            })
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<pet_health_book::Model>> {
        Ok(pet_health_book::Entity::find()
            .filter(pet_health_book::Column::IsDeleted.eq(false))
            .order_by_desc(pet_health_book::Column::VisitDate)
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<pet_health_book::Model> {
        pet_health_book::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "PetHealthBook",
                id,
            })
    }

    pub async fn list_by_booking_item(
        &self,
        booking_service_item_id: Uuid,
    ) -> RepoResult<Vec<pet_health_book::Model>> {
        Ok(pet_health_book::Entity::find()
            .filter(pet_health_book::Column::BookingServiceItemId.eq(booking_service_item_id))
            .filter(pet_health_book::Column::IsDeleted.eq(false))
            .order_by_desc(pet_health_book::Column::VisitDate)
            .all(&self.db)
            .await?)
    }

    async fn require_references(&self, input: &pet_health_book::Model) -> RepoResult<()> {
        let booking_items = BookingServiceItemRepository::new(self.db.clone());
        if !booking_items.exists(input.booking_service_item_id).await? {
            return Err(RepoError::NotFound {
                entity: "BookingServiceItem",
                id: input.booking_service_item_id,
            });
        }
        let medicines = MedicineRepository::new(self.db.clone());
        if !medicines.all_active(&input.medicine_ids.0).await? {
            return Err(RepoError::Conflict(
                "One or more medicines are missing or deleted".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pet_health_book::MedicineIds;
    use crate::entities::{booking_service_item, medicine, service, service_type, service_variant};
    use crate::repository::{
        test_util, MedicineRepository, ServiceRepository, ServiceTypeRepository,
        ServiceVariantRepository,
    };

    async fn seed_booking_item(db: &DatabaseConnection) -> Uuid {
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
                price: 90_000.0,
                is_deleted: false,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: chrono::Utc::now().naive_utc(),
            })
            .await
            .unwrap();

        let item_id = Uuid::new_v4();
        booking_service_item::ActiveModel {
            id: Set(item_id),
            booking_id: Set(Uuid::new_v4()),
            pet_id: Set(Uuid::new_v4()),
            service_variant_id: Set(variant_id),
        }
        .insert(db)
        .await
        .unwrap();
        item_id
    }

    async fn seed_medicine(db: &DatabaseConnection) -> Uuid {
        let id = Uuid::new_v4();
        MedicineRepository::new(db.clone())
            .create(medicine::Model {
                id,
                name: format!("med-{}", id),
                description: None,
                dosage: None,
                is_deleted: false,
                created_at: chrono::Utc::now().naive_utc(),
                updated_at: chrono::Utc::now().naive_utc(),
            })
            .await
            .unwrap();
        id
    }

    fn entry(item_id: Uuid, medicine_ids: Vec<Uuid>) -> pet_health_book::Model {
        pet_health_book::Model {
            id: Uuid::new_v4(),
            booking_service_item_id: item_id,
            medicine_ids: MedicineIds(medicine_ids),
            visit_date: chrono::Utc::now().naive_utc(),
            next_visit_date: None,
            performer: "Dr. Chen".to_string(),
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn create_validates_booking_item_and_medicines() {
        let db = test_util::connect().await;
        let repo = PetHealthBookRepository::new(db.clone());

        let orphan = repo.create(entry(Uuid::new_v4(), vec![])).await;
        assert!(matches!(orphan, Err(RepoError::NotFound { .. })));

        let item_id = seed_booking_item(&db).await;
        let bad_medicine = repo.create(entry(item_id, vec![Uuid::new_v4()])).await;
        assert!(matches!(bad_medicine, Err(RepoError::Conflict(_))));

        let med_id = seed_medicine(&db).await;
        let created = repo.create(entry(item_id, vec![med_id])).await.unwrap();
        assert_eq!(created.medicine_ids.0, vec![med_id]);
    }

    #[tokio::test]
    async fn list_by_booking_item_hides_soft_deleted_entries() {
        let db = test_util::connect().await;
        let repo = PetHealthBookRepository::new(db.clone());
        let item_id = seed_booking_item(&db).await;

        let kept = repo.create(entry(item_id, vec![])).await.unwrap();
        let dropped = repo.create(entry(item_id, vec![])).await.unwrap();
        repo.delete(dropped.id).await.unwrap();

        let listed = repo.list_by_booking_item(item_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);
    }
}
