use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "booking_service_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booking_id: Uuid,
    pub pet_id: Uuid,
    pub service_variant_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_variant::Entity",
        from = "Column::ServiceVariantId",
        to = "super::service_variant::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    ServiceVariant,
    #[sea_orm(has_many = "super::pet_health_book::Entity")]
    PetHealthBook,
}

impl Related<super::service_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceVariant.def()
    }
}

impl Related<super::pet_health_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PetHealthBook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
