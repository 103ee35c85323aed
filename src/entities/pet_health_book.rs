use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Medicine ids administered during a visit, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MedicineIds(pub Vec<Uuid>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "pet_health_books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booking_service_item_id: Uuid,
    #[sea_orm(column_type = "Json")]
    pub medicine_ids: MedicineIds,
    pub visit_date: DateTime,
    pub next_visit_date: Option<DateTime>,
    pub performer: String,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::booking_service_item::Entity",
        from = "Column::BookingServiceItemId",
        to = "super::booking_service_item::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    BookingServiceItem,
}

impl Related<super::booking_service_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingServiceItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
