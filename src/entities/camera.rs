use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "cameras")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub camera_type: String,
    pub code: String,
    pub status: String,
    pub rtsp_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_history::Entity")]
    RoomHistory,
}

impl Related<super::room_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
