use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(RoomTypes::Name).string().not_null())
                    .col(ColumnDef::new(RoomTypes::Price).double().not_null())
                    .col(ColumnDef::new(RoomTypes::Description).text())
                    .col(
                        ColumnDef::new(RoomTypes::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rooms::RoomTypeId).uuid().not_null())
                    .col(ColumnDef::new(Rooms::Description).text())
                    .col(
                        ColumnDef::new(Rooms::Status)
                            .string_len(32)
                            .default("Free")
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rooms::RoomImage).string())
                    .col(
                        ColumnDef::new(Rooms::HasCamera)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_room_type")
                            .from(Rooms::Table, Rooms::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_room_type_id")
                    .table(Rooms::Table)
                    .col(Rooms::RoomTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_status")
                    .table(Rooms::Table)
                    .col(Rooms::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoomTypes {
    Table,
    Id,
    Name,
    Price,
    Description,
    IsDeleted,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    RoomTypeId,
    Description,
    Status,
    RoomImage,
    HasCamera,
    IsDeleted,
}
