use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cameras::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cameras::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cameras::Type).string().not_null())
                    .col(ColumnDef::new(Cameras::Code).string().not_null())
                    .col(ColumnDef::new(Cameras::Status).string().not_null())
                    .col(ColumnDef::new(Cameras::RtspUrl).string().not_null())
                    .col(ColumnDef::new(Cameras::Address).text())
                    .col(
                        ColumnDef::new(Cameras::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cameras_code")
                    .table(Cameras::Table)
                    .col(Cameras::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomHistories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomHistories::RoomId).uuid().not_null())
                    .col(ColumnDef::new(RoomHistories::BookingId).uuid().not_null())
                    .col(ColumnDef::new(RoomHistories::CameraId).uuid())
                    .col(
                        ColumnDef::new(RoomHistories::CheckIn)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomHistories::CheckOut).date_time())
                    .col(ColumnDef::new(RoomHistories::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_histories_room")
                            .from(RoomHistories::Table, RoomHistories::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_histories_camera")
                            .from(RoomHistories::Table, RoomHistories::CameraId)
                            .to(Cameras::Table, Cameras::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_histories_room_id")
                    .table(RoomHistories::Table)
                    .col(RoomHistories::RoomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_histories_status")
                    .table(RoomHistories::Table)
                    .col(RoomHistories::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cameras::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cameras {
    Table,
    Id,
    Type,
    Code,
    Status,
    RtspUrl,
    Address,
    IsDeleted,
}

#[derive(DeriveIden)]
enum RoomHistories {
    Table,
    Id,
    RoomId,
    BookingId,
    CameraId,
    CheckIn,
    CheckOut,
    Status,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
}
