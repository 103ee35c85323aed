use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceTypes::Name).string().not_null())
                    .col(ColumnDef::new(ServiceTypes::Description).text())
                    .col(
                        ColumnDef::new(ServiceTypes::IsDeleted)
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
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::ServiceTypeId).uuid().not_null())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Description).text())
                    .col(ColumnDef::new(Services::ServiceImage).string())
                    .col(
                        ColumnDef::new(Services::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_service_type")
                            .from(Services::Table, Services::ServiceTypeId)
                            .to(ServiceTypes::Table, ServiceTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceVariants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceVariants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceVariants::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(ServiceVariants::Content).string().not_null())
                    .col(ColumnDef::new(ServiceVariants::Price).double().not_null())
                    .col(
                        ColumnDef::new(ServiceVariants::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceVariants::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceVariants::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_variants_service")
                            .from(ServiceVariants::Table, ServiceVariants::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingServiceItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingServiceItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BookingServiceItems::BookingId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookingServiceItems::PetId).uuid().not_null())
                    .col(
                        ColumnDef::new(BookingServiceItems::ServiceVariantId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_service_items_variant")
                            .from(
                                BookingServiceItems::Table,
                                BookingServiceItems::ServiceVariantId,
                            )
                            .to(ServiceVariants::Table, ServiceVariants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_service_type_id")
                    .table(Services::Table)
                    .col(Services::ServiceTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_variants_service_id")
                    .table(ServiceVariants::Table)
                    .col(ServiceVariants::ServiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_service_items_booking_id")
                    .table(BookingServiceItems::Table)
                    .col(BookingServiceItems::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_service_items_variant_id")
                    .table(BookingServiceItems::Table)
                    .col(BookingServiceItems::ServiceVariantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingServiceItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceVariants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceTypes {
    Table,
    Id,
    Name,
    Description,
    IsDeleted,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    ServiceTypeId,
    Name,
    Description,
    ServiceImage,
    IsDeleted,
}

#[derive(DeriveIden)]
enum ServiceVariants {
    Table,
    Id,
    ServiceId,
    Content,
    Price,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BookingServiceItems {
    Table,
    Id,
    BookingId,
    PetId,
    ServiceVariantId,
}
