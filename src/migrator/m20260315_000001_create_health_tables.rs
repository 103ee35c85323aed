use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Medicines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Medicines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Medicines::Name).string().not_null())
                    .col(ColumnDef::new(Medicines::Description).text())
                    .col(ColumnDef::new(Medicines::Dosage).string())
                    .col(
                        ColumnDef::new(Medicines::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Medicines::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Medicines::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Treatments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Treatments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Treatments::Name).string().not_null())
                    .col(ColumnDef::new(Treatments::Description).text())
                    .col(
                        ColumnDef::new(Treatments::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Treatments::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Treatments::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PetHealthBooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PetHealthBooks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PetHealthBooks::BookingServiceItemId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PetHealthBooks::MedicineIds)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PetHealthBooks::VisitDate)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PetHealthBooks::NextVisitDate).date_time())
                    .col(ColumnDef::new(PetHealthBooks::Performer).string().not_null())
                    .col(
                        ColumnDef::new(PetHealthBooks::IsDeleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PetHealthBooks::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PetHealthBooks::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_health_books_booking_item")
                            .from(PetHealthBooks::Table, PetHealthBooks::BookingServiceItemId)
                            .to(BookingServiceItems::Table, BookingServiceItems::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pet_health_books_booking_item_id")
                    .table(PetHealthBooks::Table)
                    .col(PetHealthBooks::BookingServiceItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PetHealthBooks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Treatments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medicines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Medicines {
    Table,
    Id,
    Name,
    Description,
    Dosage,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Treatments {
    Table,
    Id,
    Name,
    Description,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PetHealthBooks {
    Table,
    Id,
    BookingServiceItemId,
    MedicineIds,
    VisitDate,
    NextVisitDate,
    Performer,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BookingServiceItems {
    Table,
    Id,
}
