use sea_orm_migration::prelude::*;

mod m20260301_000001_create_facility_tables;
mod m20260301_000002_create_service_tables;
mod m20260308_000001_create_camera_tables;
mod m20260315_000001_create_health_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_facility_tables::Migration),
            Box::new(m20260301_000002_create_service_tables::Migration),
            Box::new(m20260308_000001_create_camera_tables::Migration),
            Box::new(m20260315_000001_create_health_tables::Migration),
        ]
    }
}
