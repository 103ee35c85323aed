use std::fmt;

use sea_orm::DbErr;
use uuid::Uuid;

pub mod booking_service_item;
pub mod camera;
pub mod medicine;
pub mod pet_health_book;
pub mod room;
pub mod room_history;
pub mod room_type;
pub mod service;
pub mod service_type;
pub mod service_variant;
pub mod treatment;

pub use booking_service_item::BookingServiceItemRepository;
pub use camera::CameraRepository;
pub use medicine::MedicineRepository;
pub use pet_health_book::PetHealthBookRepository;
pub use room::RoomRepository;
pub use room_history::RoomHistoryRepository;
pub use room_type::RoomTypeRepository;
pub use service::ServiceRepository;
pub use service_type::ServiceTypeRepository;
pub use service_variant::ServiceVariantRepository;
pub use treatment::TreatmentRepository;

/// Typed failure for every repository operation. Handlers translate these to
/// HTTP results; nothing below the handler layer throws across the boundary.
#[derive(Debug)]
pub enum RepoError {
    /// No row with the given id.
    NotFound { entity: &'static str, id: Uuid },
    /// Duplicate id, duplicate name, or a state that rejects the operation.
    Conflict(String),
    /// Hard delete blocked while referencing rows remain.
    DependentsExist {
        entity: &'static str,
        dependents: &'static str,
    },
    /// Underlying database fault.
    Db(DbErr),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{} not found: {}", entity, id),
            Self::Conflict(msg) => write!(f, "{}", msg),
            Self::DependentsExist { entity, dependents } => {
                write!(f, "{} still has {} attached", entity, dependents)
            }
            Self::Db(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for RepoError {}

impl From<DbErr> for RepoError {
    fn from(e: DbErr) -> Self {
        Self::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// What a delete call did: first call on a live row marks it, the next call
/// removes it for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    SoftDeleted,
    Removed,
}

/// Marks a live row deleted. One conditional UPDATE judged on rows_affected,
/// so two racing deletes cannot both observe the soft phase.
macro_rules! mark_deleted {
    ($db:expr, $entity:path, $id:expr) => {{
        use sea_orm::{ColumnTrait as _, EntityTrait as _, QueryFilter as _};
        <$entity>::update_many()
            .col_expr(
                <$entity as sea_orm::EntityTrait>::Column::IsDeleted,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(<$entity as sea_orm::EntityTrait>::Column::Id.eq($id))
            .filter(<$entity as sea_orm::EntityTrait>::Column::IsDeleted.eq(false))
            .exec($db)
            .await
            .map(|res| res.rows_affected > 0)
            .map_err($crate::repository::RepoError::from)
    }};
}

/// Removes a row that is already soft-deleted. Same single-statement shape as
/// the soft phase.
macro_rules! purge_deleted {
    ($db:expr, $entity:path, $id:expr) => {{
        use sea_orm::{ColumnTrait as _, EntityTrait as _, QueryFilter as _};
        <$entity>::delete_many()
            .filter(<$entity as sea_orm::EntityTrait>::Column::Id.eq($id))
            .filter(<$entity as sea_orm::EntityTrait>::Column::IsDeleted.eq(true))
            .exec($db)
            .await
            .map(|res| res.rows_affected > 0)
            .map_err($crate::repository::RepoError::from)
    }};
}

pub(crate) use mark_deleted;
pub(crate) use purge_deleted;

#[cfg(test)]
pub(crate) mod test_util {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    /// Fresh in-memory SQLite database with the full schema applied. A single
    /// connection, because each `sqlite::memory:` connection is its own db.
    pub async fn connect() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("failed to open in-memory sqlite");
        crate::migrator::Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        db
    }
}
