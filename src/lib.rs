pub mod api;
pub mod entities;
pub mod metrics;
pub mod migrator;
pub mod repository;
pub mod response;
pub mod telemetry;

pub use sea_orm;
