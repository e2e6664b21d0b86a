pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod demo;
pub mod sensor_repo;

pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use demo::{InMemoryBookingRepository, InMemorySensorRepository};
pub use sensor_repo::RedisSensorRepository;
