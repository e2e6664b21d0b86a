use async_trait::async_trait;
use chrono::Utc;

use crate::booking::{Booking, BookingSnapshot};
use crate::sensor::{EnvironmentalReading, SensorStatus};

/// Repository trait for environmental sensor readings.
///
/// Each room has a time-ordered history plus a `latest` slot the writer
/// overwrites unconditionally. Callers must write readings in non-decreasing
/// timestamp order; out-of-order writes corrupt `latest` (known gap, the
/// repository does not defend against it).
#[async_trait]
pub trait SensorReadingRepository: Send + Sync {
    /// Store the reading under (room_id, timestamp) and overwrite `latest`.
    async fn write_reading(
        &self,
        reading: &EnvironmentalReading,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_latest(
        &self,
        room_id: &str,
    ) -> Result<Option<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>>;

    /// Recent history, newest first, excluding the `latest` pseudo-entry,
    /// truncated to `limit`. An unknown room yields an empty vec, not an
    /// error.
    async fn get_recent(
        &self,
        room_id: &str,
        limit: usize,
    ) -> Result<Vec<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_rooms_with_data(
        &self,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Derived reachability for a room's sensor. Total: an absent reading is
    /// simply offline.
    async fn get_status(
        &self,
        room_id: &str,
    ) -> Result<SensorStatus, Box<dyn std::error::Error + Send + Sync>> {
        let latest = self.get_latest(room_id).await?;
        Ok(SensorStatus::derive(latest.as_ref(), Utc::now()))
    }
}

/// Repository trait for booking records.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a booking. `created_at` and `status` are assigned here, not
    /// by the caller. Returns the storage identifier.
    async fn create_booking(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// All bookings, newest first by `created_at`.
    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_booking(
        &self,
        id: &str,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;
}
