use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use wakens_core::booking::{Booking, BookingSnapshot, GuestDetails, PaymentMethod};
use wakens_core::repository::{BookingRepository, SensorReadingRepository};
use wakens_core::sensor::{AirQuality, EnvironmentalReading, WaterQuality};

/// Demo-mode sensor store: the same bucket shape as the Redis layout, held
/// in memory. History and the latest pointer are separate slots; the writer
/// overwrites `latest` unconditionally, exactly like the live store.
#[derive(Default)]
pub struct InMemorySensorRepository {
    rooms: RwLock<HashMap<String, RoomBucket>>,
}

#[derive(Default)]
struct RoomBucket {
    history: Vec<EnvironmentalReading>,
    latest: Option<EnvironmentalReading>,
}

fn demo_reading(room_id: &str, minutes_ago: i64, aqi: f64) -> EnvironmentalReading {
    EnvironmentalReading {
        room_id: room_id.to_string(),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        air_quality: AirQuality {
            pm25: 9.0,
            pm10: 15.0,
            sox: 2.5,
            nox: 6.0,
            voc: 42.0,
            co: 0.4,
            co2: 530.0,
            aqi,
        },
        water_quality: Some(WaterQuality {
            tds: 138.0,
            turbidity: 0.4,
            ph: 7.1,
            dissolved_oxygen: 7.9,
        }),
        temperature: Some(24.6),
        humidity: Some(56.0),
    }
}

impl InMemorySensorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded variant: r1 reports fresh data, r2 went quiet a while ago.
    pub async fn with_demo_data() -> Self {
        let repo = Self::new();
        for reading in [
            demo_reading("r1", 12, 88.0),
            demo_reading("r1", 7, 90.0),
            demo_reading("r1", 2, 91.0),
            demo_reading("r2", 30, 84.0),
            demo_reading("r2", 20, 86.0),
        ] {
            // Seed writes go through the normal path so `latest` is set the
            // same way live writes set it
            let _ = repo.write_reading(&reading).await;
        }
        repo
    }
}

#[async_trait]
impl SensorReadingRepository for InMemorySensorRepository {
    async fn write_reading(
        &self,
        reading: &EnvironmentalReading,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut rooms = self.rooms.write().await;
        let bucket = rooms.entry(reading.room_id.clone()).or_default();
        bucket.history.push(reading.clone());
        // No ordering check: the most recent write wins the latest slot
        bucket.latest = Some(reading.clone());
        Ok(())
    }

    async fn get_latest(
        &self,
        room_id: &str,
    ) -> Result<Option<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(room_id).and_then(|b| b.latest.clone()))
    }

    async fn get_recent(
        &self,
        room_id: &str,
        limit: usize,
    ) -> Result<Vec<EnvironmentalReading>, Box<dyn std::error::Error + Send + Sync>> {
        let rooms = self.rooms.read().await;
        let mut readings = rooms
            .get(room_id)
            .map(|b| b.history.clone())
            .unwrap_or_default();

        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        readings.truncate(limit);
        Ok(readings)
    }

    async fn list_rooms_with_data(
        &self,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.keys().cloned().collect())
    }
}

/// Demo-mode booking store seeded with a couple of canned records so the
/// admin dashboard has something to show.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

fn demo_booking(
    id: &str,
    booking_id: &str,
    name: &str,
    email: &str,
    phone: &str,
    check_in: (i32, u32, u32),
    check_out: (i32, u32, u32),
    guests: u32,
    room_id: &str,
    room_name: &str,
    room_price: i64,
    hotel_name: &str,
    payment_method: PaymentMethod,
    age: Duration,
) -> Booking {
    let check_in = NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).expect("demo date");
    let check_out =
        NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).expect("demo date");
    let nights = (check_out - check_in).num_days();

    Booking::from_snapshot(
        id.to_string(),
        BookingSnapshot {
            booking_id: booking_id.to_string(),
            guest: GuestDetails {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            },
            check_in,
            check_out,
            guests,
            room_id: room_id.to_string(),
            room_name: room_name.to_string(),
            room_price,
            hotel_name: hotel_name.to_string(),
            payment_method,
            total_price: nights * room_price,
        },
        Utc::now() - age,
    )
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_data() -> Self {
        let repo = Self::new();
        {
            let mut bookings = repo
                .bookings
                .try_write()
                .expect("fresh repository is uncontended");
            bookings.push(demo_booking(
                "demo1",
                "BK1732019234567",
                "Hari Kumar",
                "hari@example.com",
                "+91 98765 43210",
                (2025, 11, 25),
                (2025, 11, 27),
                2,
                "r1",
                "Kongu TBI",
                1800,
                "Kongu Engineering College",
                PaymentMethod::Upi,
                Duration::zero(),
            ));
            bookings.push(demo_booking(
                "demo2",
                "BK1732019876543",
                "Priya Sharma",
                "priya@example.com",
                "+91 87654 32109",
                (2025, 11, 22),
                (2025, 11, 24),
                1,
                "r2",
                "Riverfront Suite",
                2200,
                "Thrisha Residence",
                PaymentMethod::Card,
                Duration::days(1),
            ));
        }
        repo
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create_booking(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let id = Uuid::new_v4().to_string();
        let booking = Booking::from_snapshot(id.clone(), snapshot.clone(), Utc::now());

        let mut bookings = self.bookings.write().await;
        bookings.push(booking);
        Ok(id)
    }

    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let bookings = self.bookings.read().await;
        let mut all = bookings.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get_booking(
        &self,
        id: &str,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wakens_core::booking::BookingStatus;
    use wakens_core::sensor::SensorHealth;

    #[tokio::test]
    async fn latest_tracks_the_newest_in_order_write() {
        let repo = InMemorySensorRepository::new();
        let older = demo_reading("r1", 10, 85.0);
        let newer = demo_reading("r1", 1, 90.0);

        repo.write_reading(&older).await.unwrap();
        repo.write_reading(&newer).await.unwrap();

        let latest = repo.get_latest("r1").await.unwrap().unwrap();
        assert_eq!(latest.timestamp, newer.timestamp);
        assert_eq!(latest.air_quality.aqi, 90.0);
    }

    #[tokio::test]
    async fn recent_is_sorted_desc_and_truncated() {
        let repo = InMemorySensorRepository::with_demo_data().await;

        let recent = repo.get_recent("r1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].timestamp > recent[1].timestamp);

        // Unknown room fails softly
        assert!(repo.get_recent("r99", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_reflects_seed_recency() {
        let repo = InMemorySensorRepository::with_demo_data().await;

        let r1 = repo.get_status("r1").await.unwrap();
        assert_eq!(r1.status, SensorHealth::Online);

        let r2 = repo.get_status("r2").await.unwrap();
        assert_eq!(r2.status, SensorHealth::Offline);

        let unknown = repo.get_status("r99").await.unwrap();
        assert_eq!(unknown.status, SensorHealth::Offline);
        assert_eq!(unknown.minutes_ago, 0);
    }

    #[tokio::test]
    async fn bookings_list_newest_first_for_any_insertion_order() {
        let repo = InMemoryBookingRepository::with_demo_data();

        // A fresh booking appended at the end of the backing vec must still
        // come back first
        let demo = demo_booking(
            "x",
            "BK2",
            "Karthik V",
            "karthik@example.com",
            "+91 91111 11111",
            (2025, 12, 5),
            (2025, 12, 6),
            1,
            "r5",
            "Weaver's Loft",
            1500,
            "Cauvery View Inn",
            PaymentMethod::Upi,
            Duration::zero(),
        );
        repo.create_booking(&demo.snapshot).await.unwrap();

        let listed = repo.list_bookings().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(listed[0].snapshot.guest.name, "Karthik V");
    }

    #[tokio::test]
    async fn created_bookings_get_server_fields() {
        let repo = InMemoryBookingRepository::new();
        let demo = demo_booking(
            "x",
            "BK1",
            "Meena R",
            "meena@example.com",
            "+91 90000 00000",
            (2025, 12, 1),
            (2025, 12, 3),
            2,
            "r3",
            "Garden Deluxe",
            2100,
            "Kongu Engineering College",
            PaymentMethod::NetBanking,
            Duration::zero(),
        );

        let id = repo.create_booking(&demo.snapshot).await.unwrap();
        let stored = repo.get_booking(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.snapshot.total_price, 4200);
    }
}
