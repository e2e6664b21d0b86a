use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wakens_core::booking::{Booking, BookingSnapshot, GuestDetails};
use wakens_core::repository::BookingRepository;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    booking_id: String,
    guest_name: String,
    guest_email: String,
    guest_phone: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i32,
    room_id: String,
    room_name: String,
    room_price: i64,
    hotel_name: String,
    payment_method: String,
    total_price: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, Box<dyn std::error::Error + Send + Sync>> {
        // The columns store the serde names ("UPI", "confirmed", ...)
        let payment_method =
            serde_json::from_value(serde_json::Value::String(self.payment_method))?;
        let status = serde_json::from_value(serde_json::Value::String(self.status))?;

        Ok(Booking {
            id: self.id.to_string(),
            snapshot: BookingSnapshot {
                booking_id: self.booking_id,
                guest: GuestDetails {
                    name: self.guest_name,
                    email: self.guest_email,
                    phone: self.guest_phone,
                },
                check_in: self.check_in,
                check_out: self.check_out,
                guests: self.guests as u32,
                room_id: self.room_id,
                room_name: self.room_name,
                room_price: self.room_price,
                hotel_name: self.hotel_name,
                payment_method,
                total_price: self.total_price,
            },
            created_at: self.created_at,
            status,
        })
    }
}

const SELECT_COLUMNS: &str = "id, booking_id, guest_name, guest_email, guest_phone, check_in, \
     check_out, guests, room_id, room_name, room_price, hotel_name, payment_method, \
     total_price, status, created_at";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create_booking(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let id = Uuid::new_v4();

        // created_at and status are assigned here, never taken from the caller
        sqlx::query(
            r#"
            INSERT INTO bookings (id, booking_id, guest_name, guest_email, guest_phone,
                check_in, check_out, guests, room_id, room_name, room_price, hotel_name,
                payment_method, total_price, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'confirmed', NOW())
            "#,
        )
        .bind(id)
        .bind(&snapshot.booking_id)
        .bind(&snapshot.guest.name)
        .bind(&snapshot.guest.email)
        .bind(&snapshot.guest.phone)
        .bind(snapshot.check_in)
        .bind(snapshot.check_out)
        .bind(snapshot.guests as i32)
        .bind(&snapshot.room_id)
        .bind(&snapshot.room_name)
        .bind(snapshot.room_price)
        .bind(&snapshot.hotel_name)
        .bind(snapshot.payment_method.to_string())
        .bind(snapshot.total_price)
        .execute(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn get_booking(
        &self,
        id: &str,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let uuid = match Uuid::parse_str(id) {
            Ok(uuid) => uuid,
            // Not a storage identifier we ever issued
            Err(_) => return Ok(None),
        };

        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }
}
