use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Simulated payment rails offered at checkout. Selection alone counts as a
/// successful payment; nothing is charged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Upi => write!(f, "UPI"),
            PaymentMethod::Card => write!(f, "Card"),
            PaymentMethod::NetBanking => write!(f, "Net Banking"),
        }
    }
}

/// Booking lifecycle. A record is created as Confirmed; the later
/// transitions are applied outside this system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Contact details collected on the booking form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A check-in/check-out pair. Calendar dates, no times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out }
    }

    /// Nights billed: ceil((check_out - check_in) / 1 day). With calendar
    /// dates that is the plain day difference.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// A stay must end strictly after it begins.
    pub fn is_valid(&self) -> bool {
        self.check_out > self.check_in
    }
}

/// Generate a booking reference from the submission instant.
pub fn generate_booking_id(now: DateTime<Utc>) -> String {
    format!("BK{}", now.timestamp_millis())
}

/// The immutable record assembled at submission time. Prices are snapshots
/// taken when the guest books, not live references into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSnapshot {
    pub booking_id: String,
    #[serde(flatten)]
    pub guest: GuestDetails,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub room_id: String,
    pub room_name: String,
    pub room_price: i64,
    pub hotel_name: String,
    pub payment_method: PaymentMethod,
    pub total_price: i64,
}

impl BookingSnapshot {
    pub fn stay(&self) -> StayDates {
        StayDates::new(self.check_in, self.check_out)
    }
}

/// A persisted booking: the snapshot plus the fields the repository assigns
/// on write. Callers never supply `created_at` or `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub snapshot: BookingSnapshot,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn from_snapshot(id: String, snapshot: BookingSnapshot, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            snapshot,
            created_at,
            status: BookingStatus::Confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> BookingSnapshot {
        BookingSnapshot {
            booking_id: "BK1732019234567".to_string(),
            guest: GuestDetails {
                name: "Hari Kumar".to_string(),
                email: "hari@example.com".to_string(),
                phone: "+91 98765 43210".to_string(),
            },
            check_in: NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 11, 27).unwrap(),
            guests: 2,
            room_id: "r1".to_string(),
            room_name: "Kongu TBI".to_string(),
            room_price: 1800,
            hotel_name: "Kongu Engineering College".to_string(),
            payment_method: PaymentMethod::Upi,
            total_price: 3600,
        }
    }

    #[test]
    fn nights_is_day_difference() {
        let stay = StayDates::new(
            NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 27).unwrap(),
        );
        assert_eq!(stay.nights(), 2);
        assert_eq!(stay.nights() * 1800, 3600);
    }

    #[test]
    fn same_day_stay_is_invalid() {
        let day = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        assert!(!StayDates::new(day, day).is_valid());
        assert!(!StayDates::new(day, day - chrono::Duration::days(1)).is_valid());
        assert!(StayDates::new(day, day + chrono::Duration::days(1)).is_valid());
    }

    #[test]
    fn booking_id_embeds_epoch_millis() {
        let now = Utc::now();
        let id = generate_booking_id(now);
        assert_eq!(id, format!("BK{}", now.timestamp_millis()));
        assert!(id.starts_with("BK"));
    }

    #[test]
    fn snapshot_wire_shape_is_flat_camel_case() {
        let json = serde_json::to_value(sample_snapshot()).unwrap();
        assert_eq!(json["bookingId"], "BK1732019234567");
        // Guest fields flatten to the top level
        assert_eq!(json["name"], "Hari Kumar");
        assert_eq!(json["paymentMethod"], "UPI");
        assert_eq!(json["totalPrice"], 3600);
    }

    #[test]
    fn payment_method_round_trips_display_names() {
        let json = serde_json::to_string(&PaymentMethod::NetBanking).unwrap();
        assert_eq!(json, "\"Net Banking\"");
        let back: PaymentMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaymentMethod::NetBanking);
    }

    #[test]
    fn repository_assigns_confirmed_status() {
        let booking = Booking::from_snapshot("doc-1".to_string(), sample_snapshot(), Utc::now());
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }
}
