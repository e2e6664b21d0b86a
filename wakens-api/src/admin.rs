use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use wakens_core::booking::{Booking, BookingStatus};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/bookings", get(list_bookings))
}

#[derive(Debug, Deserialize)]
struct AdminQuery {
    status: Option<String>,
    q: Option<String>,
}

fn matches_filter(booking: &Booking, status: &Option<String>, term: &Option<String>) -> bool {
    let status_ok = match status.as_deref() {
        None | Some("all") => true,
        Some(wanted) => booking.status.to_string() == wanted,
    };

    let term_ok = match term.as_deref() {
        None | Some("") => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            let s = &booking.snapshot;
            s.guest.name.to_lowercase().contains(&needle)
                || s.guest.email.to_lowercase().contains(&needle)
                || s.booking_id.to_lowercase().contains(&needle)
                || s.hotel_name.to_lowercase().contains(&needle)
        }
    };

    status_ok && term_ok
}

/// GET /api/admin/bookings?status=confirmed&q=hari
/// Dashboard listing: filtered bookings plus stats over the full set.
/// A filter that matches nothing is an empty list, not an error.
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Value>, AppError> {
    let all = state
        .bookings
        .list_bookings()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let stats = json!({
        "total": all.len(),
        "confirmed": all.iter().filter(|b| b.status == BookingStatus::Confirmed).count(),
        "completed": all.iter().filter(|b| b.status == BookingStatus::Completed).count(),
        "revenue": all.iter().map(|b| b.snapshot.total_price).sum::<i64>(),
    });

    let filtered: Vec<Booking> = all
        .into_iter()
        .filter(|b| matches_filter(b, &query.status, &query.q))
        .collect();

    Ok(Json(json!({
        "success": true,
        "data": {
            "bookings": filtered,
            "stats": stats,
        },
    })))
}
