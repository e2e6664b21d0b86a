use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use wakens_core::sensor::SensorStatus;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/hotels", get(list_hotels))
        .route("/api/hotels/{hotel_id}", get(get_hotel))
        .route("/api/rooms/{room_id}", get(get_room))
}

#[derive(Debug, Deserialize)]
struct HotelQuery {
    location: Option<String>,
}

/// GET /api/hotels?location=...
/// `location=eco` is the curated sustainable view; any other value is a
/// substring search; no value lists everything.
async fn list_hotels(Query(query): Query<HotelQuery>) -> Json<Value> {
    let hotels = match query.location.as_deref() {
        Some("eco") => wakens_catalog::eco_picks(),
        Some(location) if !location.is_empty() => wakens_catalog::search_by_location(location),
        _ => wakens_catalog::hotels(),
    };

    Json(json!({
        "success": true,
        "data": { "hotels": hotels },
    }))
}

/// GET /api/hotels/{hotel_id}
async fn get_hotel(Path(hotel_id): Path<String>) -> Result<Json<Value>, AppError> {
    let hotel = wakens_catalog::find_hotel(&hotel_id)
        .ok_or_else(|| AppError::NotFoundError("Hotel not found".to_string()))?;

    let rooms = wakens_catalog::rooms_for_hotel(&hotel_id);
    let reviews = wakens_catalog::reviews_for_hotel(&hotel_id);

    Ok(Json(json!({
        "success": true,
        "data": {
            "hotel": hotel,
            "rooms": rooms,
            "reviews": reviews,
        },
    })))
}

/// GET /api/rooms/{room_id}
/// Room detail with environmental data. Live readings win; a missing
/// reading or an unreachable store falls back to the static metric.
async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let room = wakens_catalog::find_room(&room_id)
        .ok_or_else(|| AppError::NotFoundError("Room not found".to_string()))?;
    let hotel = wakens_catalog::find_hotel(&room.hotel_id)
        .ok_or_else(|| AppError::InternalServerError("Room has no hotel".to_string()))?;
    let fallback = wakens_catalog::find_metric(&room_id);

    let live = match state.sensors.get_latest(&room_id).await {
        Ok(latest) => latest,
        Err(e) => {
            // Live store down: the page still renders from reference data
            warn!("Sensor store unavailable for {}: {}", room_id, e);
            None
        }
    };

    let environment = match live {
        Some(latest) => {
            let status = SensorStatus::derive(Some(&latest), Utc::now());
            json!({ "source": "live", "reading": latest, "status": status })
        }
        None => json!({ "source": "static", "metric": fallback }),
    };

    Ok(Json(json!({
        "success": true,
        "data": {
            "room": room,
            "hotel": hotel,
            "environment": environment,
        },
    })))
}
