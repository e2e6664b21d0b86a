use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/sensors/{room_id}", get(get_sensor))
        .route("/api/sensors/history/{room_id}", get(get_sensor_history))
}

/// GET /api/sensors/{room_id}
/// Latest reading plus derived status for one room.
async fn get_sensor(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let latest = state
        .sensors
        .get_latest(&room_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let latest = match latest {
        Some(reading) => reading,
        None => {
            return Err(AppError::NotFoundError(
                "No sensor data found for this room".to_string(),
            ))
        }
    };

    let status = state
        .sensors
        .get_status(&room_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "roomId": room_id,
            "latest": latest,
            "status": status,
        },
    })))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// GET /api/sensors/history/{room_id}?limit=N
/// Recent readings, newest first. An unknown room yields an empty list.
async fn get_sensor_history(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = query
        .limit
        .unwrap_or(state.booking_rules.sensor_history_limit);

    let readings = state
        .sensors
        .get_recent(&room_id, limit)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "roomId": room_id,
            "limit": limit,
            "count": readings.len(),
            "readings": readings,
        },
    })))
}
