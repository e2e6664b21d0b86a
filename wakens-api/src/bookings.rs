use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use wakens_booking::{BookingDraft, BookingWorkflow, RoomContext, WorkflowError};
use wakens_core::booking::{BookingSnapshot, PaymentMethod};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/confirmation/{booking_id}", get(get_confirmation))
        .route("/api/send-booking-email", post(send_booking_email))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    #[serde(flatten)]
    draft: BookingDraft,
    room_id: String,
    payment_method: PaymentMethod,
}

/// POST /api/bookings
/// Runs the whole flow for one submission: collect details, select the
/// payment method, submit. Backend failures after validation never reach
/// the guest; the confirmation always comes back.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    // 1. Resolve the room and snapshot its price
    let room = wakens_catalog::find_room(&req.room_id)
        .ok_or_else(|| AppError::NotFoundError("Room not found".to_string()))?;
    let hotel = wakens_catalog::find_hotel(&room.hotel_id)
        .ok_or_else(|| AppError::InternalServerError("Room has no hotel".to_string()))?;

    let context = RoomContext {
        room_id: room.id,
        room_name: room.name,
        room_price: room.price,
        hotel_name: hotel.name,
    };

    // 2. Drive the workflow
    let mut workflow = BookingWorkflow::new(
        context,
        Arc::clone(&state.bookings),
        Arc::clone(&state.dispatcher),
        Arc::clone(&state.handoff),
    );

    workflow.submit_details(req.draft).map_err(map_workflow_error)?;
    let snapshot = workflow
        .select_payment(req.payment_method)
        .await
        .map_err(map_workflow_error)?;

    info!("Booking submitted: {}", snapshot.booking_id);

    Ok(Json(json!({
        "success": true,
        "booking": snapshot,
    })))
}

fn map_workflow_error(e: WorkflowError) -> AppError {
    match e {
        WorkflowError::Validation(msg) => AppError::ValidationError(msg),
        WorkflowError::InvalidTransition { .. } => AppError::InternalServerError(e.to_string()),
    }
}

/// GET /api/bookings/confirmation/{booking_id}
/// Single-read handoff for the confirmation view. The first read consumes
/// the slot; anything after that is a 404.
async fn get_confirmation(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.handoff.take(&booking_id) {
        Some(snapshot) => Ok(Json(json!({
            "success": true,
            "booking": snapshot,
        }))),
        None => Err(AppError::NotFoundError(
            "Booking confirmation not found or already viewed".to_string(),
        )),
    }
}

/// POST /api/send-booking-email
/// Direct dispatch of a confirmation for a full snapshot body.
async fn send_booking_email(
    State(state): State<AppState>,
    Json(snapshot): Json<BookingSnapshot>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.dispatcher.send(&snapshot).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": "Booking confirmation email sent successfully",
        }))),
        Err(e) => {
            tracing::error!("Email send error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Failed to send email",
                    "error": e.to_string(),
                })),
            ))
        }
    }
}
