use std::sync::Arc;

use wakens_booking::HandoffStore;
use wakens_core::notify::NotificationDispatcher;
use wakens_core::repository::{BookingRepository, SensorReadingRepository};
use wakens_store::app_config::BookingRules;

#[derive(Clone)]
pub struct AppState {
    pub sensors: Arc<dyn SensorReadingRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
    pub handoff: Arc<HandoffStore>,
    pub booking_rules: BookingRules,
}
