use async_trait::async_trait;

use crate::booking::BookingSnapshot;

/// Outbound confirmation messaging.
///
/// Invoked at most once per booking submission. Best-effort: a failure is
/// logged by the caller and never retried or surfaced to the guest.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
