use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use wakens_core::booking::BookingSnapshot;
use wakens_core::notify::NotificationDispatcher;

use crate::template::confirmation_email;

/// Errors from the email provider call.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider returned {0}")]
    Provider(reqwest::StatusCode),
}

/// Request sent to the transactional email API.
#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// HTTP client for the transactional email provider. One send per booking
/// submission; the caller treats failure as log-only.
pub struct EmailDispatcher {
    client: Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl EmailDispatcher {
    pub fn new(api_url: &str, api_key: &str, from_address: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from_address: from_address.to_string(),
        }
    }
}

#[async_trait]
impl NotificationDispatcher for EmailDispatcher {
    async fn send(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = confirmation_email(snapshot);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from_address,
                to: &snapshot.guest.email,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .map_err(DispatchError::Network)?;

        if !response.status().is_success() {
            return Err(DispatchError::Provider(response.status()).into());
        }

        info!(
            "Confirmation email sent for {} to {}",
            snapshot.booking_id, snapshot.guest.email
        );
        Ok(())
    }
}

/// Demo-mode dispatcher: logs the would-be send and succeeds.
pub struct NoopDispatcher;

#[async_trait]
impl NotificationDispatcher for NoopDispatcher {
    async fn send(
        &self,
        snapshot: &BookingSnapshot,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = confirmation_email(snapshot);
        info!(
            "Demo mode - skipping email \"{}\" to {}",
            message.subject, snapshot.guest.email
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wakens_core::booking::{GuestDetails, PaymentMethod};

    fn snapshot() -> BookingSnapshot {
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

    #[tokio::test]
    async fn noop_dispatcher_always_succeeds() {
        let dispatcher = NoopDispatcher;
        assert!(dispatcher.send(&snapshot()).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_provider_is_an_error() {
        // Nothing listens here; the send must fail, not hang
        let dispatcher = EmailDispatcher::new("http://127.0.0.1:9/send", "key", "noreply@wakens.com");
        assert!(dispatcher.send(&snapshot()).await.is_err());
    }
}
