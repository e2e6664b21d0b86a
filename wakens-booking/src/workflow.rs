use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use wakens_core::booking::{
    generate_booking_id, BookingSnapshot, GuestDetails, PaymentMethod, StayDates,
};
use wakens_core::notify::NotificationDispatcher;
use wakens_core::repository::BookingRepository;

use crate::handoff::HandoffStore;

/// Room facts captured when the guest opens the form. Price is copied into
/// the snapshot at submission, not re-read from the catalog.
#[derive(Debug, Clone)]
pub struct RoomContext {
    pub room_id: String,
    pub room_name: String,
    pub room_price: i64,
    pub hotel_name: String,
}

/// Raw form input for one booking attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

/// Workflow position for one booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    CollectingDetails,
    SelectingPayment,
    Submitting,
    Done,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// The booking flow: CollectingDetails → SelectingPayment → Submitting →
/// Done. One workflow instance per booking attempt; the draft is owned here
/// until submission hands an immutable snapshot to the repository and the
/// dispatcher.
pub struct BookingWorkflow {
    state: WorkflowState,
    room: RoomContext,
    details: Option<BookingDraft>,
    repository: Arc<dyn BookingRepository>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    handoff: Arc<HandoffStore>,
}

impl BookingWorkflow {
    pub fn new(
        room: RoomContext,
        repository: Arc<dyn BookingRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        handoff: Arc<HandoffStore>,
    ) -> Self {
        Self {
            state: WorkflowState::CollectingDetails,
            room,
            details: None,
            repository,
            dispatcher,
            handoff,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Transition: CollectingDetails → SelectingPayment. Rejecting input
    /// keeps the workflow where it is.
    pub fn submit_details(&mut self, draft: BookingDraft) -> Result<(), WorkflowError> {
        if self.state != WorkflowState::CollectingDetails {
            return Err(WorkflowError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: "SelectingPayment".to_string(),
            });
        }

        validate_draft(&draft)?;

        self.details = Some(draft);
        self.state = WorkflowState::SelectingPayment;
        Ok(())
    }

    /// Transition: SelectingPayment → Submitting → Done. Choosing a method
    /// is treated as successful payment; no gateway is involved.
    ///
    /// Persistence and notification are fired as two independent tasks.
    /// Their results are observed only for logging: a guest who reached
    /// this point always sees a confirmation, even if the store or the
    /// email provider is down.
    pub async fn select_payment(
        &mut self,
        method: PaymentMethod,
    ) -> Result<BookingSnapshot, WorkflowError> {
        if self.state != WorkflowState::SelectingPayment {
            return Err(WorkflowError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: "Submitting".to_string(),
            });
        }
        self.state = WorkflowState::Submitting;

        let draft = self
            .details
            .as_ref()
            .ok_or_else(|| WorkflowError::Validation("No guest details collected".to_string()))?;

        let stay = StayDates::new(draft.check_in, draft.check_out);
        let nights = stay.nights();
        let total_price = nights * self.room.room_price;

        let snapshot = BookingSnapshot {
            booking_id: generate_booking_id(Utc::now()),
            guest: GuestDetails {
                name: draft.name.clone(),
                email: draft.email.clone(),
                phone: draft.phone.clone(),
            },
            check_in: draft.check_in,
            check_out: draft.check_out,
            guests: draft.guests,
            room_id: self.room.room_id.clone(),
            room_name: self.room.room_name.clone(),
            room_price: self.room.room_price,
            hotel_name: self.room.hotel_name.clone(),
            payment_method: method,
            total_price,
        };

        let repository = Arc::clone(&self.repository);
        let persisted = snapshot.clone();
        tokio::spawn(async move {
            match repository.create_booking(&persisted).await {
                Ok(id) => info!("Booking {} persisted as {}", persisted.booking_id, id),
                Err(e) => error!("Failed to persist booking {}: {}", persisted.booking_id, e),
            }
        });

        let dispatcher = Arc::clone(&self.dispatcher);
        let notified = snapshot.clone();
        tokio::spawn(async move {
            if let Err(e) = dispatcher.send(&notified).await {
                error!(
                    "Failed to send confirmation for {}: {}",
                    notified.booking_id, e
                );
            }
        });

        self.handoff.put(snapshot.clone());
        self.details = None;
        self.state = WorkflowState::Done;

        Ok(snapshot)
    }
}

fn validate_draft(draft: &BookingDraft) -> Result<(), WorkflowError> {
    if draft.name.trim().is_empty() {
        return Err(WorkflowError::Validation("Name is required".to_string()));
    }
    if draft.email.trim().is_empty() {
        return Err(WorkflowError::Validation("Email is required".to_string()));
    }
    if draft.phone.trim().is_empty() {
        return Err(WorkflowError::Validation("Phone is required".to_string()));
    }
    if draft.guests < 1 {
        return Err(WorkflowError::Validation(
            "At least one guest is required".to_string(),
        ));
    }
    if !StayDates::new(draft.check_in, draft.check_out).is_valid() {
        return Err(WorkflowError::Validation(
            "Check-out must be after check-in".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wakens_core::booking::Booking;

    struct RecordingRepository {
        created: Mutex<Vec<BookingSnapshot>>,
        fail: bool,
    }

    impl RecordingRepository {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                created: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl BookingRepository for RecordingRepository {
        async fn create_booking(
            &self,
            snapshot: &BookingSnapshot,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            if self.fail {
                return Err("store unreachable".into());
            }
            self.created.lock().unwrap().push(snapshot.clone());
            Ok(format!("doc-{}", snapshot.booking_id))
        }

        async fn list_bookings(
            &self,
        ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Vec::new())
        }

        async fn get_booking(
            &self,
            _id: &str,
        ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(None)
        }
    }

    struct CountingDispatcher {
        sent: Mutex<usize>,
        fail: bool,
    }

    impl CountingDispatcher {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl NotificationDispatcher for CountingDispatcher {
        async fn send(
            &self,
            _snapshot: &BookingSnapshot,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            *self.sent.lock().unwrap() += 1;
            if self.fail {
                return Err("provider rejected".into());
            }
            Ok(())
        }
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            name: "Hari Kumar".to_string(),
            email: "hari@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 11, 27).unwrap(),
            guests: 2,
        }
    }

    fn room() -> RoomContext {
        RoomContext {
            room_id: "r1".to_string(),
            room_name: "Kongu TBI".to_string(),
            room_price: 1800,
            hotel_name: "Kongu Engineering College".to_string(),
        }
    }

    fn workflow(
        repository: Arc<RecordingRepository>,
        dispatcher: Arc<CountingDispatcher>,
        handoff: Arc<HandoffStore>,
    ) -> BookingWorkflow {
        BookingWorkflow::new(room(), repository, dispatcher, handoff)
    }

    #[tokio::test]
    async fn full_lifecycle_reaches_done() {
        let repo = RecordingRepository::new(false);
        let handoff = Arc::new(HandoffStore::default());
        let mut wf = workflow(Arc::clone(&repo), CountingDispatcher::new(false), Arc::clone(&handoff));

        assert_eq!(wf.state(), WorkflowState::CollectingDetails);

        wf.submit_details(draft()).unwrap();
        assert_eq!(wf.state(), WorkflowState::SelectingPayment);

        let snapshot = wf.select_payment(PaymentMethod::Upi).await.unwrap();
        assert_eq!(wf.state(), WorkflowState::Done);
        assert_eq!(snapshot.total_price, 3600);
        assert_eq!(snapshot.room_price, 1800);

        // Snapshot is waiting in the handoff slot, exactly once
        assert!(handoff.take(&snapshot.booking_id).is_some());
        assert!(handoff.take(&snapshot.booking_id).is_none());

        // Let the spawned persistence task land
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn payment_before_details_is_rejected() {
        let mut wf = workflow(
            RecordingRepository::new(false),
            CountingDispatcher::new(false),
            Arc::new(HandoffStore::default()),
        );

        let result = wf.select_payment(PaymentMethod::Card).await;
        assert!(matches!(result, Err(WorkflowError::InvalidTransition { .. })));
        assert_eq!(wf.state(), WorkflowState::CollectingDetails);
    }

    #[tokio::test]
    async fn bad_date_range_is_rejected_before_payment() {
        let mut wf = workflow(
            RecordingRepository::new(false),
            CountingDispatcher::new(false),
            Arc::new(HandoffStore::default()),
        );

        let mut bad = draft();
        bad.check_out = bad.check_in;
        let result = wf.submit_details(bad);
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
        assert_eq!(wf.state(), WorkflowState::CollectingDetails);
    }

    #[tokio::test]
    async fn store_failure_still_reaches_done() {
        let mut wf = workflow(
            RecordingRepository::new(true),
            CountingDispatcher::new(false),
            Arc::new(HandoffStore::default()),
        );

        wf.submit_details(draft()).unwrap();
        let result = wf.select_payment(PaymentMethod::NetBanking).await;

        // Persistence failure is logged in the spawned task, never surfaced
        assert!(result.is_ok());
        assert_eq!(wf.state(), WorkflowState::Done);
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_block_persistence() {
        let repo = RecordingRepository::new(false);
        let mut wf = workflow(
            Arc::clone(&repo),
            CountingDispatcher::new(true),
            Arc::new(HandoffStore::default()),
        );

        wf.submit_details(draft()).unwrap();
        assert!(wf.select_payment(PaymentMethod::Card).await.is_ok());

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn resubmission_stores_two_distinct_records() {
        let repo = RecordingRepository::new(false);
        let dispatcher = CountingDispatcher::new(false);
        let handoff = Arc::new(HandoffStore::default());

        let mut first = workflow(Arc::clone(&repo), Arc::clone(&dispatcher), Arc::clone(&handoff));
        first.submit_details(draft()).unwrap();
        let a = first.select_payment(PaymentMethod::Upi).await.unwrap();

        // Ids derive from the submission instant; step past the millisecond
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut second = workflow(Arc::clone(&repo), Arc::clone(&dispatcher), handoff);
        second.submit_details(draft()).unwrap();
        let b = second.select_payment(PaymentMethod::Upi).await.unwrap();

        assert_ne!(a.booking_id, b.booking_id);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        // No dedup: identical form data lands twice
        assert_eq!(repo.created.lock().unwrap().len(), 2);
        assert_eq!(*dispatcher.sent.lock().unwrap(), 2);
    }
}
