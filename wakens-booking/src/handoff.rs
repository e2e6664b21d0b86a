use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use wakens_core::booking::BookingSnapshot;

struct HandoffEntry {
    snapshot: BookingSnapshot,
    expires_at: DateTime<Utc>,
}

/// Carries the booking snapshot from submission to the confirmation view.
///
/// Single-read: `take` removes the entry, so the confirmation renders at
/// most once per booking. Entries that are never read expire and get swept
/// by `cleanup_expired`.
pub struct HandoffStore {
    slots: Mutex<HashMap<String, HandoffEntry>>,
    ttl: Duration,
}

impl HandoffStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn put(&self, snapshot: BookingSnapshot) {
        let mut slots = self.slots.lock().expect("handoff lock poisoned");
        slots.insert(
            snapshot.booking_id.clone(),
            HandoffEntry {
                snapshot,
                expires_at: Utc::now() + self.ttl,
            },
        );
    }

    /// Remove and return the snapshot. A second call for the same key, or a
    /// call after expiry, yields None.
    pub fn take(&self, booking_id: &str) -> Option<BookingSnapshot> {
        let mut slots = self.slots.lock().expect("handoff lock poisoned");
        let entry = slots.remove(booking_id)?;
        if entry.expires_at <= Utc::now() {
            return None;
        }
        Some(entry.snapshot)
    }

    /// Drop expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut slots = self.slots.lock().expect("handoff lock poisoned");
        let initial = slots.len();
        slots.retain(|_, entry| entry.expires_at > now);
        initial - slots.len()
    }
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::new(Duration::minutes(10))
    }
}
