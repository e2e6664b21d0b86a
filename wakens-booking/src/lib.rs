pub mod handoff;
pub mod workflow;

pub use handoff::HandoffStore;
pub use workflow::{BookingDraft, BookingWorkflow, RoomContext, WorkflowError, WorkflowState};
