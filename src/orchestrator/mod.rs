//! Translation orchestrator module.
//!
//! This module owns the request state machine that sequences model
//! acquisition before translation and reports progress to the UI.
//!
//! # Architecture
//!
//! ```text
//! on_submit_translate()
//!        │
//!        ▼
//! TranslationOrchestrator::submit(snapshot)   ← Idle only, else Rejected
//!        │
//!        ├─ Validating     → blank text → Done(ValidationFailure)
//!        ├─ AwaitingModel  → gateway.ensure_model_ready   Progress(model)
//!        ├─ Translating    → gateway.translate            Progress(translate)
//!        └─ Done(outcome)  → Idle → Result(outcome)
//!
//! mpsc::UnboundedReceiver<SessionEvent> ←─── read by the UI
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{SubmitStatus, TranslationOrchestrator};
pub use state::{
    OrchestratorState, RequestOutcome, SessionEvent, Stage, TranslationRequest, EMPTY_INPUT,
};
