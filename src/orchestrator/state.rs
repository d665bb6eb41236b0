//! Request state machine, request/outcome values and outbound events.
//!
//! [`OrchestratorState`] drives the orchestrator's state machine. Every
//! transition is published as [`SessionEvent::StateChanged`], next to the
//! [`SessionEvent::Progress`] and [`SessionEvent::Result`] events the UI
//! renders.

use crate::session::{SessionError, SessionSnapshot};

// ---------------------------------------------------------------------------
// RequestOutcome
// ---------------------------------------------------------------------------

/// How a translation request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The full translated string.
    Success(String),
    /// The model could not be prepared; engine message verbatim.
    ModelFailure(String),
    /// The engine failed to translate; engine message verbatim.
    TranslateFailure(String),
    /// Bad user input; the request never reached the engine.
    ValidationFailure(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    /// Text to show the user for this outcome.
    ///
    /// ```
    /// use lingo_session::orchestrator::RequestOutcome;
    ///
    /// let o = RequestOutcome::ModelFailure("network unavailable".into());
    /// assert_eq!(o.notice(), "Failed to ready model due to network unavailable");
    /// ```
    pub fn notice(&self) -> String {
        match self {
            RequestOutcome::Success(text) => text.clone(),
            RequestOutcome::ModelFailure(msg) => format!("Failed to ready model due to {msg}"),
            RequestOutcome::TranslateFailure(msg) => format!("Failed to translate due to {msg}"),
            RequestOutcome::ValidationFailure(reason) if reason == EMPTY_INPUT => {
                "Enter text to translate..".to_string()
            }
            RequestOutcome::ValidationFailure(reason) => reason.clone(),
        }
    }
}

impl From<SessionError> for RequestOutcome {
    fn from(e: SessionError) -> Self {
        RequestOutcome::ValidationFailure(e.to_string())
    }
}

/// Validation reason for blank input.
pub const EMPTY_INPUT: &str = "empty input";

// ---------------------------------------------------------------------------
// OrchestratorState
// ---------------------------------------------------------------------------

/// States of a single translation request.
///
/// ```text
/// Idle ──submit──▶ Validating ──blank──▶ Done(ValidationFailure)
///                      │
///                      └──ok──▶ AwaitingModel ──err──▶ Done(ModelFailure)
///                                    │
///                                    └──ok──▶ Translating ──err──▶ Done(TranslateFailure)
///                                                  │
///                                                  └──ok──▶ Done(Success)
/// Done ──▶ Idle
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrchestratorState {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// Checking the submitted input.
    Validating,
    /// Waiting for the engine to make the language-pair model available.
    AwaitingModel,
    /// Waiting for the engine's translation.
    Translating,
    /// The request settled.
    Done(RequestOutcome),
}

impl OrchestratorState {
    /// Returns `true` while a request occupies the single in-flight slot.
    ///
    /// ```
    /// use lingo_session::orchestrator::OrchestratorState;
    ///
    /// assert!(!OrchestratorState::Idle.is_busy());
    /// assert!(OrchestratorState::AwaitingModel.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            OrchestratorState::Validating
                | OrchestratorState::AwaitingModel
                | OrchestratorState::Translating
        )
    }

    /// A short label suitable for a status bar.
    pub fn label(&self) -> &'static str {
        match self {
            OrchestratorState::Idle => "Idle",
            OrchestratorState::Validating => "Validating",
            OrchestratorState::AwaitingModel => "Preparing model",
            OrchestratorState::Translating => "Translating",
            OrchestratorState::Done(_) => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Stage / SessionEvent
// ---------------------------------------------------------------------------

/// Progress stage reported while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Model,
    Translate,
}

impl Stage {
    /// Stable name (`"model"` / `"translate"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Model => "model",
            Stage::Translate => "translate",
        }
    }

    /// Progress message for the UI.
    pub fn message(&self) -> &'static str {
        match self {
            Stage::Model => "Processing language model....",
            Stage::Translate => "Translating...",
        }
    }
}

/// Events delivered from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The state machine moved to a new state.
    StateChanged(OrchestratorState),
    /// A request entered a long-running stage.
    Progress(Stage),
    /// A request settled. The orchestrator is already `Idle` again.
    Result(RequestOutcome),
}

// ---------------------------------------------------------------------------
// TranslationRequest
// ---------------------------------------------------------------------------

/// One submission, locked in at `Validating → AwaitingModel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_code: String,
    pub destination_code: String,
    /// Input text with surrounding whitespace removed.
    pub text: String,
}

impl TranslationRequest {
    /// Validate a snapshot and build the request from it.
    ///
    /// Blank input yields `ValidationFailure("empty input")`.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Result<Self, RequestOutcome> {
        let text = snapshot.input_text.trim();
        if text.is_empty() {
            return Err(RequestOutcome::ValidationFailure(EMPTY_INPUT.into()));
        }

        Ok(Self {
            source_code: snapshot.source_language.code.clone(),
            destination_code: snapshot.destination_language.code.clone(),
            text: text.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
