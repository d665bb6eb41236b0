//! Translation orchestrator — drives validate → model → translate → report.
//!
//! [`TranslationOrchestrator`] owns the single in-flight slot and publishes
//! [`SessionEvent`]s over an unbounded `tokio::sync::mpsc` channel.
//! Publishing never waits on the receiver, so `submit` cannot be left
//! half-done with the slot claimed.
//!
//! # Request flow
//!
//! ```text
//! submit(snapshot)                      [Idle → Validating]
//!   ├─ blank text  → Done(ValidationFailure) → Idle → Result
//!   └─ ok          → AwaitingModel, Progress(model)
//!        └─▶ tokio::spawn
//!              gateway.ensure_model_ready
//!                ├─ Err → Done(ModelFailure) → Idle → Result
//!                └─ Ok  → Translating, Progress(translate)
//!                      gateway.translate
//!                        ├─ Ok  → Done(Success)          → Idle → Result
//!                        └─ Err → Done(TranslateFailure) → Idle → Result
//! ```
//!
//! The state lock is a `std::sync::Mutex` and is never held across `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::engine::TranslationEngineGateway;
use crate::session::SessionSnapshot;

use super::state::{OrchestratorState, RequestOutcome, SessionEvent, Stage, TranslationRequest};

// ---------------------------------------------------------------------------
// SubmitStatus
// ---------------------------------------------------------------------------

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The request passed validation and is now in flight.
    Accepted,
    /// The input failed validation; the outcome was already reported.
    Invalid,
    /// Another request is in flight (or the orchestrator was shut down);
    /// nothing changed.
    Rejected,
}

// ---------------------------------------------------------------------------
// Driver — state + event plumbing shared with the request task
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Driver {
    state: Arc<Mutex<OrchestratorState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    torn_down: Arc<AtomicBool>,
}

impl Driver {
    fn lock(&self) -> MutexGuard<'_, OrchestratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Claim the in-flight slot. Only `Idle` accepts a submission.
    fn try_begin(&self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let mut st = self.lock();
        if *st != OrchestratorState::Idle {
            return false;
        }
        *st = OrchestratorState::Validating;
        true
    }

    fn emit(&self, event: SessionEvent) {
        if self.is_torn_down() {
            return;
        }
        // A closed receiver means the UI is gone; there is nobody to tell.
        let _ = self.events.send(event);
    }

    fn transition(&self, next: OrchestratorState) {
        if self.is_torn_down() {
            return;
        }
        log::debug!("orchestrator: → {}", next.label());
        *self.lock() = next.clone();
        self.emit(SessionEvent::StateChanged(next));
    }

    /// `Done(outcome)`, back to `Idle`, then deliver the result.
    fn settle(&self, outcome: RequestOutcome) {
        self.transition(OrchestratorState::Done(outcome.clone()));
        self.transition(OrchestratorState::Idle);
        self.emit(SessionEvent::Result(outcome));
    }
}

// ---------------------------------------------------------------------------
// TranslationOrchestrator
// ---------------------------------------------------------------------------

/// Runs one translation request at a time against a gateway.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use lingo_session::catalog::LanguageCatalog;
/// use lingo_session::config::{EngineConfig, SessionConfig};
/// use lingo_session::engine::HttpGateway;
/// use lingo_session::orchestrator::TranslationOrchestrator;
/// use lingo_session::session::SessionState;
///
/// # async fn example() {
/// let gateway = Arc::new(HttpGateway::from_config(&EngineConfig::default()));
/// let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
/// let orchestrator = TranslationOrchestrator::new(gateway, events_tx);
///
/// let mut session = SessionState::new(
///     Arc::new(LanguageCatalog::builtin()),
///     &SessionConfig::default(),
/// );
/// session.set_input_text("hello");
/// orchestrator.submit(session.snapshot());
///
/// while let Some(event) = events_rx.recv().await {
///     println!("{event:?}");
/// }
/// # }
/// ```
pub struct TranslationOrchestrator {
    driver: Driver,
    gateway: Arc<dyn TranslationEngineGateway>,
}

impl TranslationOrchestrator {
    /// Create an idle orchestrator publishing to `events`.
    pub fn new(
        gateway: Arc<dyn TranslationEngineGateway>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            driver: Driver {
                state: Arc::new(Mutex::new(OrchestratorState::Idle)),
                events,
                torn_down: Arc::new(AtomicBool::new(false)),
            },
            gateway,
        }
    }

    /// Current state of the state machine.
    pub fn state(&self) -> OrchestratorState {
        self.driver.lock().clone()
    }

    /// Submit a translation of `snapshot`.
    ///
    /// Validation runs inline and returns without waiting on anything;
    /// engine work continues on a spawned tokio task whose progress arrives
    /// as events. Must be called within a tokio runtime.
    pub fn submit(&self, snapshot: SessionSnapshot) -> SubmitStatus {
        if !self.driver.try_begin() {
            log::debug!("orchestrator: submission ignored, a request is in flight");
            return SubmitStatus::Rejected;
        }
        self.driver
            .emit(SessionEvent::StateChanged(OrchestratorState::Validating));

        let request = match TranslationRequest::from_snapshot(&snapshot) {
            Ok(request) => request,
            Err(outcome) => {
                log::debug!("orchestrator: validation failed: {outcome:?}");
                self.driver.settle(outcome);
                return SubmitStatus::Invalid;
            }
        };

        self.driver.transition(OrchestratorState::AwaitingModel);
        self.driver.emit(SessionEvent::Progress(Stage::Model));

        let driver = self.driver.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(run_request(driver, gateway, request));

        SubmitStatus::Accepted
    }

    /// Tear down: results of an outstanding request are no longer delivered
    /// and new submissions are rejected. In-flight engine work is not
    /// interrupted.
    pub fn shutdown(&self) {
        if !self.driver.torn_down.swap(true, Ordering::SeqCst) {
            log::debug!("orchestrator: shut down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.driver.is_torn_down()
    }
}

/// Body of one accepted request, after `AwaitingModel` was entered.
async fn run_request(
    driver: Driver,
    gateway: Arc<dyn TranslationEngineGateway>,
    request: TranslationRequest,
) {
    let TranslationRequest {
        source_code,
        destination_code,
        text,
    } = request;

    // ── 1. Model ─────────────────────────────────────────────────────────
    let outcome = match gateway
        .ensure_model_ready(&source_code, &destination_code)
        .await
    {
        Err(e) => {
            log::warn!("orchestrator: model {source_code} → {destination_code} not ready: {e}");
            RequestOutcome::ModelFailure(e.to_string())
        }
        Ok(()) if driver.is_torn_down() => {
            log::debug!("orchestrator: torn down while preparing model, dropping request");
            return;
        }
        Ok(()) => {
            // ── 2. Translate ─────────────────────────────────────────────
            driver.transition(OrchestratorState::Translating);
            driver.emit(SessionEvent::Progress(Stage::Translate));

            match gateway.translate(&source_code, &destination_code, &text).await {
                Ok(translated) => {
                    log::info!(
                        "orchestrator: translated {} chars {source_code} → {destination_code}",
                        text.chars().count()
                    );
                    RequestOutcome::Success(translated)
                }
                Err(e) => {
                    log::warn!("orchestrator: translation failed: {e}");
                    RequestOutcome::TranslateFailure(e.to_string())
                }
            }
        }
    };

    // ── 3. Report ────────────────────────────────────────────────────────
    if driver.is_torn_down() {
        log::debug!("orchestrator: torn down, dropping late result");
        return;
    }
    driver.settle(outcome);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
