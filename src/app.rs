//! UI-facing translation session.
//!
//! # Architecture
//!
//! [`TranslationSession`] is what a UI shell talks to. It owns the
//! [`SessionState`], holds the shared [`LanguageCatalog`], and forwards
//! submissions to a [`TranslationOrchestrator`]. Outbound traffic goes over
//! the `mpsc::UnboundedReceiver<SessionEvent>` returned by
//! [`TranslationSession::new`].
//!
//! | Inbound (UI → session)        | Outbound (session → UI)           |
//! |-------------------------------|-----------------------------------|
//! | `on_select_source(code)`      | `SessionEvent::Progress(stage)`   |
//! | `on_select_destination(code)` | `SessionEvent::Result(outcome)`   |
//! | `on_input_text_changed(text)` | `SessionEvent::StateChanged(..)`  |
//! | `on_submit_translate()`       |                                   |
//!
//! Dropping the session shuts the orchestrator down, so a request that
//! completes afterwards is never delivered.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::LanguageCatalog;
use crate::config::SessionConfig;
use crate::engine::TranslationEngineGateway;
use crate::orchestrator::{OrchestratorState, SessionEvent, SubmitStatus, TranslationOrchestrator};
use crate::session::{SessionError, SessionState};

// ---------------------------------------------------------------------------
// TranslationSession
// ---------------------------------------------------------------------------

/// A single translation session: selection state plus one orchestrator.
pub struct TranslationSession {
    state: SessionState,
    orchestrator: TranslationOrchestrator,
}

impl TranslationSession {
    /// Create a session and the receiver its events are delivered on.
    ///
    /// * `catalog`  — languages the user may select.
    /// * `config`   — initial language pair.
    /// * `gateway`  — translation engine (e.g. `HttpGateway`).
    pub fn new(
        catalog: Arc<LanguageCatalog>,
        config: &SessionConfig,
        gateway: Arc<dyn TranslationEngineGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let session = Self {
            state: SessionState::new(catalog, config),
            orchestrator: TranslationOrchestrator::new(gateway, events_tx),
        };

        (session, events_rx)
    }

    // -----------------------------------------------------------------------
    // Inbound events
    // -----------------------------------------------------------------------

    pub fn on_select_source(&mut self, code: &str) -> Result<(), SessionError> {
        self.state.select_source(code)
    }

    pub fn on_select_destination(&mut self, code: &str) -> Result<(), SessionError> {
        self.state.select_destination(code)
    }

    pub fn on_swap_languages(&mut self) {
        self.state.swap_languages();
    }

    pub fn on_input_text_changed(&mut self, text: impl Into<String>) {
        self.state.set_input_text(text);
    }

    /// Submit the current input for translation.
    ///
    /// Ignored (`SubmitStatus::Rejected`) while a request is in flight.
    /// Never blocks on the event receiver.
    pub fn on_submit_translate(&self) -> SubmitStatus {
        self.orchestrator.submit(self.state.snapshot())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        self.state.catalog()
    }

    pub fn orchestrator_state(&self) -> OrchestratorState {
        self.orchestrator.state()
    }

    /// Stop delivering results; further submissions are rejected.
    pub fn shutdown(&self) {
        self.orchestrator.shutdown();
    }
}

impl Drop for TranslationSession {
    fn drop(&mut self) {
        self.orchestrator.shutdown();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
