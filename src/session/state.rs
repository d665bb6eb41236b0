//! Selection state of a translation session.
//!
//! [`SessionState`] holds the selected source and destination languages and
//! the last entered input text. It is owned by the session layer and mutated
//! only by explicit selection/input events. The orchestrator never sees it
//! directly; it receives an owned [`SessionSnapshot`] per request.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Language, LanguageCatalog};
use crate::config::SessionConfig;

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors raised by selection events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The code is not present in the language catalog.
    #[error("unknown language code")]
    UnknownLanguage(String),
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// Immutable copy of [`SessionState`] taken at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub source_language: Language,
    pub destination_language: Language,
    pub input_text: String,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Current language selection and input text.
#[derive(Debug, Clone)]
pub struct SessionState {
    catalog: Arc<LanguageCatalog>,
    source_language: Language,
    destination_language: Language,
    input_text: String,
}

impl SessionState {
    /// Create a session with the initial pair from `config`.
    ///
    /// The initial pair is fixed policy, so it is used even when the catalog
    /// does not list it; display names then come from the locale table.
    pub fn new(catalog: Arc<LanguageCatalog>, config: &SessionConfig) -> Self {
        let resolve = |code: &str| {
            catalog.get(code).cloned().unwrap_or_else(|| {
                log::warn!("session: initial language {code:?} is not in the catalog");
                Language::from_code(code)
            })
        };

        let source_language = resolve(&config.source_language);
        let destination_language = resolve(&config.destination_language);

        Self {
            catalog,
            source_language,
            destination_language,
            input_text: String::new(),
        }
    }

    /// Replace the source language.
    pub fn select_source(&mut self, code: &str) -> Result<(), SessionError> {
        self.source_language = self.lookup(code)?;
        log::debug!("session: source language = {}", self.source_language);
        Ok(())
    }

    /// Replace the destination language.
    pub fn select_destination(&mut self, code: &str) -> Result<(), SessionError> {
        self.destination_language = self.lookup(code)?;
        log::debug!("session: destination language = {}", self.destination_language);
        Ok(())
    }

    /// Exchange source and destination.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.destination_language);
    }

    /// Replace the input text verbatim.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn source_language(&self) -> &Language {
        &self.source_language
    }

    pub fn destination_language(&self) -> &Language {
        &self.destination_language
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Owned copy used to build a translation request.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source_language: self.source_language.clone(),
            destination_language: self.destination_language.clone(),
            input_text: self.input_text.clone(),
        }
    }

    fn lookup(&self, code: &str) -> Result<Language, SessionError> {
        self.catalog
            .get(code)
            .cloned()
            .ok_or_else(|| SessionError::UnknownLanguage(code.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
