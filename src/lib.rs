//! On-device translation session.
//!
//! A user picks a source and destination language, enters text and receives
//! a translation from a local engine that downloads per-language-pair models
//! on first use.
//!
//! * [`catalog`]      — selectable languages and their display names.
//! * [`session`]      — current language selection and input text.
//! * [`engine`]       — gateway to the translation engine.
//! * [`orchestrator`] — the request state machine.
//! * [`app`]          — the UI-facing [`app::TranslationSession`].
//! * [`config`]       — `settings.toml` persistence.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod orchestrator;
pub mod session;
