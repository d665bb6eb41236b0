//! Session module — language selection and input state.

pub mod state;

pub use state::{SessionError, SessionSnapshot, SessionState};
