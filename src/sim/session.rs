//! Session phase and its transitions

use serde::Serialize;
use thiserror::Error;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionPhase {
    /// Title screen, no ticks run
    #[default]
    Start,
    /// Active gameplay, one tick per frame
    Playing,
}

/// Errors from session control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid session transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: SessionPhase,
        to: SessionPhase,
    },

    #[error("cannot reset a session while it is playing")]
    ResetWhilePlaying,
}

impl SessionPhase {
    /// Move to `to`, rejecting self-transitions
    pub fn transition(self, to: SessionPhase) -> Result<SessionPhase, SessionError> {
        match (self, to) {
            (SessionPhase::Start, SessionPhase::Playing)
            | (SessionPhase::Playing, SessionPhase::Start) => Ok(to),
            _ => Err(SessionError::InvalidTransition { from: self, to }),
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == SessionPhase::Playing
    }
}
