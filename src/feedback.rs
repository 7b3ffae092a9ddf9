//! Haptic/audio feedback boundary
//!
//! The simulation fires a light impact on every absorption and never waits on
//! or reacts to the result. Hosts plug in their vibration or sound backend by
//! implementing [`Feedback`].

use thiserror::Error;

/// Impact strengths a host may map to haptic patterns or sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    /// A star was absorbed
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("feedback unavailable: {0}")]
    Unavailable(String),
}

/// Fire-and-forget feedback sink
pub trait Feedback {
    fn impact(&mut self, style: ImpactStyle) -> Result<(), FeedbackError>;
}

/// Silent sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn impact(&mut self, _style: ImpactStyle) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Logs each impact, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn impact(&mut self, style: ImpactStyle) -> Result<(), FeedbackError> {
        log::debug!("Impact: {:?}", style);
        Ok(())
    }
}
