//! Cosmic Crush - an accretion arcade game core
//!
//! Core modules:
//! - `sim`: Single-threaded simulation (input inertia, tick loop, collisions, star field)
//! - `feedback`: Fire-and-forget haptic/audio boundary
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only render snapshot

pub mod feedback;
pub mod sim;
pub mod tuning;
pub mod view;

pub use feedback::{Feedback, FeedbackError, ImpactStyle, LogFeedback, NoFeedback};
pub use tuning::{Tuning, TuningError};
pub use view::{FrameView, StarView};

use glam::Vec2;

/// Game configuration constants
///
/// These are the compile-time defaults behind [`Tuning::default`].
pub mod consts {
    /// Reference screen width in world units (portrait phone)
    pub const REFERENCE_WIDTH: f32 = 390.0;

    /// Player defaults
    pub const PLAYER_START_RADIUS: f32 = 20.0;
    /// Radius gained per absorption tick
    pub const GROWTH_PER_ABSORB: f32 = 1.0;

    /// Drag delta to per-tick velocity
    pub const DRAG_SENSITIVITY: f32 = 0.05;
    /// Velocity multiplier per decay step after release
    pub const DECAY_FACTOR: f32 = 0.95;
    /// Decay stops once |vx| drops to this
    pub const DECAY_STOP_SPEED: f32 = 0.1;
    /// Per-tick speed cap on accepted velocities
    pub const MAX_SPEED: f32 = 100.0;

    /// Stars farther than this many reference widths are culled
    pub const CULL_WIDTH_FACTOR: f32 = 3.0;
    /// Spawn ring, in reference widths from the anchor
    pub const SPAWN_MIN_WIDTH_FACTOR: f32 = 1.0;
    pub const SPAWN_MAX_WIDTH_FACTOR: f32 = 2.0;

    /// Star field population
    pub const TARGET_POPULATION: usize = 50;
    pub const LOW_WATER_MARK: usize = 30;

    /// Star radius range [min, max)
    pub const STAR_RADIUS_MIN: f32 = 4.0;
    pub const STAR_RADIUS_MAX: f32 = 16.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
