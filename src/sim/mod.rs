//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform concerns:
//! - One tick per host frame, velocity in per-tick units
//! - Seeded RNG only
//! - Every mutation on the host's single logical thread

pub mod collision;
pub mod field;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, can_absorb, check_collisions};
pub use field::StarField;
pub use input::InputController;
pub use scheduler::{FrameScheduler, TaskId};
pub use session::{SessionError, SessionPhase};
pub use state::{GameEvent, GameState, Player, RngState, Star, StarColor, StarId};
pub use tick::{FrameTask, MAX_PENDING_EVENTS, Simulation, TickReport, tick};
