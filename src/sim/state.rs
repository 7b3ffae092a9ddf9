//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::field::StarField;
use super::session::SessionPhase;
use crate::tuning::Tuning;

/// Star identity, drawn from the session RNG at spawn
///
/// Unique with overwhelming probability; nothing relies on it being
/// cryptographically unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StarId(pub u64);

/// Fixed star palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StarColor {
    Cyan,
    Blue,
    White,
    Magenta,
}

impl StarColor {
    pub const PALETTE: [StarColor; 4] = [
        StarColor::Cyan,
        StarColor::Blue,
        StarColor::White,
        StarColor::Magenta,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            StarColor::Cyan => "#00F2FF",
            StarColor::Blue => "#0072FF",
            StarColor::White => "#FFFFFF",
            StarColor::Magenta => "#FF00DE",
        }
    }
}

/// A star entity. Immutable once spawned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub id: StarId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: StarColor,
}

/// The player's body
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    /// Never shrinks outside a reset
    pub radius: f32,
    /// Displacement applied per tick
    pub vel: Vec2,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            vel: Vec2::ZERO,
        }
    }

    /// Score shown on the HUD
    #[inline]
    pub fn score(&self) -> u32 {
        self.radius.floor() as u32
    }
}

/// Things that happened during a frame, for presentation and audio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    StarAbsorbed { id: StarId, new_radius: f32 },
    StarsCulled { count: usize },
    StarsSpawned { count: usize },
    SessionChanged { phase: SessionPhase },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// floor(player radius), updated on growth
    pub score: u32,
    /// Ticks run since the last reset
    pub time_ticks: u64,
    pub phase: SessionPhase,
    pub player: Player,
    pub field: StarField,
}

impl GameState {
    /// Create a fresh session in the `Start` phase with an empty field
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let player = Player::new(tuning.initial_player_radius);
        Self {
            seed,
            rng_state: RngState::new(seed),
            score: player.score(),
            time_ticks: 0,
            phase: SessionPhase::Start,
            player,
            field: StarField::new(),
        }
    }
}
