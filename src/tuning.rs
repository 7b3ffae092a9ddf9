//! Game balance constants
//!
//! Every number the simulation uses lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Reference screen width (W) that scales spawn and cull distances
    pub reference_width: f32,

    // === Player ===
    pub initial_player_radius: f32,
    pub growth_per_absorb: f32,

    // === Input ===
    pub drag_sensitivity: f32,
    pub decay_factor: f32,
    /// Decay keeps running while |vx| is above this
    pub decay_stop_speed: f32,
    /// Accepted velocities are clamped to this length
    pub max_speed: f32,

    // === Star field ===
    pub cull_width_factor: f32,
    pub spawn_min_width_factor: f32,
    pub spawn_max_width_factor: f32,
    pub target_population: usize,
    pub low_water_mark: usize,
    pub star_radius_min: f32,
    pub star_radius_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_width: REFERENCE_WIDTH,

            initial_player_radius: PLAYER_START_RADIUS,
            growth_per_absorb: GROWTH_PER_ABSORB,

            drag_sensitivity: DRAG_SENSITIVITY,
            decay_factor: DECAY_FACTOR,
            decay_stop_speed: DECAY_STOP_SPEED,
            max_speed: MAX_SPEED,

            cull_width_factor: CULL_WIDTH_FACTOR,
            spawn_min_width_factor: SPAWN_MIN_WIDTH_FACTOR,
            spawn_max_width_factor: SPAWN_MAX_WIDTH_FACTOR,
            target_population: TARGET_POPULATION,
            low_water_mark: LOW_WATER_MARK,
            star_radius_min: STAR_RADIUS_MIN,
            star_radius_max: STAR_RADIUS_MAX,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Stars strictly farther than this from the player are culled
    #[inline]
    pub fn cull_distance(&self) -> f32 {
        self.reference_width * self.cull_width_factor
    }

    /// Spawn ring as (min, max) distance from the anchor
    #[inline]
    pub fn spawn_band(&self) -> (f32, f32) {
        (
            self.reference_width * self.spawn_min_width_factor,
            self.reference_width * self.spawn_max_width_factor,
        )
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.reference_width.is_finite() && self.reference_width > 0.0) {
            return invalid("reference_width", "must be finite and positive");
        }
        if !(self.initial_player_radius.is_finite() && self.initial_player_radius > 0.0) {
            return invalid("initial_player_radius", "must be finite and positive");
        }
        if !(self.growth_per_absorb.is_finite() && self.growth_per_absorb >= 0.0) {
            return invalid("growth_per_absorb", "must be finite and non-negative");
        }
        if !self.drag_sensitivity.is_finite() {
            return invalid("drag_sensitivity", "must be finite");
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return invalid("decay_factor", "must be in (0, 1)");
        }
        if !(self.decay_stop_speed.is_finite() && self.decay_stop_speed >= 0.0) {
            return invalid("decay_stop_speed", "must be finite and non-negative");
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return invalid("max_speed", "must be finite and positive");
        }
        if !(self.cull_width_factor.is_finite() && self.cull_width_factor > 0.0) {
            return invalid("cull_width_factor", "must be finite and positive");
        }
        if !(self.spawn_min_width_factor.is_finite() && self.spawn_min_width_factor >= 0.0) {
            return invalid("spawn_min_width_factor", "must be finite and non-negative");
        }
        if !(self.spawn_max_width_factor.is_finite()
            && self.spawn_max_width_factor > self.spawn_min_width_factor)
        {
            return invalid("spawn_max_width_factor", "must exceed spawn_min_width_factor");
        }
        if self.target_population == 0 {
            return invalid("target_population", "must be at least 1");
        }
        if self.low_water_mark > self.target_population {
            return invalid("low_water_mark", "must not exceed target_population");
        }
        if !(self.star_radius_min.is_finite() && self.star_radius_min > 0.0) {
            return invalid("star_radius_min", "must be finite and positive");
        }
        if !(self.star_radius_max.is_finite() && self.star_radius_max > self.star_radius_min) {
            return invalid("star_radius_max", "must exceed star_radius_min");
        }
        Ok(())
    }
}
