//! Collision detection and growth
//!
//! One pass over the star field per tick: each star is either absorbed by the
//! player, culled for being too far away, or kept. Absorption is decided
//! against the radius the player had when the pass started.

use glam::Vec2;

use super::field::StarField;
use super::state::{Player, StarId};
use crate::tuning::Tuning;

/// Result of a collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Stars eaten this pass
    pub absorbed: Vec<StarId>,
    /// Stars dropped for distance
    pub culled: usize,
    /// Whether the field should be refilled around the player
    pub spawn_requested: bool,
}

impl CollisionOutcome {
    pub fn grew(&self) -> bool {
        !self.absorbed.is_empty()
    }
}

/// Only a strictly larger player can eat a star
#[inline]
pub fn can_absorb(player_radius: f32, star_radius: f32) -> bool {
    player_radius > star_radius
}

/// Test the player at `pos` against every star
///
/// Absorbed stars are removed and the player grows to
/// `radius_at_start + growth_per_absorb`; eating several stars in one pass
/// still yields a single step of growth. Stars farther than the cull distance
/// are dropped, stars exactly at it are kept. Absorption wins over culling.
pub fn check_collisions(
    pos: Vec2,
    player: &mut Player,
    field: &mut StarField,
    tuning: &Tuning,
) -> CollisionOutcome {
    let radius = player.radius;
    let cull_distance = tuning.cull_distance();
    let mut outcome = CollisionOutcome::default();

    field.retain(|star| {
        let dist = pos.distance(star.pos);

        // Touching is not overlapping
        let overlapping = dist < radius + star.radius;
        if overlapping && can_absorb(radius, star.radius) {
            outcome.absorbed.push(star.id);
            return false;
        }

        if dist > cull_distance {
            outcome.culled += 1;
            return false;
        }
        true
    });

    if outcome.grew() {
        player.radius = radius + tuning.growth_per_absorb;
    }

    outcome.spawn_requested = outcome.grew() || field.len() < tuning.low_water_mark;
    outcome
}
