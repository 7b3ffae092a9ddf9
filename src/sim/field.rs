//! Star field: the mutable star collection and procedural refill
//!
//! Stars are placed on a ring around an anchor (the player), so the field is
//! always populated just off-screen in every direction.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{Star, StarColor, StarId};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Owns every live star, at most one per [`StarId`]. Iteration order carries
/// no meaning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    pub fn new() -> Self {
        Self { stars: Vec::new() }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn get(&self, id: StarId) -> Option<&Star> {
        self.stars.iter().find(|s| s.id == id)
    }

    /// Insert a star, rejecting it if its id is already present
    pub fn insert(&mut self, star: Star) -> bool {
        if self.get(star.id).is_some() {
            return false;
        }
        self.stars.push(star);
        true
    }

    /// Keep only stars for which `keep` returns true
    pub fn retain(&mut self, keep: impl FnMut(&Star) -> bool) {
        self.stars.retain(keep);
    }

    /// Append stars around `anchor` until the target population is reached
    ///
    /// Never removes anything. Returns how many stars were added (0 when the
    /// field is already at or above target).
    pub fn replenish<R: Rng>(&mut self, anchor: Vec2, rng: &mut R, tuning: &Tuning) -> usize {
        let target = tuning.target_population;
        let before = self.stars.len();
        if before >= target {
            return 0;
        }

        self.stars.reserve(target - before);
        while self.stars.len() < target {
            // A repeated id just rolls again
            self.insert(spawn_star(anchor, rng, tuning));
        }

        let added = self.stars.len() - before;
        log::debug!(
            "Spawned {} stars around ({:.1}, {:.1}), field now {}",
            added,
            anchor.x,
            anchor.y,
            self.stars.len()
        );
        added
    }
}

/// Roll one star on the spawn ring around `anchor`
pub fn spawn_star<R: Rng>(anchor: Vec2, rng: &mut R, tuning: &Tuning) -> Star {
    let (min_dist, max_dist) = tuning.spawn_band();
    let angle = rng.random_range(0.0..TAU);
    let dist = rng.random_range(min_dist..max_dist);
    let radius = rng.random_range(tuning.star_radius_min..tuning.star_radius_max);
    let color = StarColor::PALETTE[rng.random_range(0..StarColor::PALETTE.len())];

    Star {
        id: StarId(rng.random()),
        pos: anchor + polar_to_cartesian(dist, angle),
        radius,
        color,
    }
}
