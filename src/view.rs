//! Read-only render snapshot
//!
//! Everything a presentation layer needs for one frame. Serializable so a host
//! can hand it across a JS or IPC boundary as JSON.

use serde::Serialize;

use crate::sim::{GameState, SessionPhase, Star};

/// One star as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// CSS-style hex color
    pub color: &'static str,
}

impl From<&Star> for StarView {
    fn from(star: &Star) -> Self {
        Self {
            id: star.id.0,
            x: star.pos.x,
            y: star.pos.y,
            radius: star.radius,
            color: star.color.hex(),
        }
    }
}

/// Player, score and stars for a single frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: SessionPhase,
    pub player_x: f32,
    pub player_y: f32,
    pub player_radius: f32,
    pub score: u32,
    pub stars: Vec<StarView>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            player_x: state.player.pos.x,
            player_y: state.player.pos.y,
            player_radius: state.player.radius,
            score: state.score,
            stars: state.field.stars().iter().map(StarView::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
