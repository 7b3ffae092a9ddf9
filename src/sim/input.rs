//! Inertial drag input
//!
//! A drag gesture sets the player's velocity directly from the total drag
//! offset. Releasing starts a decay chain: one step immediately, then one step
//! per frame until the horizontal speed falls to the stop threshold.
//!
//! Only `vx` is checked for termination. A purely vertical flick therefore
//! stops decaying after the first step and keeps drifting at 95% of its
//! release speed.

use glam::Vec2;

use super::scheduler::{FrameScheduler, TaskId};
use super::tick::FrameTask;
use crate::tuning::Tuning;

/// Decay continues while this holds
#[inline]
pub fn keeps_decaying(vel: Vec2, stop_speed: f32) -> bool {
    vel.x.abs() > stop_speed
}

/// Limit `vel` to `max_speed` without overflowing on huge components
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    // Per-axis clamp first keeps length_squared finite
    vel.clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed))
        .clamp_length_max(max_speed)
}

/// Owns the pending decay step, if any
#[derive(Debug, Clone, Default)]
pub struct InputController {
    decay_task: Option<TaskId>,
}

impl InputController {
    pub fn new() -> Self {
        Self { decay_task: None }
    }

    pub fn is_decaying(&self) -> bool {
        self.decay_task.is_some()
    }

    /// Drag sample, `delta` measured from the gesture start
    ///
    /// Overrides any pending decay. Non-finite samples are ignored.
    pub fn drag(
        &mut self,
        vel: &mut Vec2,
        delta: Vec2,
        tuning: &Tuning,
        sched: &mut FrameScheduler<FrameTask>,
    ) -> bool {
        self.set_velocity(vel, delta * tuning.drag_sensitivity, tuning, sched)
    }

    /// Replace the velocity outright, cancelling any pending decay
    ///
    /// Speeds above `max_speed` are clamped; non-finite values are ignored.
    pub fn set_velocity(
        &mut self,
        vel: &mut Vec2,
        new_vel: Vec2,
        tuning: &Tuning,
        sched: &mut FrameScheduler<FrameTask>,
    ) -> bool {
        if !new_vel.is_finite() {
            log::warn!("Ignoring non-finite velocity ({}, {})", new_vel.x, new_vel.y);
            return false;
        }
        self.cancel_decay(sched);
        *vel = clamp_speed(new_vel, tuning.max_speed);
        true
    }

    /// Gesture released: start a fresh decay chain
    pub fn release(
        &mut self,
        vel: &mut Vec2,
        tuning: &Tuning,
        sched: &mut FrameScheduler<FrameTask>,
    ) {
        self.cancel_decay(sched);
        self.decay_step(vel, tuning, sched);
    }

    /// Apply one decay step and reschedule if still moving horizontally
    ///
    /// Returns whether another step was scheduled.
    pub fn decay_step(
        &mut self,
        vel: &mut Vec2,
        tuning: &Tuning,
        sched: &mut FrameScheduler<FrameTask>,
    ) -> bool {
        self.decay_task = None;
        *vel *= tuning.decay_factor;
        if keeps_decaying(*vel, tuning.decay_stop_speed) {
            self.decay_task = Some(sched.schedule(FrameTask::Decay));
            true
        } else {
            false
        }
    }

    /// Cancel the pending decay step. Returns true if one was pending.
    pub fn cancel_decay(&mut self, sched: &mut FrameScheduler<FrameTask>) -> bool {
        match self.decay_task.take() {
            Some(id) => sched.cancel(id),
            None => false,
        }
    }
}
