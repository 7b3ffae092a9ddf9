//! Per-frame simulation tick and the loop that drives it
//!
//! The host calls [`Simulation::frame`] from its display callback. While the
//! session is playing, each frame runs exactly one tick: integrate velocity
//! into position, then resolve collisions against the position the player had
//! before moving, then refill the star field if needed.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::{CollisionOutcome, check_collisions};
use super::input::InputController;
use super::scheduler::{FrameScheduler, TaskId};
use super::session::{SessionError, SessionPhase};
use super::state::{GameEvent, GameState, Player, Star};
use crate::feedback::{Feedback, ImpactStyle, NoFeedback};
use crate::tuning::{Tuning, TuningError};
use crate::view::FrameView;

/// Oldest events are dropped past this if the host never drains them
pub const MAX_PENDING_EVENTS: usize = 256;

/// Work queued for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// One simulation tick
    Tick,
    /// One inertial decay step
    Decay,
}

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub collisions: CollisionOutcome,
    pub spawned: usize,
}

/// Advance the game state by one tick
///
/// Returns `None` without touching anything unless the session is playing.
pub fn tick(
    state: &mut GameState,
    rng: &mut Pcg32,
    tuning: &Tuning,
    feedback: &mut dyn Feedback,
) -> Option<TickReport> {
    if !state.phase.is_playing() {
        return None;
    }

    let player = &mut state.player;
    if !player.vel.is_finite() {
        log::warn!("Non-finite velocity ({}, {}), stopping player", player.vel.x, player.vel.y);
        player.vel = Vec2::ZERO;
    }

    let prev_pos = player.pos;
    player.pos += player.vel;
    if !player.pos.is_finite() {
        log::warn!("Position overflowed at ({}, {}), stopping player", prev_pos.x, prev_pos.y);
        player.pos = prev_pos;
        player.vel = Vec2::ZERO;
    }

    let collisions = check_collisions(prev_pos, &mut state.player, &mut state.field, tuning);
    for _ in &collisions.absorbed {
        if let Err(err) = feedback.impact(ImpactStyle::Light) {
            log::trace!("Feedback dropped: {}", err);
        }
    }
    if collisions.grew() {
        state.score = state.player.score();
    }
    if collisions.culled > 0 {
        log::debug!("Culled {} distant stars", collisions.culled);
    }

    let spawned = if collisions.spawn_requested {
        state.field.replenish(prev_pos, rng, tuning)
    } else {
        0
    };

    state.time_ticks += 1;
    Some(TickReport {
        collisions,
        spawned,
    })
}

/// A game session: state, input inertia and the frame-driven loop
pub struct Simulation {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    input: InputController,
    scheduler: FrameScheduler<FrameTask>,
    tick_task: Option<TaskId>,
    feedback: Box<dyn Feedback>,
    events: Vec<GameEvent>,
}

impl Simulation {
    /// New session in the `Start` phase
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = GameState::new(seed, &tuning);
        let rng = state.rng_state.to_rng();
        Ok(Self {
            state,
            tuning,
            rng,
            input: InputController::new(),
            scheduler: FrameScheduler::new(),
            tick_task: None,
            feedback: Box::new(NoFeedback),
            events: Vec::new(),
        })
    }

    pub fn with_feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    // === Read-only accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn stars(&self) -> &[Star] {
        self.state.field.stars()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.state.time_ticks
    }

    pub fn is_decaying(&self) -> bool {
        self.input.is_decaying()
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state)
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Session control ===

    /// Begin ticking from the next frame
    pub fn enter_playing(&mut self) -> Result<(), SessionError> {
        self.state.phase = self.state.phase.transition(SessionPhase::Playing)?;
        // First tick waits for the next frame callback rather than running
        // inside this call, so the host decides when simulation starts.
        self.tick_task = Some(self.scheduler.schedule(FrameTask::Tick));
        log::info!("Session playing (seed {})", self.state.seed);
        self.push_event(GameEvent::SessionChanged {
            phase: SessionPhase::Playing,
        });
        Ok(())
    }

    /// Stop ticking. A tick already queued for the next frame never runs.
    pub fn leave_playing(&mut self) -> Result<(), SessionError> {
        self.state.phase = self.state.phase.transition(SessionPhase::Start)?;
        if let Some(id) = self.tick_task.take() {
            self.scheduler.cancel(id);
        }
        log::info!(
            "Session stopped after {} ticks, score {}",
            self.state.time_ticks,
            self.state.score
        );
        self.push_event(GameEvent::SessionChanged {
            phase: SessionPhase::Start,
        });
        Ok(())
    }

    /// Start over with a fresh player, empty field and new seed
    pub fn reset(&mut self, seed: u64) -> Result<(), SessionError> {
        if self.state.phase.is_playing() {
            return Err(SessionError::ResetWhilePlaying);
        }
        self.input.cancel_decay(&mut self.scheduler);
        self.scheduler.clear();
        self.tick_task = None;
        self.state = GameState::new(seed, &self.tuning);
        self.rng = self.state.rng_state.to_rng();
        self.events.clear();
        log::info!("Session reset (seed {})", seed);
        Ok(())
    }

    // === Input boundary ===

    /// Drag sample, offset from the gesture start in screen units
    pub fn drag(&mut self, dx: f32, dy: f32) -> bool {
        self.input.drag(
            &mut self.state.player.vel,
            Vec2::new(dx, dy),
            &self.tuning,
            &mut self.scheduler,
        )
    }

    /// Set per-tick velocity directly, overriding any decay
    pub fn set_velocity(&mut self, vx: f32, vy: f32) -> bool {
        self.input.set_velocity(
            &mut self.state.player.vel,
            Vec2::new(vx, vy),
            &self.tuning,
            &mut self.scheduler,
        )
    }

    /// Gesture released: coast to a stop
    pub fn start_decay(&mut self) {
        self.input
            .release(&mut self.state.player.vel, &self.tuning, &mut self.scheduler);
    }

    /// Alias for [`Simulation::start_decay`] matching the gesture vocabulary
    pub fn release(&mut self) {
        self.start_decay();
    }

    // === Frame loop ===

    /// Host frame callback: run every task that was due before this frame
    pub fn frame(&mut self) {
        for id in self.scheduler.due() {
            let Some(task) = self.scheduler.take(id) else {
                continue;
            };
            match task {
                FrameTask::Tick => self.run_tick(),
                FrameTask::Decay => {
                    self.input.decay_step(
                        &mut self.state.player.vel,
                        &self.tuning,
                        &mut self.scheduler,
                    );
                }
            }
        }
    }

    fn run_tick(&mut self) {
        self.tick_task = None;

        if let Some(report) = tick(
            &mut self.state,
            &mut self.rng,
            &self.tuning,
            &mut *self.feedback,
        ) {
            self.record(report);
        }

        if self.state.phase.is_playing() {
            self.tick_task = Some(self.scheduler.schedule(FrameTask::Tick));
        }
    }

    fn record(&mut self, report: TickReport) {
        let new_radius = self.state.player.radius;
        for id in report.collisions.absorbed {
            self.push_event(GameEvent::StarAbsorbed { id, new_radius });
        }
        if report.collisions.culled > 0 {
            self.push_event(GameEvent::StarsCulled {
                count: report.collisions.culled,
            });
        }
        if report.spawned > 0 {
            self.push_event(GameEvent::StarsSpawned {
                count: report.spawned,
            });
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackError;
    use crate::sim::state::{StarColor, StarId};
    use std::cell::Cell;
    use std::rc::Rc;

    fn new_sim(seed: u64) -> Simulation {
        Simulation::new(seed, Tuning::default()).expect("default tuning is valid")
    }

    fn star(id: u64, x: f32, y: f32, radius: f32) -> Star {
        Star {
            id: StarId(id),
            pos: Vec2::new(x, y),
            radius,
            color: StarColor::White,
        }
    }

    struct CountingFeedback {
        calls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl Feedback for CountingFeedback {
        fn impact(&mut self, _style: ImpactStyle) -> Result<(), FeedbackError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(FeedbackError::Unavailable("no vibrator".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_no_tick_before_playing() {
        let mut sim = new_sim(1);
        sim.set_velocity(3.0, 0.0);
        for _ in 0..5 {
            sim.frame();
        }
        assert_eq!(sim.time_ticks(), 0);
        assert_eq!(sim.player().pos, Vec2::ZERO);
        assert!(sim.stars().is_empty());
    }

    #[test]
    fn test_first_tick_fills_field() {
        let mut sim = new_sim(2);
        sim.enter_playing().expect("start -> playing");
        assert_eq!(sim.time_ticks(), 0);
        assert!(sim.stars().is_empty());
        sim.frame();

        assert_eq!(sim.time_ticks(), 1);
        assert_eq!(sim.stars().len(), 50);
        let events = sim.drain_events();
        assert!(events.contains(&GameEvent::StarsSpawned { count: 50 }));
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut sim = new_sim(3);
        sim.enter_playing().unwrap();
        for _ in 0..10 {
            sim.frame();
        }
        assert_eq!(sim.time_ticks(), 10);
    }

    #[test]
    fn test_leave_playing_cancels_queued_tick() {
        let mut sim = new_sim(4);
        sim.enter_playing().unwrap();
        sim.frame();
        sim.set_velocity(2.0, 0.0);
        sim.leave_playing().unwrap();

        for _ in 0..5 {
            sim.frame();
        }
        assert_eq!(sim.time_ticks(), 1);
        assert_eq!(sim.player().pos, Vec2::ZERO);

        sim.enter_playing().unwrap();
        sim.frame();
        assert_eq!(sim.time_ticks(), 2);
        assert_eq!(sim.player().pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_invalid_session_calls() {
        let mut sim = new_sim(5);
        assert!(sim.leave_playing().is_err());
        sim.enter_playing().unwrap();
        assert!(sim.enter_playing().is_err());
        assert_eq!(sim.reset(9), Err(SessionError::ResetWhilePlaying));
    }

    #[test]
    fn test_collision_uses_pre_move_position() {
        let mut sim = new_sim(6);
        // Reachable only from the old position
        sim.state.field.insert(star(1, -20.0, 0.0, 5.0));
        sim.set_velocity(100.0, 0.0);
        sim.enter_playing().unwrap();
        sim.frame();

        assert_eq!(sim.player().pos, Vec2::new(100.0, 0.0));
        assert_eq!(sim.player().radius, 21.0);
        assert_eq!(sim.score(), 21);
        assert!(sim.state.field.get(StarId(1)).is_none());
    }

    #[test]
    fn test_spawn_anchored_at_pre_move_position() {
        let mut sim = new_sim(7);
        sim.set_velocity(100.0, 0.0);
        sim.enter_playing().unwrap();
        sim.frame();

        for s in sim.stars() {
            let d = s.pos.length();
            assert!(d >= 389.9 && d <= 780.1);
        }
    }

    #[test]
    fn test_absorption_feedback_and_events() {
        let calls = Rc::new(Cell::new(0));
        let mut sim = new_sim(8).with_feedback(CountingFeedback {
            calls: calls.clone(),
            fail: false,
        });
        sim.state.field.insert(star(1, 10.0, 0.0, 5.0));
        sim.state.field.insert(star(2, -10.0, 0.0, 5.0));
        sim.enter_playing().unwrap();
        sim.drain_events();
        sim.frame();

        assert_eq!(calls.get(), 2);
        assert_eq!(sim.player().radius, 21.0);
        let events = sim.drain_events();
        assert!(events.contains(&GameEvent::StarAbsorbed {
            id: StarId(1),
            new_radius: 21.0
        }));
        assert!(events.contains(&GameEvent::StarsSpawned { count: 50 }));
    }

    #[test]
    fn test_feedback_failure_is_swallowed() {
        let calls = Rc::new(Cell::new(0));
        let mut sim = new_sim(9).with_feedback(CountingFeedback {
            calls: calls.clone(),
            fail: true,
        });
        sim.state.field.insert(star(1, 10.0, 0.0, 5.0));
        sim.enter_playing().unwrap();
        sim.frame();

        assert_eq!(calls.get(), 1);
        assert_eq!(sim.score(), 21);
        assert_eq!(sim.stars().len(), 50);
    }

    #[test]
    fn test_decay_runs_alongside_ticks() {
        let mut sim = new_sim(10);
        sim.enter_playing().unwrap();
        sim.drag(40.0, 0.0);
        sim.frame();
        assert_eq!(sim.player().pos, Vec2::new(2.0, 0.0));

        sim.release();
        assert!((sim.player().vel.x - 1.9).abs() < 1e-6);
        sim.frame();
        // Tick queued before the decay step runs first
        assert!((sim.player().pos.x - 3.9).abs() < 1e-5);
        assert!((sim.player().vel.x - 1.805).abs() < 1e-5);

        sim.drag(-20.0, 0.0);
        assert!(!sim.is_decaying());
        sim.frame();
        assert!((sim.player().pos.x - 2.9).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_velocity_is_contained() {
        let mut sim = new_sim(11);
        sim.state.player.vel = Vec2::new(f32::NAN, 1.0);
        sim.enter_playing().unwrap();
        sim.frame();
        assert_eq!(sim.player().pos, Vec2::ZERO);
        assert_eq!(sim.player().vel, Vec2::ZERO);
    }

    #[test]
    fn test_huge_velocity_is_clamped() {
        let mut sim = new_sim(12);
        assert!(sim.set_velocity(f32::MAX, 0.0));
        assert_eq!(sim.player().vel, Vec2::new(sim.tuning().max_speed, 0.0));

        sim.enter_playing().unwrap();
        for _ in 0..5 {
            sim.frame();
        }
        sim.set_velocity(0.0, 0.0);
        for _ in 0..5 {
            sim.frame();
        }

        assert_eq!(sim.player().pos, Vec2::new(5.0 * sim.tuning().max_speed, 0.0));
        assert!(!sim.stars().is_empty());
        assert!(sim.stars().iter().all(|s| s.pos.is_finite()));
    }

    #[test]
    fn test_position_overflow_rejects_step() {
        let mut sim = new_sim(13);
        let edge = Vec2::new(f32::MAX, 0.0);
        sim.state.player.pos = edge;
        sim.state.player.vel = Vec2::new(f32::MAX, 0.0);
        sim.enter_playing().unwrap();
        sim.frame();

        assert_eq!(sim.player().pos, edge);
        assert_eq!(sim.player().vel, Vec2::ZERO);
        assert_eq!(sim.time_ticks(), 1);
    }

    #[test]
    fn test_reset() {
        let mut sim = new_sim(12);
        sim.state.field.insert(star(1, 10.0, 0.0, 5.0));
        sim.enter_playing().unwrap();
        sim.drag(100.0, 0.0);
        sim.frame();
        sim.release();
        sim.leave_playing().unwrap();

        sim.reset(13).unwrap();
        assert_eq!(sim.player().pos, Vec2::ZERO);
        assert_eq!(sim.player().vel, Vec2::ZERO);
        assert_eq!(sim.player().radius, 20.0);
        assert_eq!(sim.score(), 20);
        assert_eq!(sim.time_ticks(), 0);
        assert!(sim.stars().is_empty());
        assert!(!sim.is_decaying());
        assert!(sim.drain_events().is_empty());
        assert_eq!(sim.state().seed, 13);
    }

    #[test]
    fn test_determinism() {
        let mut a = new_sim(99999);
        let mut b = new_sim(99999);
        a.enter_playing().unwrap();
        b.enter_playing().unwrap();

        let drags = [(10.0, 5.0), (200.0, -80.0), (-50.0, 300.0)];
        for (dx, dy) in drags {
            for sim in [&mut a, &mut b] {
                sim.drag(dx, dy);
                for _ in 0..40 {
                    sim.frame();
                }
            }
        }

        assert_eq!(a.player().pos, b.player().pos);
        assert_eq!(a.player().radius, b.player().radius);
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn test_free_tick_gated_on_phase() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let mut rng = state.rng_state.to_rng();
        assert!(tick(&mut state, &mut rng, &tuning, &mut NoFeedback).is_none());

        state.phase = SessionPhase::Playing;
        let report = tick(&mut state, &mut rng, &tuning, &mut NoFeedback).expect("playing");
        assert_eq!(report.spawned, 50);
        assert!(report.collisions.spawn_requested);
    }
}
