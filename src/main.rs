//! Cosmic Crush headless entry point
//!
//! Runs a scripted drag/release session against the simulation core and
//! prints the final frame as JSON. Rendering and touch capture live in the
//! host shells, not here.

#[cfg(not(target_arch = "wasm32"))]
use cosmic_crush::sim::{GameEvent, Simulation};
#[cfg(not(target_arch = "wasm32"))]
use cosmic_crush::{LogFeedback, Tuning};

/// Frames to simulate (~20 seconds at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 1200;
/// Frames per scripted gesture: drag for the first half, coast for the rest
#[cfg(not(target_arch = "wasm32"))]
const GESTURE_FRAMES: u32 = 120;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 0xC0_5A1C;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Crush (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> Tuning {
    match std::env::var_os("COSMIC_CRUSH_TUNING") {
        Some(path) => Tuning::load(&path).unwrap_or_else(|err| {
            log::warn!("{}; using default tuning", err);
            Tuning::default()
        }),
        None => Tuning::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::var("COSMIC_CRUSH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut sim = Simulation::new(seed, load_tuning())?.with_feedback(LogFeedback);
    sim.enter_playing()?;

    let mut absorbed = 0u32;
    for frame in 0..DEMO_FRAMES {
        let phase = frame % GESTURE_FRAMES;
        if phase < GESTURE_FRAMES / 2 {
            // Sweep the drag offset around a circle so the player spirals
            let angle = frame as f32 * 0.02;
            let reach = 40.0 + phase as f32 * 2.0;
            sim.drag(angle.cos() * reach, angle.sin() * reach);
        } else if phase == GESTURE_FRAMES / 2 {
            sim.release();
        }

        sim.frame();

        for event in sim.drain_events() {
            if let GameEvent::StarAbsorbed { .. } = event {
                absorbed += 1;
            }
        }

        if frame % 60 == 0 {
            let player = sim.player();
            log::info!(
                "frame {:>4}: pos ({:>8.1}, {:>8.1}) radius {:.0} stars {}",
                frame,
                player.pos.x,
                player.pos.y,
                player.radius,
                sim.stars().len()
            );
        }
    }

    sim.leave_playing()?;
    log::info!("Absorbed {} stars, final score {}", absorbed, sim.score());

    println!("{}", sim.view().to_json()?);
    Ok(())
}
