//! Tile Flap entry point
//!
//! Headless native host: polls a monotonic clock, drives the fixed-step
//! simulation in demo mode and logs what a renderer would draw.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `FLAPPY_SEED`: run seed (default: derived from the system time)
//! - `FLAPPY_TUNING`: inline JSON overriding any tuning values

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tile_flap::Tuning;
use tile_flap::sim::{Clock, GameEvent, GameState, TickInput};

/// Sessions to play before exiting
const DEMO_SESSIONS: u32 = 3;
/// Target frame pacing for the host loop
const FRAME: Duration = Duration::from_micros(16_667);
/// Hard stop for a single demo session
const MAX_SESSION_SECS: u64 = 120;

/// Host-side game instance
struct Game {
    state: GameState,
    clock: Clock,
    input: TickInput,
    last_time: Instant,
    last_snapshot: Instant,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        let now = Instant::now();
        Self {
            state: GameState::new(seed, tuning),
            clock: Clock::new(&tuning),
            input: TickInput {
                jump_held: false,
                idle_mode: true,
            },
            last_time: now,
            last_snapshot: now,
        }
    }

    /// Run simulation ticks for the time elapsed since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_time).as_secs_f64();
        self.last_time = now;

        self.clock.drive(&mut self.state, &self.input, dt);

        for event in self.state.drain_events() {
            match event {
                GameEvent::Started { session } => log::info!("Demo session {} running", session),
                GameEvent::Jumped => log::trace!("Flap"),
                GameEvent::Scored { score } => log::info!("Score: {}", score),
                GameEvent::Lost { score, cause } => {
                    log::info!("Game over - score {} ({:?})", score, cause)
                }
            }
        }
    }

    /// Stand-in for a renderer: dump the read-only view once per second
    fn render(&mut self) {
        if self.last_snapshot.elapsed() < Duration::from_secs(1) {
            return;
        }
        self.last_snapshot = Instant::now();
        match serde_json::to_string(&self.state.snapshot()) {
            Ok(json) => log::debug!("{}", json),
            Err(e) => log::warn!("Snapshot error: {}", e),
        }
    }
}

fn load_seed() -> u64 {
    if let Ok(raw) = std::env::var("FLAPPY_SEED") {
        match raw.trim().parse() {
            Ok(seed) => return seed,
            Err(e) => log::warn!("Ignoring FLAPPY_SEED {:?}: {}", raw, e),
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn load_tuning() -> Tuning {
    let Ok(json) = std::env::var("FLAPPY_TUNING") else {
        return Tuning::default();
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from FLAPPY_TUNING");
            tuning
        }
        Err(e) => {
            log::error!("{} - using default tuning", e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tile Flap (native) starting...");

    let seed = load_seed();
    let tuning = load_tuning();
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(seed, tuning);

    while game.state.sessions_started < DEMO_SESSIONS {
        game.state.start();
        game.clock.reset();
        game.last_time = Instant::now();
        let session_start = Instant::now();

        while game.state.session.is_some() {
            game.update();
            game.render();

            if session_start.elapsed() > Duration::from_secs(MAX_SESSION_SECS) {
                log::info!("Demo session time limit reached (score {})", game.state.score());
                break;
            }
            std::thread::sleep(FRAME);
        }
        if game.state.session.is_some() {
            break;
        }
    }

    match game.state.best_score() {
        Some(best) => log::info!("Best score this run: {}", best),
        None => log::info!("No points scored this run"),
    }
    for (rank, entry) in game.state.high_scores.entries.iter().enumerate() {
        log::info!(
            "#{} session {}: {} ({} ticks)",
            rank + 1,
            entry.session,
            entry.score,
            entry.ticks
        );
    }
}
