//! Fixed timestep clock
//!
//! Turns wall-clock frame deltas into whole simulation ticks. The leftover
//! fraction of a step carries over to the next frame so the simulation rate
//! never drifts from the display rate.

use super::state::{GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Absorbs float error when the accumulator lands exactly on a step boundary
const STEP_EPSILON: f64 = 1e-9;

/// Accumulates wall time and emits fixed ticks
#[derive(Debug, Clone)]
pub struct Clock {
    step: f64,
    max_frame: f64,
    accumulator: f64,
    /// Total ticks emitted since creation
    pub ticks: u64,
}

impl Clock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            step: tuning.step(),
            max_frame: tuning.max_frame_seconds,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Fixed step in seconds
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Feed a wall-clock delta (seconds); returns how many ticks are due
    pub fn advance(&mut self, wall_dt: f64) -> u32 {
        let dt = if !(wall_dt >= 0.0) {
            log::warn!("Ignoring invalid frame delta {}", wall_dt);
            0.0
        } else if wall_dt > self.max_frame {
            log::warn!(
                "Frame took {:.1}ms - clamping to {:.0}ms",
                wall_dt * 1000.0,
                self.max_frame * 1000.0
            );
            self.max_frame
        } else {
            wall_dt
        };

        self.accumulator += dt;

        let mut due = 0;
        while self.accumulator + STEP_EPSILON >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        self.ticks += due as u64;
        due
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Leftover fraction of a step, for render interpolation
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    /// Run every tick due for this frame through the simulation.
    ///
    /// Time only accumulates while Playing; a session that ends mid-batch
    /// discards the rest of the batch. Returns the number of ticks run.
    pub fn drive(&mut self, state: &mut GameState, input: &TickInput, wall_dt: f64) -> u32 {
        if state.phase != GamePhase::Playing {
            self.reset();
            return 0;
        }

        let due = self.advance(wall_dt);
        let dt = self.step as f32;
        let mut ran = 0;
        for _ in 0..due {
            if state.phase != GamePhase::Playing {
                self.reset();
                break;
            }
            tick(state, input, dt);
            ran += 1;
        }
        if state.phase != GamePhase::Playing {
            self.reset();
        }
        ran
    }
}
