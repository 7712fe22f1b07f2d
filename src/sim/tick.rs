//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! body integration, pipe scrolling, collision, then scoring.

use super::state::{GameEvent, GamePhase, GameState, LossCause};
use super::{autopilot, collision, score};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump level (held or not), sampled once per tick
    pub jump_held: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Input is ignored and nothing moves outside of Playing
    if state.phase != GamePhase::Playing {
        return;
    }
    let tuning = state.tuning;
    let Some(session) = state.session.as_mut() else {
        return;
    };

    let jump_held = if input.idle_mode {
        autopilot::jump_held(session, &tuning)
    } else {
        input.jump_held
    };

    session.ticks += 1;

    let jumped = session.body.integrate(jump_held, dt, &tuning);

    session.obstacles.advance(dt, session.body.vel.x, &tuning);

    let cause = collision::first_hit(&session.body, session.obstacles.as_slice(), &tuning)
        .map(|hit| LossCause::Obstacle { index: hit.index })
        .or_else(|| {
            collision::out_of_field(&session.body, &tuning).then_some(LossCause::OutOfField)
        });

    let awarded = if cause.is_none() {
        score::award(&session.body, session.obstacles.as_mut_slice(), &tuning)
    } else {
        0
    };
    session.score += awarded;
    let total = session.score;

    if jumped {
        state.push_event(GameEvent::Jumped);
    }
    if awarded > 0 {
        log::debug!("Scored: {}", total);
        state.push_event(GameEvent::Scored { score: total });
    }
    if let Some(cause) = cause {
        state.lose(cause);
    }
}
