//! The player body and its per-tick integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The controllable body.
///
/// `pos.x` is the fixed screen column and is never integrated; the world
/// scrolls under it at `vel.x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// x: scroll speed, y: vertical speed (positive = down)
    pub vel: Vec2,
    /// Jump level sampled on the last tick
    pub jump_held: bool,
    /// Set by a press, cleared by the matching release
    pub mid_jump: bool,
}

impl Body {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.body_x, tuning.body_start_y),
            vel: Vec2::new(tuning.min_horizontal_speed, 0.0),
            jump_held: false,
            mid_jump: false,
        }
    }

    /// Bounding box corners: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self, tile_size: f32) -> [Vec2; 4] {
        let Vec2 { x, y } = self.pos;
        [
            Vec2::new(x, y),
            Vec2::new(x + tile_size, y),
            Vec2::new(x, y + tile_size),
            Vec2::new(x + tile_size, y + tile_size),
        ]
    }

    /// Advance one fixed step. Returns true if a jump impulse was applied.
    pub fn integrate(&mut self, jump_held: bool, dt: f32, tuning: &Tuning) -> bool {
        let ddx = tuning.horizontal_accel;
        let mut ddy = tuning.gravity;
        let mut jumped = false;

        self.jump_held = jump_held;
        if jump_held && !self.mid_jump {
            ddy = (ddy - tuning.jump_impulse).min(tuning.jump_impulse);
            self.mid_jump = true;
            jumped = true;
        } else if !jump_held && self.mid_jump {
            self.mid_jump = false;
        }

        // Position uses last tick's velocity
        self.pos.y += dt * self.vel.y;

        self.vel.x = (self.vel.x + ddx)
            .clamp(tuning.min_horizontal_speed, tuning.max_horizontal_speed);
        self.vel.y = (self.vel.y + dt * ddy)
            .clamp(-tuning.max_vertical_speed, tuning.max_vertical_speed);

        jumped
    }
}
