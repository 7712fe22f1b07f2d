//! Tile Flap - a side-scrolling pipe dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, physics, obstacles, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory leaderboard of finished sessions

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Largest wall-clock delta fed into the clock in one frame (seconds)
    pub const MAX_FRAME_SECONDS: f64 = 1.0;

    /// Field dimensions (tiles)
    pub const MAP_WIDTH_TILES: u32 = 50;
    pub const MAP_HEIGHT_TILES: u32 = 32;
    /// Size of one tile in game pixels
    pub const TILE: f32 = 20.0;
    /// Arbitrary choice for 1m
    pub const METER: f32 = TILE;

    /// Very exaggerated gravity
    pub const GRAVITY: f32 = METER * 9.8 * 4.0;
    /// Upward impulse applied for the single tick of a jump press
    pub const JUMP: f32 = METER * 1500.0;
    /// Horizontal speed bounds
    pub const MIN_DX: f32 = METER * 5.0;
    pub const MAX_DX: f32 = METER * 20.0;
    /// Vertical speed bound (both directions)
    pub const MAX_DY: f32 = METER * 20.0;
    /// Forward thrust added to horizontal speed every tick
    pub const ACCEL: f32 = 0.02;

    /// Body screen position
    pub const BODY_X: f32 = 240.0;
    pub const BODY_START_Y: f32 = 16.0 * TILE;

    /// Obstacle geometry (tiles)
    pub const PIPE_WIDTH_TILES: u32 = 3;
    pub const PIPE_GAP_TILES: u32 = 8;
    pub const PIPE_MARGIN_TILES: u32 = 1;
    pub const PIPE_SPACING_TILES: u32 = 20;
    pub const FIRST_PIPE_TILE: u32 = 30;
    /// Inclusive range for the gap's top row
    pub const MIN_GAP_TOP: u32 = 8;
    pub const MAX_GAP_TOP: u32 = 15;
    /// Obstacles kept alive in the stream
    pub const LIVE_PIPES: usize = 3;
    /// Pipe widths past the left edge before a pipe is culled
    pub const CULL_WIDTHS: u32 = 3;
}

/// Convert a tile count to game pixels
#[inline]
pub fn tiles_to_px(tiles: u32, tile_size: f32) -> f32 {
    tiles as f32 * tile_size
}

/// Convert game pixels to the containing tile row/column
#[inline]
pub fn px_to_tile(px: f32, tile_size: f32) -> i32 {
    (px / tile_size).floor() as i32
}
