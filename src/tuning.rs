//! Game balance and field geometry
//!
//! Defaults reproduce the classic feel. Hosts may override any subset of the
//! values from JSON; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tiles_to_px;

/// Upper bound on pipes kept alive at once
pub const MAX_LIVE_OBSTACLES: usize = 64;
/// Upper bound on the simulation rate
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// Tuning errors
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Every tunable constant of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Size of one tile in game pixels
    pub tile_size: f32,
    pub map_width_tiles: u32,
    pub map_height_tiles: u32,

    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// One-tick upward impulse applied on a jump press (px/s²)
    pub jump_impulse: f32,
    pub min_horizontal_speed: f32,
    pub max_horizontal_speed: f32,
    pub max_vertical_speed: f32,
    /// Added to horizontal speed every tick, not scaled by dt
    pub horizontal_accel: f32,

    /// Fixed screen position of the body
    pub body_x: f32,
    pub body_start_y: f32,

    pub obstacle_width_tiles: u32,
    pub gap_tiles: u32,
    /// Extra solid rows folded into each band edge for collision
    pub collision_margin_tiles: u32,
    pub obstacle_spacing_tiles: u32,
    /// Column of the first obstacle in a fresh stream
    pub first_obstacle_tile: u32,
    pub min_gap_top: u32,
    pub max_gap_top: u32,
    pub live_obstacles: usize,
    /// Obstacle widths past the left edge before culling
    pub cull_widths: u32,

    pub ticks_per_second: u32,
    /// Clamp for a single wall-clock delta (seconds)
    pub max_frame_seconds: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE,
            map_width_tiles: MAP_WIDTH_TILES,
            map_height_tiles: MAP_HEIGHT_TILES,

            gravity: GRAVITY,
            jump_impulse: JUMP,
            min_horizontal_speed: MIN_DX,
            max_horizontal_speed: MAX_DX,
            max_vertical_speed: MAX_DY,
            horizontal_accel: ACCEL,

            body_x: BODY_X,
            body_start_y: BODY_START_Y,

            obstacle_width_tiles: PIPE_WIDTH_TILES,
            gap_tiles: PIPE_GAP_TILES,
            collision_margin_tiles: PIPE_MARGIN_TILES,
            obstacle_spacing_tiles: PIPE_SPACING_TILES,
            first_obstacle_tile: FIRST_PIPE_TILE,
            min_gap_top: MIN_GAP_TOP,
            max_gap_top: MAX_GAP_TOP,
            live_obstacles: LIVE_PIPES,
            cull_widths: CULL_WIDTHS,

            ticks_per_second: TICKS_PER_SECOND,
            max_frame_seconds: MAX_FRAME_SECONDS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject combinations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if !(self.tile_size > 0.0) {
            return invalid("tile_size must be positive");
        }
        if self.map_width_tiles == 0 || self.map_height_tiles == 0 {
            return invalid("field dimensions must be non-zero");
        }
        if !(self.min_horizontal_speed >= 0.0)
            || self.min_horizontal_speed > self.max_horizontal_speed
        {
            return invalid("horizontal speed bounds are inverted");
        }
        if !(self.max_vertical_speed > 0.0) {
            return invalid("max_vertical_speed must be positive");
        }
        if !(self.horizontal_accel >= 0.0) {
            return invalid("horizontal_accel must not be negative");
        }
        if self.min_gap_top > self.max_gap_top {
            return invalid("min_gap_top exceeds max_gap_top");
        }
        let lowest_band_top = self
            .max_gap_top
            .checked_add(self.gap_tiles)
            .and_then(|rows| rows.checked_add(self.collision_margin_tiles));
        if lowest_band_top.is_none_or(|rows| rows > self.map_height_tiles) {
            return Err(TuningError::Invalid(format!(
                "gap at row {} does not fit a {}-row field",
                self.max_gap_top, self.map_height_tiles
            )));
        }
        if self.obstacle_width_tiles == 0 || self.obstacle_spacing_tiles == 0 {
            return invalid("obstacle width and spacing must be non-zero");
        }
        if self.live_obstacles == 0 || self.live_obstacles > MAX_LIVE_OBSTACLES {
            return Err(TuningError::Invalid(format!(
                "live_obstacles must be between 1 and {}",
                MAX_LIVE_OBSTACLES
            )));
        }
        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(TuningError::Invalid(format!(
                "ticks_per_second must be between 1 and {}",
                MAX_TICKS_PER_SECOND
            )));
        }
        if !(self.max_frame_seconds > 0.0) {
            return invalid("max_frame_seconds must be positive");
        }
        Ok(())
    }

    /// Fixed simulation step in seconds
    pub fn step(&self) -> f64 {
        1.0 / self.ticks_per_second as f64
    }

    pub fn field_height(&self) -> f32 {
        tiles_to_px(self.map_height_tiles, self.tile_size)
    }

    pub fn field_width(&self) -> f32 {
        tiles_to_px(self.map_width_tiles, self.tile_size)
    }

    /// Largest body y still inside the field
    pub fn max_body_y(&self) -> f32 {
        tiles_to_px(self.map_height_tiles.saturating_sub(1), self.tile_size)
    }

    pub fn obstacle_width(&self) -> f32 {
        tiles_to_px(self.obstacle_width_tiles, self.tile_size)
    }

    pub fn obstacle_spacing(&self) -> f32 {
        tiles_to_px(self.obstacle_spacing_tiles, self.tile_size)
    }

    pub fn first_obstacle_x(&self) -> f32 {
        tiles_to_px(self.first_obstacle_tile, self.tile_size)
    }

    /// Obstacles left of this x are culled
    pub fn cull_x(&self) -> f32 {
        -(self.cull_widths as f32 * self.obstacle_width())
    }
}
