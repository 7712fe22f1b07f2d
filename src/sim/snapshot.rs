//! Read-only render view of the game state

use serde::Serialize;

use super::body::Body;
use super::obstacles::Obstacle;
use super::state::GamePhase;
use crate::px_to_tile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Tile row containing the body's top edge
    pub row: i32,
}

impl BodyView {
    pub fn new(body: &Body, tile_size: f32) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            vx: body.vel.x,
            vy: body.vel.y,
            row: px_to_tile(body.pos.y, tile_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: u32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            x: obstacle.x,
            gap_top: obstacle.gap_top,
        }
    }
}

/// Everything a renderer needs after a tick batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub last_score: Option<u32>,
    pub best_score: Option<u32>,
    /// None while Idle
    pub body: Option<BodyView>,
    /// Pipes in stream order
    pub obstacles: Vec<ObstacleView>,
}
