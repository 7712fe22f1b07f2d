//! Procedurally generated pipe stream
//!
//! Pipes scroll left at the body's horizontal speed. Pipes far enough past
//! the left edge are culled and the stream is topped up at the tail, so it
//! stays sorted by x without ever mutating the sequence mid-iteration.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tiles_to_px;
use crate::tuning::Tuning;

/// A pipe: two solid bands around a fixed-height gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Creation order within the stream
    pub index: u32,
    /// Tile row where the gap begins
    pub gap_top: u32,
    /// Left edge
    pub x: f32,
    pub scored: bool,
}

impl Obstacle {
    /// Lower edge of the upper band, margin included
    pub fn upper_band_bottom(&self, tuning: &Tuning) -> f32 {
        tiles_to_px(self.gap_top + tuning.collision_margin_tiles, tuning.tile_size)
    }

    /// Upper edge of the lower band, margin included
    pub fn lower_band_top(&self, tuning: &Tuning) -> f32 {
        tiles_to_px(
            self.gap_top + tuning.gap_tiles + tuning.collision_margin_tiles,
            tuning.tile_size,
        )
    }

    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width()
    }
}

/// Ordered, self-refilling sequence of pipes
#[derive(Debug, Clone)]
pub struct ObstacleStream<R = Pcg32> {
    obstacles: Vec<Obstacle>,
    rng: R,
    next_index: u32,
}

impl<R: Rng> ObstacleStream<R> {
    /// Fresh stream seeded with `live_obstacles` pipes starting at the first column
    pub fn new(rng: R, tuning: &Tuning) -> Self {
        Self::from_obstacles(Vec::new(), rng, tuning)
    }

    /// Start from explicit pipes (sorted by x), topping up if short
    pub fn from_obstacles(mut obstacles: Vec<Obstacle>, rng: R, tuning: &Tuning) -> Self {
        obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));
        let next_index = obstacles.iter().map(|o| o.index + 1).max().unwrap_or(0);
        let mut stream = Self {
            obstacles,
            rng,
            next_index,
        };
        stream.refill(tuning);
        stream
    }

    /// Scroll left, cull off-screen pipes, then top up at the tail
    pub fn advance(&mut self, dt: f32, speed: f32, tuning: &Tuning) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= dt * speed;
        }

        let cull_x = tuning.cull_x();
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.x >= cull_x);
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::trace!("Culled {} pipe(s)", culled);
        }

        self.refill(tuning);
    }

    fn refill(&mut self, tuning: &Tuning) {
        while self.obstacles.len() < tuning.live_obstacles {
            let x = match self.obstacles.last() {
                Some(last) => last.x + tuning.obstacle_spacing(),
                None => tuning.first_obstacle_x(),
            };
            let gap_top = self.rng.random_range(tuning.min_gap_top..=tuning.max_gap_top);
            self.obstacles.push(Obstacle {
                index: self.next_index,
                gap_top,
                x,
                scored: false,
            });
            self.next_index += 1;
        }
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
