//! Points for pipes the body has cleared

use super::body::Body;
use super::obstacles::Obstacle;
use crate::tuning::Tuning;

/// Mark every pipe now fully behind the body as scored.
/// Returns the number of newly scored pipes; a pipe scores at most once.
pub fn award(body: &Body, obstacles: &mut [Obstacle], tuning: &Tuning) -> u32 {
    let threshold = body.pos.x - tuning.obstacle_width();
    let mut awarded = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.scored) {
        if obstacle.x < threshold {
            obstacle.scored = true;
            awarded += 1;
        }
    }
    awarded
}
