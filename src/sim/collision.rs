//! Collision detection between the body and the pipe stream
//!
//! The body is an axis-aligned tile. Its four corners are tested against each
//! pipe's solid bands: the top corners against the upper band, the bottom
//! corners against the lower band. Each band edge carries a collision margin
//! (one tile by default), so the safe rows are exactly the open rows of the
//! gap. Touching a band edge is safe.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacles::Obstacle;
use crate::tuning::Tuning;

/// Body corner, in test order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// First pipe/corner pair found overlapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the pipe in the stream slice
    pub slot: usize,
    /// Creation index of the pipe
    pub index: u32,
    pub corner: Corner,
    pub point: Vec2,
}

/// Find the first overlapping pipe/corner pair, in stream order then
/// top-left, top-right, bottom-left, bottom-right.
pub fn first_hit(body: &Body, obstacles: &[Obstacle], tuning: &Tuning) -> Option<Hit> {
    let corners = body.corners(tuning.tile_size);

    for (slot, obstacle) in obstacles.iter().enumerate() {
        let left = obstacle.x;
        let right = obstacle.right(tuning);
        let upper_bottom = obstacle.upper_band_bottom(tuning);
        let lower_top = obstacle.lower_band_top(tuning);

        for (corner, point) in Corner::ALL.into_iter().zip(corners) {
            if point.x < left || point.x > right {
                continue;
            }
            let solid = if corner.is_top() {
                point.y < upper_bottom
            } else {
                point.y > lower_top
            };
            if solid {
                return Some(Hit {
                    slot,
                    index: obstacle.index,
                    corner,
                    point,
                });
            }
        }
    }
    None
}

/// True if the body overlaps any pipe band
pub fn check(body: &Body, obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    first_hit(body, obstacles, tuning).is_some()
}

/// True if the body has left the vertical play area
pub fn out_of_field(body: &Body, tuning: &Tuning) -> bool {
    body.pos.y < 0.0 || body.pos.y > tuning.max_body_y()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(x: f32, gap_top: u32) -> Obstacle {
        Obstacle {
            index: 0,
            gap_top,
            x,
            scored: false,
        }
    }

    fn body_at(y: f32) -> Body {
        let t = Tuning::default();
        let mut body = Body::new(&t);
        body.pos.y = y;
        body
    }

    #[test]
    fn test_top_band_margin() {
        let t = Tuning::default();
        let pipes = [pipe(t.body_x, 10)];

        // Row gap_top + 1 is the highest safe row for the top corners
        assert!(!check(&body_at(11.0 * 20.0), &pipes, &t));
        let hit = first_hit(&body_at(11.0 * 20.0 - 1.0), &pipes, &t).unwrap();
        assert_eq!(hit.corner, Corner::TopLeft);
        assert!(check(&body_at(10.0 * 20.0), &pipes, &t));
    }

    #[test]
    fn test_bottom_band_margin() {
        let t = Tuning::default();
        let pipes = [pipe(t.body_x, 10)];

        // Bottom corners may reach row gap_top + 9 but not cross it
        assert!(!check(&body_at(18.0 * 20.0), &pipes, &t));
        let hit = first_hit(&body_at(18.0 * 20.0 + 1.0), &pipes, &t).unwrap();
        assert_eq!(hit.corner, Corner::BottomLeft);
    }

    #[test]
    fn test_whole_gap_is_safe() {
        let t = Tuning::default();
        for gap_top in t.min_gap_top..=t.max_gap_top {
            let pipes = [pipe(t.body_x - 10.0, gap_top)];
            let first = (gap_top + 1) as f32 * 20.0;
            let last = (gap_top + 8) as f32 * 20.0;
            let mut y = first;
            while y <= last {
                assert!(!check(&body_at(y), &pipes, &t), "gap {} y {}", gap_top, y);
                y += 5.0;
            }
        }
    }

    #[test]
    fn test_horizontal_span_is_inclusive() {
        let t = Tuning::default();
        let body = body_at(0.0);

        // Right edge of the body touching the pipe's left edge
        let hit = first_hit(&body, &[pipe(t.body_x + 20.0, 10)], &t).unwrap();
        assert_eq!(hit.corner, Corner::TopRight);

        // Left edge of the body touching the pipe's right edge
        let hit = first_hit(&body, &[pipe(t.body_x - 60.0, 10)], &t).unwrap();
        assert_eq!(hit.corner, Corner::TopLeft);

        // Clear on either side
        assert!(!check(&body, &[pipe(t.body_x + 20.5, 10)], &t));
        assert!(!check(&body, &[pipe(t.body_x - 60.5, 10)], &t));
    }

    #[test]
    fn test_first_pipe_in_order_wins() {
        let t = Tuning::default();
        let body = body_at(0.0);
        let mut a = pipe(t.body_x, 10);
        a.index = 4;
        let mut b = pipe(t.body_x, 12);
        b.index = 5;

        let hit = first_hit(&body, &[a.clone(), b.clone()], &t).unwrap();
        assert_eq!((hit.slot, hit.index), (0, 4));
        let hit = first_hit(&body, &[b, a], &t).unwrap();
        assert_eq!((hit.slot, hit.index), (0, 5));
    }

    #[test]
    fn test_deterministic() {
        let t = Tuning::default();
        let pipes = [pipe(230.0, 9), pipe(630.0, 14)];
        for y in [0.0, 150.0, 199.0, 200.0, 340.0, 341.0, 600.0] {
            let body = body_at(y);
            let first = first_hit(&body, &pipes, &t);
            for _ in 0..10 {
                assert_eq!(first_hit(&body, &pipes, &t), first);
            }
        }
    }

    #[test]
    fn test_out_of_field() {
        let t = Tuning::default();
        assert!(!out_of_field(&body_at(0.0), &t));
        assert!(!out_of_field(&body_at(620.0), &t));
        assert!(out_of_field(&body_at(-0.5), &t));
        assert!(out_of_field(&body_at(620.5), &t));
    }

    #[test]
    fn test_no_pipes_no_hit() {
        let t = Tuning::default();
        assert!(!check(&body_at(5.0), &[], &t));
    }
}
