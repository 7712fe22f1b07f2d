//! Idle/demo mode controller
//!
//! Produces a jump level from the session alone. It presses while falling
//! below the aim line of the next pipe's gap and lets go while rising, so a
//! press is always released before the next one is needed.

use super::state::Session;
use crate::tiles_to_px;
use crate::tuning::Tuning;

/// Aim line above the gap floor (tiles); a full jump rises about five
const AIM_ABOVE_FLOOR_TILES: u32 = 2;

/// y the autopilot tries to stay above while lined up with `gap_top`
pub fn aim_y(gap_top: u32, tuning: &Tuning) -> f32 {
    let floor = gap_top + tuning.gap_tiles + tuning.collision_margin_tiles;
    tiles_to_px(floor.saturating_sub(AIM_ABOVE_FLOOR_TILES), tuning.tile_size)
}

/// Jump level for this tick
pub fn jump_held(session: &Session, tuning: &Tuning) -> bool {
    let body = &session.body;
    let Some(next) = session
        .obstacles
        .iter()
        .find(|o| o.right(tuning) >= body.pos.x)
    else {
        return false;
    };

    body.vel.y > 0.0 && body.pos.y > aim_y(next.gap_top, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::{Obstacle, ObstacleStream};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session_with_pipe(gap_top: u32) -> Session {
        let t = Tuning::default();
        let mut session = Session::new(1, 0, &t);
        let pipe = Obstacle {
            index: 0,
            gap_top,
            x: 400.0,
            scored: false,
        };
        session.obstacles = ObstacleStream::from_obstacles(vec![pipe], Pcg32::seed_from_u64(0), &t);
        session
    }

    #[test]
    fn test_aim_line() {
        let t = Tuning::default();
        // Floor of a gap at row 10 is row 19; aim two rows above
        assert_eq!(aim_y(10, &t), 17.0 * 20.0);
    }

    #[test]
    fn test_presses_only_when_falling_below_aim() {
        let t = Tuning::default();
        let mut session = session_with_pipe(10);

        session.body.pos.y = 345.0;
        session.body.vel.y = 50.0;
        assert!(jump_held(&session, &t));

        // Rising: release
        session.body.vel.y = -50.0;
        assert!(!jump_held(&session, &t));

        // Above the aim line: let gravity work
        session.body.pos.y = 300.0;
        session.body.vel.y = 50.0;
        assert!(!jump_held(&session, &t));
    }

    #[test]
    fn test_targets_first_unpassed_pipe() {
        let t = Tuning::default();
        let mut session = session_with_pipe(8);
        session.body.pos.y = 300.0;
        session.body.vel.y = 10.0;
        // Aim for gap at row 8 is row 15 (300px): not below it yet
        assert!(!jump_held(&session, &t));

        session.obstacles.as_mut_slice()[0].x = 100.0;
        // First pipe is behind the body now; the next one decides
        let next_gap = session.obstacles.as_slice()[1].gap_top;
        assert_eq!(jump_held(&session, &t), 300.0 > aim_y(next_gap, &t));
    }
}
