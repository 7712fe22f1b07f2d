//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes sorted by x)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::Body;
pub use clock::Clock;
pub use collision::{Corner, Hit, check, first_hit, out_of_field};
pub use obstacles::{Obstacle, ObstacleStream};
pub use snapshot::{BodyView, ObstacleView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, LossCause, Session};
pub use tick::{TickInput, tick};
