//! Game state machine and session data
//!
//! The state machine is the only owner of the live session. Every start
//! builds a fresh session; a loss discards it and keeps only the score.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacles::ObstacleStream;
use super::snapshot::{BodyView, ObstacleView, Snapshot};
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start press, showing the last score
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; left for Idle as soon as it is entered
    Lost,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Hit the pipe with this creation index
    Obstacle { index: u32 },
    /// Left the vertical play area
    OutOfField,
}

/// Notable transitions, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { session: u32 },
    Jumped,
    Scored { score: u32 },
    Lost { score: u32, cause: LossCause },
}

/// Everything owned by one run
#[derive(Debug, Clone)]
pub struct Session {
    /// 1-based session number
    pub number: u32,
    pub body: Body,
    pub obstacles: ObstacleStream,
    pub score: u32,
    /// Ticks simulated in this session
    pub ticks: u64,
}

impl Session {
    pub fn new(number: u32, seed: u64, tuning: &Tuning) -> Self {
        Self {
            number,
            body: Body::new(tuning),
            obstacles: ObstacleStream::new(Pcg32::seed_from_u64(seed), tuning),
            score: 0,
            ticks: 0,
        }
    }
}

/// The game state machine
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Present only while Playing
    pub session: Option<Session>,
    /// Final score of the previous session, shown while Idle
    pub last_score: Option<u32>,
    pub high_scores: HighScores,
    pub sessions_started: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            session: None,
            last_score: None,
            high_scores: HighScores::new(),
            sessions_started: 0,
            events: Vec::new(),
        }
    }

    /// Per-session pipe seed. Varies between sessions, fixed for a given run seed.
    fn session_seed(&self, number: u32) -> u64 {
        (number as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    /// Handle the discrete start press. Only legal while Idle.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }

        self.sessions_started += 1;
        let number = self.sessions_started;
        self.session = Some(Session::new(number, self.session_seed(number), &self.tuning));
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started { session: number });
        log::info!("Session {} started", number);
        true
    }

    /// End the running session, then fall straight back to Idle
    pub(crate) fn lose(&mut self, cause: LossCause) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.phase = GamePhase::Lost;
        let score = session.score;
        self.events.push(GameEvent::Lost { score, cause });
        log::info!(
            "Session {} lost after {} ticks: score {} ({:?})",
            session.number,
            session.ticks,
            score,
            cause
        );
        if let Some(rank) = self.high_scores.add_score(score, session.ticks, session.number) {
            log::info!("New high score #{}: {}", rank, score);
        }

        self.return_to_idle(score);
    }

    fn return_to_idle(&mut self, score: u32) {
        self.last_score = Some(score);
        self.phase = GamePhase::Idle;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live score while Playing, 0 otherwise
    pub fn score(&self) -> u32 {
        self.session.as_ref().map(|s| s.score).unwrap_or(0)
    }

    /// Score to show: live while Playing, last session's while Idle
    pub fn display_score(&self) -> Option<u32> {
        match self.phase {
            GamePhase::Playing => Some(self.score()),
            GamePhase::Idle | GamePhase::Lost => self.last_score,
        }
    }

    pub fn best_score(&self) -> Option<u32> {
        self.high_scores.top_score()
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        let tile_size = self.tuning.tile_size;
        Snapshot {
            phase: self.phase,
            score: self.score(),
            last_score: self.last_score,
            best_score: self.best_score(),
            body: self.session.as_ref().map(|s| BodyView::new(&s.body, tile_size)),
            obstacles: self
                .session
                .iter()
                .flat_map(|s| s.obstacles.iter())
                .map(ObstacleView::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.session.is_none());
        assert_eq!(state.display_score(), None);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.start());
        assert_eq!(state.sessions_started, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Started { session: 1 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_loss_keeps_score_for_idle() {
        let mut state = GameState::new(1, Tuning::default());
        state.start();
        if let Some(session) = state.session.as_mut() {
            session.score = 4;
        }
        state.lose(LossCause::OutOfField);

        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.session.is_none());
        assert_eq!(state.last_score, Some(4));
        assert_eq!(state.display_score(), Some(4));
        assert_eq!(state.best_score(), Some(4));
        assert!(state.drain_events().contains(&GameEvent::Lost {
            score: 4,
            cause: LossCause::OutOfField
        }));
    }

    #[test]
    fn test_restart_builds_fresh_session() {
        let mut state = GameState::new(1, Tuning::default());
        state.start();
        if let Some(session) = state.session.as_mut() {
            session.score = 9;
            session.body.pos.y = 10.0;
            session.ticks = 500;
        }
        state.lose(LossCause::Obstacle { index: 2 });

        assert!(state.start());
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.number, 2);
        assert_eq!(session.score, 0);
        assert_eq!(session.ticks, 0);
        assert_eq!(session.body, Body::new(&state.tuning));
        assert_eq!(state.score(), 0);
        // Previous score stays available until the next loss
        assert_eq!(state.last_score, Some(9));
    }

    #[test]
    fn test_session_seeds_differ() {
        let state = GameState::new(1234, Tuning::default());
        assert_ne!(state.session_seed(1), state.session_seed(2));
        let other = GameState::new(1234, Tuning::default());
        assert_eq!(state.session_seed(3), other.session_seed(3));
    }

    #[test]
    fn test_lose_without_session_is_noop() {
        let mut state = GameState::new(1, Tuning::default());
        state.lose(LossCause::OutOfField);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.last_score, None);
        assert!(state.drain_events().is_empty());
    }
}
