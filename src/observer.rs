//! Notification sink for game lifecycle events.
//!
//! The board never talks to analytics, leaderboards or persistence directly.
//! It reports the three lifecycle events to whatever [`GameObserver`] it was
//! built with and ignores the outcome.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::difficulty::Difficulty;

/// Receives lifecycle events from a [`Board`](crate::Board).
///
/// Every method defaults to a no-op, so implementors only override the
/// events they care about.
pub trait GameObserver {
    /// Mines were placed; the game is running.
    fn game_started(&mut self, _difficulty: Difficulty) {}

    /// The last safe tile was revealed after `elapsed` of play.
    fn game_won(&mut self, _difficulty: Difficulty, _elapsed: Duration) {}

    /// A mine was revealed.
    fn game_lost(&mut self, _difficulty: Difficulty) {}
}

/// The silent sink.
impl GameObserver for () {}

impl<T: GameObserver + ?Sized> GameObserver for &mut T {
    fn game_started(&mut self, difficulty: Difficulty) {
        (**self).game_started(difficulty)
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        (**self).game_won(difficulty, elapsed)
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        (**self).game_lost(difficulty)
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn game_started(&mut self, difficulty: Difficulty) {
        (**self).game_started(difficulty)
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        (**self).game_won(difficulty, elapsed)
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        (**self).game_lost(difficulty)
    }
}

/// A lifecycle event as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started(Difficulty),
    Won(Difficulty, Duration),
    Lost(Difficulty),
}

impl GameEvent {
    pub fn difficulty(&self) -> Difficulty {
        match *self {
            GameEvent::Started(d) | GameEvent::Won(d, _) | GameEvent::Lost(d) => d,
        }
    }
}

/// Records every event in order, for callers that prefer to drain events
/// after each move instead of reacting inline.
impl GameObserver for Vec<GameEvent> {
    fn game_started(&mut self, difficulty: Difficulty) {
        self.push(GameEvent::Started(difficulty));
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        self.push(GameEvent::Won(difficulty, elapsed));
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        self.push(GameEvent::Lost(difficulty));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_records_in_order() {
        let mut events: Vec<GameEvent> = Vec::new();
        events.game_started(Difficulty::Hard);
        events.game_lost(Difficulty::Hard);
        assert_eq!(
            events,
            vec![
                GameEvent::Started(Difficulty::Hard),
                GameEvent::Lost(Difficulty::Hard)
            ]
        );
    }

    #[test]
    fn test_forwarding_through_mut_ref_and_box() {
        fn start<O: GameObserver>(mut observer: O) {
            observer.game_started(Difficulty::Easy);
        }

        let mut events: Vec<GameEvent> = Vec::new();
        start(&mut events);
        start(Box::new(&mut events));

        assert_eq!(
            events,
            vec![
                GameEvent::Started(Difficulty::Easy),
                GameEvent::Started(Difficulty::Easy)
            ]
        );
    }

    #[test]
    fn test_event_difficulty() {
        let won = GameEvent::Won(Difficulty::Medium, Duration::from_millis(1500));
        assert_eq!(won.difficulty(), Difficulty::Medium);
    }
}
