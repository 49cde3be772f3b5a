use serde::{Deserialize, Serialize};

use super::game_state::GameState;
use crate::command::Command;
use crate::traits::input::ButtonId;

/// Pattern to teach again after the player fails one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimonRetry {
    /// Draw a new pattern from the catalog.
    #[default]
    FreshPattern,
    /// Teach the failed pattern again.
    SamePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimonPhase {
    Teach,
    Play,
}

/// A key demonstrated on a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub button: ButtonId,
    /// The last key was shown and the machine switched to play.
    pub entered_play: bool,
}

/// Result of checking a press against the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimonPress {
    Correct,
    /// The last key of the pattern was played correctly.
    Completed,
    Wrong { expected: ButtonId },
}

/// Demonstrate-then-repeat cycle for one pattern at a time.
///
/// Teach reveals one key per free beat. Play expects the same keys back, one
/// per accepted press. Failing is never terminal: the caller restarts the
/// machine with the next pattern and teaching begins again.
#[derive(Debug, Clone)]
pub struct SimonMachine {
    phase: SimonPhase,
    pattern: Command,
    revealed: usize,
    played: usize,
}

impl SimonMachine {
    pub fn new(pattern: Command) -> Self {
        Self {
            phase: SimonPhase::Teach,
            pattern,
            revealed: 0,
            played: 0,
        }
    }

    pub fn state(&self) -> GameState {
        match self.phase {
            SimonPhase::Teach => GameState::SimonTeach,
            SimonPhase::Play => GameState::SimonPlay,
        }
    }

    pub fn pattern(&self) -> &Command {
        &self.pattern
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.keys.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Keys played back correctly so far in this play phase.
    pub fn played(&self) -> usize {
        self.played
    }

    /// The key the player must press next, while playing.
    pub fn expected(&self) -> Option<ButtonId> {
        match self.phase {
            SimonPhase::Play => self.pattern.keys.get(self.played).copied(),
            SimonPhase::Teach => None,
        }
    }

    /// Teach `pattern` from the start.
    pub fn restart(&mut self, pattern: Command) {
        self.pattern = pattern;
        self.phase = SimonPhase::Teach;
        self.revealed = 0;
        self.played = 0;
    }

    /// Teach the current pattern again.
    pub fn reteach(&mut self) {
        self.phase = SimonPhase::Teach;
        self.revealed = 0;
        self.played = 0;
    }

    /// Pattern advance for a fired beat. Only reveals while teaching, and
    /// only if the beat about to start has not been claimed.
    pub fn on_beat(&mut self, upcoming_free: bool) -> Option<Reveal> {
        if self.phase != SimonPhase::Teach || !upcoming_free {
            return None;
        }
        let button = *self.pattern.keys.get(self.revealed)?;
        self.revealed += 1;
        let entered_play = self.revealed >= self.pattern_len();
        if entered_play {
            self.phase = SimonPhase::Play;
            self.revealed = 0;
            self.played = 0;
        }
        Some(Reveal {
            button,
            entered_play,
        })
    }

    /// Check a timed press against the pattern. Ignored outside play.
    pub fn on_press(&mut self, button: ButtonId) -> Option<SimonPress> {
        let expected = self.expected()?;
        if button != expected {
            return Some(SimonPress::Wrong { expected });
        }
        self.played += 1;
        if self.played >= self.pattern_len() {
            Some(SimonPress::Completed)
        } else {
            Some(SimonPress::Correct)
        }
    }

    /// Dropped-note rule: a started playback with nothing on the ending beat.
    pub fn dropped_beat(&self, ending_beat_used: bool) -> bool {
        self.phase == SimonPhase::Play && self.played > 0 && !ending_beat_used
    }
}
