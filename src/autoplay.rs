//! Scripted player that answers beats with the key the session expects.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::session::{RhythmSession, SessionEvent};
use crate::state::GameState;
use crate::traits::{AudioSink, ButtonId, MovementSink, PresentationSink};

/// Picks one press per beat: the next pattern key during Simon playback,
/// the next key of a chosen command in freeplay, nothing while teaching.
#[derive(Debug, Clone)]
pub struct Autoplayer {
    rng: StdRng,
    /// Chance of answering a beat at all.
    accuracy: f64,
    command: Option<Command>,
}

impl Autoplayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            accuracy: 1.0,
            command: None,
        }
    }

    /// Skip a beat with probability `1 - accuracy`.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy.clamp(0.0, 1.0);
        self
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Button to press after a tick, if that tick fired a beat.
    ///
    /// Beats that revealed a key are left alone so the first play press
    /// lands on the beat after the pattern was shown.
    pub fn respond<P, A, M>(
        &mut self,
        session: &RhythmSession<P, A, M>,
        events: &[SessionEvent],
    ) -> Option<ButtonId>
    where
        P: PresentationSink,
        A: AudioSink,
        M: MovementSink,
    {
        let fired = events
            .iter()
            .any(|e| matches!(e, SessionEvent::BeatFired { .. }));
        let revealed = events
            .iter()
            .any(|e| matches!(e, SessionEvent::Revealed { .. }));
        if !fired || revealed {
            return None;
        }
        if self.accuracy < 1.0 && !self.rng.gen_bool(self.accuracy) {
            log::debug!("autoplay skips beat {}", session.beats_fired());
            return None;
        }
        self.pick(session)
    }

    /// The key that correctly continues the session's current sequence.
    pub fn pick<P, A, M>(&mut self, session: &RhythmSession<P, A, M>) -> Option<ButtonId>
    where
        P: PresentationSink,
        A: AudioSink,
        M: MovementSink,
    {
        match session.game_state() {
            GameState::SimonTeach => None,
            GameState::SimonPlay => session.simon().and_then(|m| m.expected()),
            GameState::Freeplay => {
                let typed = session.command_string();
                let continues = self
                    .command
                    .as_ref()
                    .is_some_and(|c| c.len() > typed.len() && c.starts_with(typed));
                if typed.is_empty() || !continues {
                    self.command = if typed.is_empty() {
                        Some(session.catalog().choose(&mut self.rng).clone())
                    } else {
                        session
                            .catalog()
                            .commands()
                            .iter()
                            .find(|c| c.len() > typed.len() && c.starts_with(typed))
                            .cloned()
                    };
                }
                self.command.as_ref().map(|c| c.keys[typed.len()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::builders::{BEAT_US, SessionBuilder};
    use crate::traits::NoInput;

    #[test]
    fn freeplay_picks_follow_a_command() {
        let s = SessionBuilder::new().build();
        let mut player = Autoplayer::new(5);
        let first = player.pick(&s).unwrap();
        assert!(s.catalog().commands().iter().any(|c| c.keys[0] == first));
    }

    #[test]
    fn silent_while_teaching() {
        let s = SessionBuilder::new()
            .start_state(GameState::SimonTeach)
            .build();
        let mut player = Autoplayer::new(5);
        assert_eq!(player.pick(&s), None);
    }

    #[test]
    fn only_answers_beats() {
        let mut s = SessionBuilder::new().build();
        let mut player = Autoplayer::new(5);
        let events = s.tick(BEAT_US / 5, &mut NoInput);
        assert_eq!(player.respond(&s, &events), None);
        let events = s.tick(BEAT_US, &mut NoInput);
        assert!(player.respond(&s, &events).is_some());
    }

    #[test]
    fn zero_accuracy_never_presses() {
        let mut s = SessionBuilder::new().build();
        let mut player = Autoplayer::new(5).with_accuracy(0.0);
        for _ in 0..8 {
            let events = s.tick(BEAT_US, &mut NoInput);
            assert_eq!(player.respond(&s, &events), None);
        }
    }

    #[test]
    fn freeplay_autoplay_performs_commands() {
        let mut s = SessionBuilder::new().area_length(1000.0).build();
        let mut player = Autoplayer::new(5);
        for _ in 0..16 {
            let events = s.tick(BEAT_US, &mut NoInput);
            if let Some(button) = player.respond(&s, &events) {
                s.on_button_press(button);
            }
        }
        assert_eq!(s.stats().commands_performed, 4);
        assert_eq!(s.stats().misses, 0);
        assert_eq!(s.combo().combo_count(), 4);
    }
}
