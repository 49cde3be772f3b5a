#![allow(dead_code)]

use beatmarch::command::{Command, CommandCatalog, default_commands};
use beatmarch::config::RhythmConfig;
use beatmarch::session::{PressOutcome, RhythmSession, SessionEvent};
use beatmarch::traits::{NoInput, RecordingAudio, RecordingMovement, RecordingPresentation};

pub type TestSession = RhythmSession<RecordingPresentation, RecordingAudio, RecordingMovement>;

pub const BEAT_US: i64 = 500_000;
pub const FRAME_US: i64 = 10_000;

pub fn seeded() -> RhythmConfig {
    RhythmConfig {
        seed: Some(7),
        ..Default::default()
    }
}

pub fn session_with(config: RhythmConfig, commands: Vec<Command>) -> TestSession {
    let catalog = CommandCatalog::new(commands, config.button_count).unwrap();
    RhythmSession::new(
        config,
        catalog,
        RecordingPresentation::new(),
        RecordingAudio::new(),
        RecordingMovement::new(100.0),
    )
    .unwrap()
}

/// Drives a session frame by frame and keeps every event it reports.
pub struct Harness {
    pub session: TestSession,
    pub events: Vec<SessionEvent>,
}

impl Harness {
    pub fn new(config: RhythmConfig) -> Self {
        Self::with_commands(config, default_commands())
    }

    pub fn with_commands(config: RhythmConfig, commands: Vec<Command>) -> Self {
        Self {
            session: session_with(config, commands),
            events: Vec::new(),
        }
    }

    pub fn advance(&mut self, us: i64) {
        let mut left = us;
        while left > 0 {
            let step = left.min(FRAME_US);
            self.events.extend(self.session.tick(step, &mut NoInput));
            left -= step;
        }
    }

    /// Advance to the next beat. The clock then sits exactly on it.
    pub fn beat(&mut self) {
        self.advance(BEAT_US);
    }

    pub fn press(&mut self, button: u8) -> PressOutcome {
        let outcome = self
            .session
            .on_button_press(button)
            .expect("press should be accepted");
        self.events.extend(self.session.take_events());
        outcome
    }

    /// Press each key on its own beat.
    pub fn play_on_beats(&mut self, keys: &[u8]) {
        for &key in keys {
            self.beat();
            self.press(key);
        }
    }

    pub fn count(&self, pred: impl Fn(&SessionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
