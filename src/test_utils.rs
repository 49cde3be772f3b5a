//! Test utilities for building sessions wired to recording sinks.

#[cfg(test)]
pub mod builders {
    use crate::command::{Command, CommandCatalog, default_commands};
    use crate::config::RhythmConfig;
    use crate::session::RhythmSession;
    use crate::state::GameState;
    use crate::traits::{RecordingAudio, RecordingMovement, RecordingPresentation};

    pub type TestSession = RhythmSession<RecordingPresentation, RecordingAudio, RecordingMovement>;

    /// One beat at the default 120 BPM.
    pub const BEAT_US: i64 = 500_000;

    /// Builder for a seeded session with recording sinks.
    #[derive(Debug, Clone)]
    pub struct SessionBuilder {
        config: RhythmConfig,
        commands: Vec<Command>,
        area_length: f64,
    }

    impl SessionBuilder {
        pub fn new() -> Self {
            Self {
                config: RhythmConfig {
                    seed: Some(1),
                    ..Default::default()
                },
                commands: default_commands(),
                area_length: 10.0,
            }
        }

        pub fn config(mut self, config: RhythmConfig) -> Self {
            self.config = config;
            self
        }

        pub fn start_state(mut self, state: GameState) -> Self {
            self.config.start_state = state;
            self
        }

        pub fn seed(mut self, seed: u64) -> Self {
            self.config.seed = Some(seed);
            self
        }

        pub fn commands(mut self, commands: Vec<Command>) -> Self {
            self.commands = commands;
            self
        }

        pub fn area_length(mut self, area_length: f64) -> Self {
            self.area_length = area_length;
            self
        }

        pub fn build(self) -> TestSession {
            let catalog = CommandCatalog::new(self.commands, self.config.button_count).unwrap();
            RhythmSession::new(
                self.config,
                catalog,
                RecordingPresentation::new(),
                RecordingAudio::new(),
                RecordingMovement::new(self.area_length),
            )
            .unwrap()
        }
    }

    impl Default for SessionBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
