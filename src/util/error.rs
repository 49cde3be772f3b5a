use thiserror::Error;

/// Invalid session configuration. Raised while building a session, never during play.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("BPM must be a positive finite number, got {0}")]
    InvalidBpm(f64),

    #[error("Timing margin `{name}` must be a finite non-negative fraction of a beat, got {value}")]
    InvalidMargin { name: &'static str, value: f64 },

    #[error("Timing margins sum to {sum}, more than one full beat")]
    MarginsExceedBeat { sum: f64 },

    #[error("Button count must be between 1 and {max}, got {count}")]
    InvalidButtonCount { count: u8, max: u8 },

    #[error("Command catalog is empty")]
    EmptyCatalog,

    #[error("Command `{name}` has no keys")]
    EmptyCommandKeys { name: String },

    #[error("Command `{name}` uses button {button}, valid buttons are 1..={max}")]
    ButtonOutOfRange { name: String, button: u8, max: u8 },

    #[error("`{name}` must be at least 1, got {value}")]
    InvalidThreshold { name: &'static str, value: u32 },

    #[error("Distance `{name}` must be finite and non-negative, got {value}")]
    InvalidDistance { name: &'static str, value: f64 },
}
