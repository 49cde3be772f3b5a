mod rhythm_config;
mod session_config;

pub use rhythm_config::{MAX_BUTTONS, RhythmConfig};
pub use session_config::SessionConfig;
