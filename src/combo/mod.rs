mod combo_engine;
mod drift;
mod stats;

pub use combo_engine::{ComboBreak, ComboEngine, ComboRules, HitOutcome};
pub use drift::{DriftStep, DriftTracker};
pub use stats::PlayStats;
