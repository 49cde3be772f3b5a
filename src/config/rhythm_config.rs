use serde::{Deserialize, Serialize};

use crate::combo::ComboRules;
use crate::judge::TimingWindows;
use crate::rhythm::{BeatClock, BeatSource};
use crate::state::{GameState, SimonRetry};
use crate::util::error::ConfigError;

/// Largest supported button count.
pub const MAX_BUTTONS: u8 = 8;

/// Tunables for one rhythm session. Every field has a default, so a partial
/// JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmConfig {
    /// Tempo in beats per minute.
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    /// Number of gameplay buttons, numbered from 1.
    #[serde(default = "default_button_count")]
    pub button_count: u8,
    /// Perfect window as a fraction of a beat.
    #[serde(default = "default_perfect_margin")]
    pub perfect_margin: f64,
    #[serde(default = "default_great_margin")]
    pub great_margin: f64,
    #[serde(default = "default_okay_margin")]
    pub okay_margin: f64,
    #[serde(default = "default_one")]
    pub score_per_note: u32,
    /// Consecutive hits per combo.
    #[serde(default = "default_four")]
    pub hits_per_combo: u32,
    /// Combos needed to enter fever mode.
    #[serde(default = "default_four")]
    pub fever_mode_threshold: u32,
    #[serde(default = "default_fever_score_multiplier")]
    pub fever_score_multiplier: u32,
    /// Freeplay idle time before a streak is dropped.
    #[serde(default = "default_combo_timeout_ms")]
    pub combo_timeout_ms: u64,
    /// Beats without forward progress before drifting starts.
    #[serde(default = "default_static_beat_limit")]
    pub static_beat_limit: u32,
    #[serde(default = "default_move_distance")]
    pub move_distance: f64,
    #[serde(default = "default_fever_move_distance")]
    pub fever_move_distance: f64,
    #[serde(default = "default_regress_distance")]
    pub regress_distance: f64,
    #[serde(default = "default_drift_distance")]
    pub drift_distance: f64,
    /// Step back on a freeplay miss.
    #[serde(default)]
    pub miss_regresses_movement: bool,
    #[serde(default)]
    pub simon_retry: SimonRetry,
    /// Mode entered when the session starts. `simon_play` starts as `simon_teach`.
    #[serde(default)]
    pub start_state: GameState,
    #[serde(default)]
    pub beat_source: BeatSource,
    /// Seed for pattern draws. Entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bpm() -> f64 {
    120.0
}

fn default_button_count() -> u8 {
    4
}

fn default_perfect_margin() -> f64 {
    TimingWindows::DEFAULT_PERFECT
}

fn default_great_margin() -> f64 {
    TimingWindows::DEFAULT_GREAT
}

fn default_okay_margin() -> f64 {
    TimingWindows::DEFAULT_OKAY
}

fn default_one() -> u32 {
    1
}

fn default_four() -> u32 {
    4
}

fn default_fever_score_multiplier() -> u32 {
    2
}

fn default_combo_timeout_ms() -> u64 {
    5000
}

fn default_static_beat_limit() -> u32 {
    8
}

fn default_move_distance() -> f64 {
    1.0
}

fn default_fever_move_distance() -> f64 {
    2.0
}

fn default_regress_distance() -> f64 {
    0.5
}

fn default_drift_distance() -> f64 {
    0.1
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            button_count: default_button_count(),
            perfect_margin: default_perfect_margin(),
            great_margin: default_great_margin(),
            okay_margin: default_okay_margin(),
            score_per_note: default_one(),
            hits_per_combo: default_four(),
            fever_mode_threshold: default_four(),
            fever_score_multiplier: default_fever_score_multiplier(),
            combo_timeout_ms: default_combo_timeout_ms(),
            static_beat_limit: default_static_beat_limit(),
            move_distance: default_move_distance(),
            fever_move_distance: default_fever_move_distance(),
            regress_distance: default_regress_distance(),
            drift_distance: default_drift_distance(),
            miss_regresses_movement: false,
            simon_retry: SimonRetry::default(),
            start_state: GameState::default(),
            beat_source: BeatSource::default(),
            seed: None,
        }
    }
}

impl RhythmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        BeatClock::new(self.bpm)?;
        if self.button_count == 0 || self.button_count > MAX_BUTTONS {
            return Err(ConfigError::InvalidButtonCount {
                count: self.button_count,
                max: MAX_BUTTONS,
            });
        }
        self.timing_windows().validate()?;
        for (name, value) in [
            ("hits_per_combo", self.hits_per_combo),
            ("fever_mode_threshold", self.fever_mode_threshold),
            ("fever_score_multiplier", self.fever_score_multiplier),
            ("static_beat_limit", self.static_beat_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        for (name, value) in [
            ("move_distance", self.move_distance),
            ("fever_move_distance", self.fever_move_distance),
            ("regress_distance", self.regress_distance),
            ("drift_distance", self.drift_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { name, value });
            }
        }
        Ok(())
    }

    pub fn timing_windows(&self) -> TimingWindows {
        TimingWindows {
            perfect: self.perfect_margin,
            great: self.great_margin,
            okay: self.okay_margin,
        }
    }

    pub fn combo_rules(&self) -> ComboRules {
        ComboRules {
            score_per_note: u64::from(self.score_per_note),
            hits_per_combo: self.hits_per_combo,
            fever_mode_threshold: self.fever_mode_threshold,
            fever_score_multiplier: u64::from(self.fever_score_multiplier),
            combo_timeout_us: i64::try_from(self.combo_timeout_ms.saturating_mul(1000))
                .unwrap_or(i64::MAX),
        }
    }
}
