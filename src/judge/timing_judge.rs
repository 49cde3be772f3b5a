use serde::{Deserialize, Serialize};

use crate::rhythm::{BeatSlot, BeatSlots};
use crate::util::error::ConfigError;

/// Timing accuracy of a press. Ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Perfect,
    Great,
    Okay,
    Miss,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Perfect, Tier::Great, Tier::Okay, Tier::Miss];

    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Great => "Great",
            Self::Okay => "Okay",
            Self::Miss => "Miss",
        }
    }

    pub fn is_hit(self) -> bool {
        self != Self::Miss
    }
}

/// Result of judging one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgment {
    pub tier: Tier,
    /// Slot the press consumes. `None` only when both slots were already taken.
    pub slot: Option<BeatSlot>,
}

/// Tier margins as fractions of one beat interval. Each margin is split
/// evenly around a beat boundary, so a Perfect press lands within
/// `perfect / 2` of a beat on either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingWindows {
    pub perfect: f64,
    pub great: f64,
    pub okay: f64,
}

impl TimingWindows {
    pub const DEFAULT_PERFECT: f64 = 0.1;
    pub const DEFAULT_GREAT: f64 = 0.15;
    pub const DEFAULT_OKAY: f64 = 0.2;

    pub fn new(perfect: f64, great: f64, okay: f64) -> Result<Self, ConfigError> {
        let windows = Self {
            perfect,
            great,
            okay,
        };
        windows.validate()?;
        Ok(windows)
    }

    pub fn builder() -> TimingWindowsBuilder {
        TimingWindowsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("perfect_margin", self.perfect),
            ("great_margin", self.great),
            ("okay_margin", self.okay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMargin { name, value });
            }
        }
        let sum = self.perfect + self.great + self.okay;
        if sum > 1.0 {
            return Err(ConfigError::MarginsExceedBeat { sum });
        }
        Ok(())
    }

    /// Distance from a boundary (in beats) at or under which each tier applies.
    pub fn thresholds(&self) -> [f64; 3] {
        [
            self.perfect / 2.0,
            (self.perfect + self.great) / 2.0,
            (self.perfect + self.great + self.okay) / 2.0,
        ]
    }
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            perfect: Self::DEFAULT_PERFECT,
            great: Self::DEFAULT_GREAT,
            okay: Self::DEFAULT_OKAY,
        }
    }
}

#[derive(Debug, Default)]
pub struct TimingWindowsBuilder {
    perfect: Option<f64>,
    great: Option<f64>,
    okay: Option<f64>,
}

impl TimingWindowsBuilder {
    pub fn perfect(mut self, margin: f64) -> Self {
        self.perfect = Some(margin);
        self
    }

    pub fn great(mut self, margin: f64) -> Self {
        self.great = Some(margin);
        self
    }

    pub fn okay(mut self, margin: f64) -> Self {
        self.okay = Some(margin);
        self
    }

    pub fn build(self) -> Result<TimingWindows, ConfigError> {
        let default = TimingWindows::default();
        TimingWindows::new(
            self.perfect.unwrap_or(default.perfect),
            self.great.unwrap_or(default.great),
            self.okay.unwrap_or(default.okay),
        )
    }
}

/// Classifies a press by its beat progress against two boundaries: the beat
/// that just fired (`progress` away) and the one about to fire
/// (`1 - progress` away).
#[derive(Debug, Clone)]
pub struct TimingJudge {
    windows: TimingWindows,
    thresholds: [f64; 3],
}

impl TimingJudge {
    pub fn new(windows: TimingWindows) -> Result<Self, ConfigError> {
        windows.validate()?;
        Ok(Self {
            windows,
            thresholds: windows.thresholds(),
        })
    }

    pub fn windows(&self) -> &TimingWindows {
        &self.windows
    }

    /// Tier for a press `distance` beats away from a boundary.
    pub fn tier_for_distance(&self, distance: f64) -> Tier {
        let [perfect, great, okay] = self.thresholds;
        if distance <= perfect {
            Tier::Perfect
        } else if distance <= great {
            Tier::Great
        } else if distance <= okay {
            Tier::Okay
        } else {
            Tier::Miss
        }
    }

    /// Judge a press at `progress` given which slots are already claimed.
    ///
    /// - Current beat free: scored against the closer boundary; an early press
    ///   claims the next beat, anything else (including a Miss) the current one.
    /// - Only the current beat free: scored against the trailing boundary.
    /// - Current beat taken: only the upcoming boundary counts and the press
    ///   claims the next beat, Miss or not.
    /// - Both taken: Miss without a claim.
    pub fn judge(&self, progress: f64, slots: &BeatSlots) -> Judgment {
        let to_next = 1.0 - progress;
        if slots.is_free(BeatSlot::Current) && !slots.is_free(BeatSlot::Next) {
            Judgment {
                tier: self.tier_for_distance(progress),
                slot: Some(BeatSlot::Current),
            }
        } else if slots.is_free(BeatSlot::Current) {
            let trailing = self.tier_for_distance(progress);
            let leading = self.tier_for_distance(to_next);
            if leading < trailing {
                Judgment {
                    tier: leading,
                    slot: Some(BeatSlot::Next),
                }
            } else {
                Judgment {
                    tier: trailing,
                    slot: Some(BeatSlot::Current),
                }
            }
        } else if slots.is_free(BeatSlot::Next) {
            Judgment {
                tier: self.tier_for_distance(to_next),
                slot: Some(BeatSlot::Next),
            }
        } else {
            Judgment {
                tier: Tier::Miss,
                slot: None,
            }
        }
    }
}

impl Default for TimingJudge {
    fn default() -> Self {
        let windows = TimingWindows::default();
        Self {
            windows,
            thresholds: windows.thresholds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used_current() -> BeatSlots {
        let mut slots = BeatSlots::new();
        slots.claim(BeatSlot::Current);
        slots
    }

    #[test]
    fn default_thresholds() {
        let [p, g, o] = TimingWindows::default().thresholds();
        assert!((p - 0.05).abs() < 1e-12);
        assert!((g - 0.125).abs() < 1e-12);
        assert!((o - 0.225).abs() < 1e-12);
    }

    #[test]
    fn on_beat_press_is_perfect_on_current() {
        let judge = TimingJudge::default();
        let j = judge.judge(0.02, &BeatSlots::new());
        assert_eq!(j.tier, Tier::Perfect);
        assert_eq!(j.slot, Some(BeatSlot::Current));
    }

    #[test]
    fn late_press_degrades() {
        let judge = TimingJudge::default();
        let slots = BeatSlots::new();
        assert_eq!(judge.judge(0.1, &slots).tier, Tier::Great);
        assert_eq!(judge.judge(0.2, &slots).tier, Tier::Okay);
        assert_eq!(judge.judge(0.3, &slots).tier, Tier::Miss);
    }

    #[test]
    fn early_press_claims_next_beat() {
        let judge = TimingJudge::default();
        let j = judge.judge(0.97, &BeatSlots::new());
        assert_eq!(j.tier, Tier::Perfect);
        assert_eq!(j.slot, Some(BeatSlot::Next));
    }

    #[test]
    fn mid_beat_miss_claims_current() {
        let judge = TimingJudge::default();
        let j = judge.judge(0.5, &BeatSlots::new());
        assert_eq!(j.tier, Tier::Miss);
        assert_eq!(j.slot, Some(BeatSlot::Current));
    }

    #[test]
    fn used_beat_only_scores_against_next_boundary() {
        let judge = TimingJudge::default();
        let slots = used_current();

        let j = judge.judge(0.02, &slots);
        assert_eq!(j.tier, Tier::Miss);
        assert_eq!(j.slot, Some(BeatSlot::Next));

        let j = judge.judge(0.9, &slots);
        assert_eq!(j.tier, Tier::Great);
        assert_eq!(j.slot, Some(BeatSlot::Next));
    }

    #[test]
    fn both_slots_taken_is_unclaimed_miss() {
        let judge = TimingJudge::default();
        let mut slots = used_current();
        slots.claim(BeatSlot::Next);
        let j = judge.judge(0.99, &slots);
        assert_eq!(j, Judgment { tier: Tier::Miss, slot: None });
    }

    #[test]
    fn early_claim_leaves_only_the_current_beat() {
        let judge = TimingJudge::default();
        let mut slots = BeatSlots::new();
        slots.claim(BeatSlot::Next);
        let j = judge.judge(0.97, &slots);
        assert_eq!(j, Judgment { tier: Tier::Miss, slot: Some(BeatSlot::Current) });
        let j = judge.judge(0.02, &slots);
        assert_eq!(j.tier, Tier::Perfect);
        assert_eq!(j.slot, Some(BeatSlot::Current));
    }

    #[test]
    fn progress_past_one_counts_for_the_next_beat() {
        let judge = TimingJudge::default();
        let j = judge.judge(1.03, &BeatSlots::new());
        assert_eq!(j.tier, Tier::Perfect);
        assert_eq!(j.slot, Some(BeatSlot::Next));
    }

    #[test]
    fn boundaries_are_inclusive() {
        let judge = TimingJudge::new(TimingWindows::new(0.5, 0.25, 0.25).unwrap()).unwrap();
        assert_eq!(judge.tier_for_distance(0.25), Tier::Perfect);
        assert_eq!(judge.tier_for_distance(0.375), Tier::Great);
        assert_eq!(judge.tier_for_distance(0.5), Tier::Okay);
    }

    #[test]
    fn rejects_invalid_windows() {
        assert_eq!(
            TimingWindows::new(0.5, 0.4, 0.2).unwrap_err(),
            ConfigError::MarginsExceedBeat { sum: 0.5 + 0.4 + 0.2 }
        );
        assert!(matches!(
            TimingWindows::new(-0.1, 0.1, 0.1),
            Err(ConfigError::InvalidMargin { name: "perfect_margin", .. })
        ));
        assert!(TimingWindows::new(0.1, f64::NAN, 0.1).is_err());
    }

    #[test]
    fn builder_fills_defaults() {
        let windows = TimingWindows::builder().perfect(0.2).build().unwrap();
        assert_eq!(windows.perfect, 0.2);
        assert_eq!(windows.great, TimingWindows::DEFAULT_GREAT);
        assert_eq!(windows.okay, TimingWindows::DEFAULT_OKAY);
    }

    #[test]
    fn tier_order_is_best_first() {
        assert!(Tier::Perfect < Tier::Great);
        assert!(Tier::Okay < Tier::Miss);
        assert!(!Tier::Miss.is_hit());
        assert_eq!(Tier::Great.label(), "Great");
    }
}
