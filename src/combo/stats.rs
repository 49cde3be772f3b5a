use crate::judge::Tier;

/// Session totals for judgments, misses and completed work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub perfect_count: u32,
    pub great_count: u32,
    pub okay_count: u32,
    /// Every missed note, whatever the cause.
    pub misses: u32,
    /// Misses caused by a silent beat mid-sequence.
    pub dropped_beats: u32,
    pub wrong_buttons: u32,
    pub commands_performed: u32,
    pub simon_patterns_cleared: u32,
}

impl PlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timed press. Misses are counted separately by the session.
    pub fn add_judgment(&mut self, tier: Tier) {
        match tier {
            Tier::Perfect => self.perfect_count += 1,
            Tier::Great => self.great_count += 1,
            Tier::Okay => self.okay_count += 1,
            Tier::Miss => {}
        }
    }

    pub fn count(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Perfect => self.perfect_count,
            Tier::Great => self.great_count,
            Tier::Okay => self.okay_count,
            Tier::Miss => self.misses,
        }
    }

    pub fn hits(&self) -> u32 {
        self.perfect_count + self.great_count + self.okay_count
    }

    /// Share of judged notes that were hits, in percent.
    pub fn accuracy(&self) -> f64 {
        let total = self.hits() + self.misses;
        if total == 0 {
            return 100.0;
        }
        self.hits() as f64 / total as f64 * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
