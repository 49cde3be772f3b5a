use crate::state::GameState;

/// Scoring and fever tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboRules {
    pub score_per_note: u64,
    /// Consecutive hits that make up one combo.
    pub hits_per_combo: u32,
    /// Combo count at which fever mode starts.
    pub fever_mode_threshold: u32,
    pub fever_score_multiplier: u64,
    /// Idle time in freeplay after which a running streak is dropped.
    pub combo_timeout_us: i64,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self {
            score_per_note: 1,
            hits_per_combo: 4,
            fever_mode_threshold: 4,
            fever_score_multiplier: 2,
            combo_timeout_us: 5_000_000,
        }
    }
}

/// Effects of one registered hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Score added by this hit, multiplier included.
    pub points: u64,
    /// The hit completed a combo.
    pub combo_advanced: bool,
    /// Fever mode started on this hit.
    pub entered_fever: bool,
}

/// Effects of a combo reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboBreak {
    /// Fever mode was active and has ended.
    pub fever_ended: bool,
    /// Streak length that was lost.
    pub lost_streak: u32,
}

/// Streak, combo and fever bookkeeping.
#[derive(Debug, Clone)]
pub struct ComboEngine {
    rules: ComboRules,
    current_note_streak: u32,
    highest_note_streak: u32,
    combo_count: u32,
    max_combo_count: u32,
    player_score: u64,
    in_fever_mode: bool,
    score_multiplier: u64,
    idle_us: i64,
}

impl ComboEngine {
    pub fn new(rules: ComboRules) -> Self {
        Self {
            rules,
            current_note_streak: 0,
            highest_note_streak: 0,
            combo_count: 0,
            max_combo_count: 0,
            player_score: 0,
            in_fever_mode: false,
            score_multiplier: 1,
            idle_us: 0,
        }
    }

    pub fn rules(&self) -> &ComboRules {
        &self.rules
    }

    pub fn current_note_streak(&self) -> u32 {
        self.current_note_streak
    }

    pub fn highest_note_streak(&self) -> u32 {
        self.highest_note_streak
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn max_combo_count(&self) -> u32 {
        self.max_combo_count
    }

    pub fn player_score(&self) -> u64 {
        self.player_score
    }

    pub fn in_fever_mode(&self) -> bool {
        self.in_fever_mode
    }

    /// 1 outside fever, the fever multiplier inside.
    pub fn score_multiplier(&self) -> u64 {
        self.score_multiplier
    }

    /// Time since the last hit, counted only while the idle watchdog runs.
    pub fn idle_us(&self) -> i64 {
        self.idle_us
    }

    pub fn register_hit(&mut self) -> HitOutcome {
        self.current_note_streak += 1;
        self.idle_us = 0;
        self.highest_note_streak = self.highest_note_streak.max(self.current_note_streak);

        let points = self.rules.score_per_note * self.score_multiplier;
        self.player_score += points;

        let combo_advanced = self.current_note_streak % self.rules.hits_per_combo.max(1) == 0;
        if combo_advanced {
            self.combo_count += 1;
        }

        let entered_fever =
            !self.in_fever_mode && self.combo_count >= self.rules.fever_mode_threshold;
        if entered_fever {
            self.in_fever_mode = true;
            self.score_multiplier = self.rules.fever_score_multiplier;
            log::info!("entered fever mode at combo {}", self.combo_count);
        }

        self.max_combo_count = self.max_combo_count.max(self.combo_count);

        HitOutcome {
            points,
            combo_advanced,
            entered_fever,
        }
    }

    /// Streak, combo count and fever end together.
    pub fn reset_combo(&mut self) -> ComboBreak {
        let lost_streak = self.current_note_streak;
        let fever_ended = self.in_fever_mode;
        self.combo_count = 0;
        self.current_note_streak = 0;
        self.idle_us = 0;
        self.in_fever_mode = false;
        self.score_multiplier = 1;
        if fever_ended {
            log::info!("fever mode ended");
        }
        log::debug!("combo broken after {} notes", lost_streak);
        ComboBreak {
            fever_ended,
            lost_streak,
        }
    }

    /// Idle watchdog, independent of the beat clock. Runs only in freeplay
    /// with a live streak; resets the combo once the timeout is reached.
    pub fn advance_idle(&mut self, dt_us: i64, state: GameState) -> Option<ComboBreak> {
        if self.current_note_streak == 0 || state != GameState::Freeplay {
            return None;
        }
        self.idle_us += dt_us.max(0);
        if self.idle_us >= self.rules.combo_timeout_us {
            log::debug!("combo timed out after {} us idle", self.idle_us);
            Some(self.reset_combo())
        } else {
            None
        }
    }

    /// Back to a fresh session. Clears score and records as well.
    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
    }
}

impl Default for ComboEngine {
    fn default() -> Self {
        Self::new(ComboRules::default())
    }
}
