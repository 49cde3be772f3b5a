/// Result of one static beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftStep {
    /// The unit should drift on this beat.
    pub drift: bool,
    /// Drifting began on this beat.
    pub started: bool,
}

/// Counts beats without forward progress and starts drifting past a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftTracker {
    static_beats: u32,
    static_beat_limit: u32,
    drifting: bool,
}

impl DriftTracker {
    pub fn new(static_beat_limit: u32) -> Self {
        Self {
            static_beats: 0,
            static_beat_limit,
            drifting: false,
        }
    }

    pub fn static_beats(&self) -> u32 {
        self.static_beats
    }

    pub fn static_beat_limit(&self) -> u32 {
        self.static_beat_limit
    }

    pub fn is_drifting(&self) -> bool {
        self.drifting
    }

    pub fn on_static_beat(&mut self) -> DriftStep {
        self.static_beats = self.static_beats.saturating_add(1);
        let started = !self.drifting && self.static_beats >= self.static_beat_limit;
        if started {
            self.drifting = true;
            log::debug!("drifting after {} static beats", self.static_beats);
        }
        DriftStep {
            drift: self.drifting,
            started,
        }
    }

    /// Forward progress was made.
    pub fn reset(&mut self) {
        self.static_beats = 0;
        self.drifting = false;
    }
}

impl Default for DriftTracker {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drifts_from_the_limit_on() {
        let mut tracker = DriftTracker::new(3);
        assert!(!tracker.on_static_beat().drift);
        assert!(!tracker.on_static_beat().drift);
        assert_eq!(
            tracker.on_static_beat(),
            DriftStep {
                drift: true,
                started: true
            }
        );
        assert_eq!(
            tracker.on_static_beat(),
            DriftStep {
                drift: true,
                started: false
            }
        );
    }

    #[test]
    fn reset_stops_drift() {
        let mut tracker = DriftTracker::new(1);
        tracker.on_static_beat();
        assert!(tracker.is_drifting());
        tracker.reset();
        assert!(!tracker.is_drifting());
        assert_eq!(tracker.static_beats(), 0);
    }
}
