use crate::util::error::ConfigError;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Phase timer for the current beat.
///
/// The clock only measures; deciding when a beat fires belongs to
/// [`super::BeatDriver`]. `reset_phase` is called by the session on every fire.
#[derive(Debug, Clone)]
pub struct BeatClock {
    bpm: f64,
    beat_interval_us: i64,
    phase_us: i64,
}

impl BeatClock {
    pub fn new(bpm: f64) -> Result<Self, ConfigError> {
        let beat_interval_us = interval_for_bpm(bpm)?;
        Ok(Self {
            bpm,
            beat_interval_us,
            phase_us: 0,
        })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Beat length in microseconds (`60 / bpm` seconds).
    pub fn beat_interval_us(&self) -> i64 {
        self.beat_interval_us
    }

    /// Time since the last beat fired.
    pub fn phase_us(&self) -> i64 {
        self.phase_us
    }

    /// Change tempo. The phase is kept, so progress jumps proportionally.
    pub fn set_bpm(&mut self, bpm: f64) -> Result<(), ConfigError> {
        self.beat_interval_us = interval_for_bpm(bpm)?;
        self.bpm = bpm;
        Ok(())
    }

    /// Advance the phase by one frame. Negative deltas are ignored.
    pub fn advance(&mut self, dt_us: i64) {
        self.phase_us = self.phase_us.saturating_add(dt_us.max(0));
    }

    pub fn reset_phase(&mut self) {
        self.phase_us = 0;
    }

    /// Fraction of the beat elapsed since the last fire.
    ///
    /// Not clamped: with frame jitter, or an external driver that fires a
    /// little late, this reads slightly above 1.0.
    pub fn progress(&self) -> f64 {
        self.phase_us as f64 / self.beat_interval_us as f64
    }
}

fn interval_for_bpm(bpm: f64) -> Result<i64, ConfigError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(ConfigError::InvalidBpm(bpm));
    }
    let interval = (MICROS_PER_MINUTE / bpm).round();
    if interval < 1.0 {
        return Err(ConfigError::InvalidBpm(bpm));
    }
    Ok(interval as i64)
}
