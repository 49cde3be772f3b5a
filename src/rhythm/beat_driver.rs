use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};

/// Where beat fires come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatSource {
    /// Fire from an internal schedule advanced by the frame delta.
    #[default]
    SelfTimed,
    /// Fire when the audio engine reports a music beat.
    External,
}

/// Repeating timer driven by the frame tick.
///
/// `remaining_us` counts down by the frame delta; each time it reaches zero
/// a beat fires and one interval is added back, so a long frame fires every
/// beat it covered and no time is lost to rounding.
#[derive(Debug, Clone)]
pub struct BeatSchedule {
    interval_us: i64,
    remaining_us: i64,
}

impl BeatSchedule {
    /// First beat fires one full interval after start.
    pub fn new(interval_us: i64) -> Self {
        let interval_us = interval_us.max(1);
        Self {
            interval_us,
            remaining_us: interval_us,
        }
    }

    pub fn interval_us(&self) -> i64 {
        self.interval_us
    }

    /// Time left until the next scheduled beat.
    pub fn remaining_us(&self) -> i64 {
        self.remaining_us
    }

    /// Change tempo without disturbing the beat currently counting down.
    pub fn set_interval(&mut self, interval_us: i64) {
        self.interval_us = interval_us.max(1);
    }

    pub fn restart(&mut self) {
        self.remaining_us = self.interval_us;
    }

    /// Advance by one frame and return how many beats fired.
    pub fn advance(&mut self, dt_us: i64) -> u32 {
        self.remaining_us -= dt_us.max(0);
        let mut fired = 0;
        while self.remaining_us <= 0 {
            self.remaining_us += self.interval_us;
            fired += 1;
        }
        fired
    }
}

/// Handle given to the audio engine so its beat callback can signal a fire
/// from its own thread. The pulse is applied on the next session tick.
#[derive(Debug, Clone)]
pub struct BeatPulseSender {
    tx: Sender<()>,
}

impl BeatPulseSender {
    /// Report one music beat. Returns false once the session is gone.
    pub fn pulse(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Decides when beats fire. Owned by the session and polled once per tick.
#[derive(Debug)]
pub enum BeatDriver {
    SelfTimed(BeatSchedule),
    External {
        rx: Receiver<()>,
        tx: Sender<()>,
    },
}

impl BeatDriver {
    pub fn self_timed(interval_us: i64) -> Self {
        Self::SelfTimed(BeatSchedule::new(interval_us))
    }

    pub fn external() -> Self {
        let (tx, rx) = mpsc::channel();
        Self::External { rx, tx }
    }

    pub fn for_source(source: BeatSource, interval_us: i64) -> Self {
        match source {
            BeatSource::SelfTimed => Self::self_timed(interval_us),
            BeatSource::External => Self::external(),
        }
    }

    pub fn source(&self) -> BeatSource {
        match self {
            Self::SelfTimed(_) => BeatSource::SelfTimed,
            Self::External { .. } => BeatSource::External,
        }
    }

    /// A new sender for the external pulse channel. `None` when self-timed.
    pub fn pulse_sender(&self) -> Option<BeatPulseSender> {
        match self {
            Self::SelfTimed(_) => None,
            Self::External { tx, .. } => Some(BeatPulseSender { tx: tx.clone() }),
        }
    }

    pub fn set_interval(&mut self, interval_us: i64) {
        if let Self::SelfTimed(schedule) = self {
            schedule.set_interval(interval_us);
        }
    }

    pub fn restart(&mut self) {
        match self {
            Self::SelfTimed(schedule) => schedule.restart(),
            Self::External { rx, .. } => while rx.try_recv().is_ok() {},
        }
    }

    /// Number of beats that fire this frame.
    pub fn poll(&mut self, dt_us: i64) -> u32 {
        match self {
            Self::SelfTimed(schedule) => schedule.advance(dt_us),
            Self::External { rx, .. } => {
                let mut fired = 0;
                loop {
                    match rx.try_recv() {
                        Ok(()) => fired += 1,
                        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                    }
                }
                fired
            }
        }
    }
}
