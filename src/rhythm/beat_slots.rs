/// Which beat a press was scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatSlot {
    /// The beat that fired most recently (press landed after it).
    Current,
    /// The beat about to fire (press landed early).
    Next,
}

/// Usage flags that decide whether a press near a beat boundary belongs to
/// the beat just ending or the one about to start.
///
/// A press claims at most one slot. `free_beat` runs exactly once per fire
/// and carries an early claim over onto the new current beat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeatSlots {
    beat_used: bool,
    next_beat_used: bool,
    last_beat_used: bool,
}

impl BeatSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_beat_used(&self) -> bool {
        self.beat_used
    }

    pub fn is_next_beat_used(&self) -> bool {
        self.next_beat_used
    }

    /// Whether the beat before the most recent fire had a press on it.
    pub fn was_last_beat_used(&self) -> bool {
        self.last_beat_used
    }

    pub fn is_free(&self, slot: BeatSlot) -> bool {
        match slot {
            BeatSlot::Current => !self.beat_used,
            BeatSlot::Next => !self.next_beat_used,
        }
    }

    /// Before `free_beat`: whether the beat now ending received a press,
    /// either on time or carried in from an early press.
    pub fn ending_beat_used(&self) -> bool {
        self.beat_used || self.next_beat_used
    }

    /// Before `free_beat`: whether the beat about to become current is unclaimed.
    pub fn upcoming_beat_free(&self) -> bool {
        !self.next_beat_used
    }

    pub fn claim(&mut self, slot: BeatSlot) {
        match slot {
            BeatSlot::Current => self.beat_used = true,
            BeatSlot::Next => self.next_beat_used = true,
        }
    }

    /// Roll the flags over to the new beat.
    pub fn free_beat(&mut self) {
        self.last_beat_used = self.ending_beat_used();
        if self.next_beat_used {
            self.beat_used = true;
            self.next_beat_used = false;
        } else {
            self.beat_used = false;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
