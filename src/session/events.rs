use crate::combo::ComboBreak;
use crate::command::CommandAction;
use crate::judge::Judgment;
use crate::state::GameState;
use crate::traits::input::ButtonId;

/// Why a note counted as missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissReason {
    /// The press landed outside every timing window, or on a beat already taken.
    Timing,
    /// On time, but not the key the pattern or any command expected.
    WrongButton,
    /// A beat passed in silence while a sequence was in progress.
    Dropped,
}

/// Result of one accepted press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressOutcome {
    pub button: ButtonId,
    pub judgment: Judgment,
    /// Counted toward the streak.
    pub hit: bool,
}

/// Something the session did during a tick or press.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// `beat` counts fires since the session started or restarted.
    BeatFired { beat: u64 },
    Revealed { button: ButtonId },
    Pressed(PressOutcome),
    Missed(MissReason),
    StateChanged { from: GameState, to: GameState },
    SimonCleared { pattern: String },
    CommandPerformed { name: String, action: CommandAction },
    FeverEntered,
    ComboBroken(ComboBreak),
    DriftStarted,
    /// The movement sink reports the area crossed. Emitted once per session.
    AreaComplete,
}
