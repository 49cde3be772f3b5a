use super::input::ButtonId;
use crate::judge::Tier;

/// Abstraction over visual feedback (HUD, border, button indicators).
/// Implementations: LogPresentation (headless runs), RecordingPresentation (testing).
///
/// All calls are fire-and-forget; the core never waits on an effect.
pub trait PresentationSink {
    fn flash_button(&mut self, button: ButtonId);
    fn flicker_border(&mut self);
    fn show_judgment(&mut self, tier: Tier);
    fn show_combo_break(&mut self);
    fn show_fever_enter(&mut self);
    fn show_fever_exit(&mut self);
    /// `total` is the running player score after the change.
    fn update_score(&mut self, total: u64);
}

/// A recorded presentation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationCall {
    FlashButton(ButtonId),
    FlickerBorder,
    Judgment(Tier),
    ComboBreak,
    FeverEnter,
    FeverExit,
    Score(u64),
}

/// Presentation sink that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    pub calls: Vec<PresentationCall>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn judgments(&self) -> Vec<Tier> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::Judgment(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn flashed_buttons(&self) -> Vec<ButtonId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::FlashButton(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: PresentationCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn last_score(&self) -> Option<u64> {
        self.calls.iter().rev().find_map(|c| match c {
            PresentationCall::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PresentationSink for RecordingPresentation {
    fn flash_button(&mut self, button: ButtonId) {
        self.calls.push(PresentationCall::FlashButton(button));
    }

    fn flicker_border(&mut self) {
        self.calls.push(PresentationCall::FlickerBorder);
    }

    fn show_judgment(&mut self, tier: Tier) {
        self.calls.push(PresentationCall::Judgment(tier));
    }

    fn show_combo_break(&mut self) {
        self.calls.push(PresentationCall::ComboBreak);
    }

    fn show_fever_enter(&mut self) {
        self.calls.push(PresentationCall::FeverEnter);
    }

    fn show_fever_exit(&mut self) {
        self.calls.push(PresentationCall::FeverExit);
    }

    fn update_score(&mut self, total: u64) {
        self.calls.push(PresentationCall::Score(total));
    }
}

/// Presentation sink that logs judgments and effects. Border flicker is too
/// chatty for info level and goes to trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresentation;

impl PresentationSink for LogPresentation {
    fn flash_button(&mut self, button: ButtonId) {
        log::debug!("flash button {}", button);
    }

    fn flicker_border(&mut self) {
        log::trace!("border flicker");
    }

    fn show_judgment(&mut self, tier: Tier) {
        log::info!("{}", tier.label());
    }

    fn show_combo_break(&mut self) {
        log::info!("combo break");
    }

    fn show_fever_enter(&mut self) {
        log::info!("FEVER!");
    }

    fn show_fever_exit(&mut self) {
        log::info!("fever over");
    }

    fn update_score(&mut self, total: u64) {
        log::debug!("score {}", total);
    }
}
