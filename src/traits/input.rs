use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Logical button identifier (1-based). Physical key binding happens upstream.
pub type ButtonId = u8;

/// A debounced logical button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPress {
    pub button: ButtonId,
    /// Timestamp in microseconds from session start, as seen by the input layer.
    pub time_us: i64,
}

impl ButtonPress {
    pub fn new(button: ButtonId, time_us: i64) -> Self {
        Self { button, time_us }
    }
}

/// Abstraction over input sources.
/// Implementations: ChannelInput (cross-thread delivery), ScriptedInput (testing/autoplay).
pub trait InputSource {
    /// Drain the presses delivered since the last call, in arrival order.
    fn poll_presses(&mut self) -> Vec<ButtonPress>;
}

/// Input source that never produces presses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_presses(&mut self) -> Vec<ButtonPress> {
        Vec::new()
    }
}

/// Sending half of a [`ChannelInput`]. Cheap to clone and `Send`, so an input
/// thread can hold it while the simulation thread owns the receiver.
#[derive(Debug, Clone)]
pub struct ChannelInputSender {
    tx: Sender<ButtonPress>,
}

impl ChannelInputSender {
    /// Queue a press. Returns false once the receiving session is gone.
    pub fn press(&self, press: ButtonPress) -> bool {
        self.tx.send(press).is_ok()
    }
}

/// Funnels presses from other threads onto the simulation thread.
#[derive(Debug)]
pub struct ChannelInput {
    rx: Receiver<ButtonPress>,
}

impl ChannelInput {
    pub fn new() -> (ChannelInputSender, Self) {
        let (tx, rx) = mpsc::channel();
        (ChannelInputSender { tx }, Self { rx })
    }
}

impl InputSource for ChannelInput {
    fn poll_presses(&mut self) -> Vec<ButtonPress> {
        let mut presses = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(press) => presses.push(press),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        presses
    }
}

/// Replays a fixed list of presses against a caller-advanced clock.
/// A press is released once `advance_to` reaches its timestamp.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<ButtonPress>,
    now_us: i64,
}

impl ScriptedInput {
    pub fn new(mut presses: Vec<ButtonPress>) -> Self {
        presses.sort_by_key(|p| p.time_us);
        Self {
            pending: presses.into(),
            now_us: 0,
        }
    }

    /// Move the script clock forward. Presses due at or before `now_us` become pollable.
    pub fn advance_to(&mut self, now_us: i64) {
        self.now_us = self.now_us.max(now_us);
    }

    pub fn push(&mut self, press: ButtonPress) {
        let index = self
            .pending
            .iter()
            .position(|p| p.time_us > press.time_us)
            .unwrap_or(self.pending.len());
        self.pending.insert(index, press);
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_presses(&mut self) -> Vec<ButtonPress> {
        let mut due = Vec::new();
        while let Some(front) = self.pending.front() {
            if front.time_us > self.now_us {
                break;
            }
            if let Some(press) = self.pending.pop_front() {
                due.push(press);
            }
        }
        due
    }
}
