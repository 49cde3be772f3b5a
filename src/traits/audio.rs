use super::input::ButtonId;

/// Sound id passed to [`AudioSink::play_button_sound`] for a missed note.
pub const MISS_SOUND: ButtonId = 0;

/// Abstraction over the sound bank. Calls are fire-and-forget.
/// Implementations: LogAudio (headless runs), RecordingAudio (testing).
pub trait AudioSink {
    /// Play the sound bound to `button`, or the miss sound for [`MISS_SOUND`].
    fn play_button_sound(&mut self, button: ButtonId);

    fn play_fever_stinger(&mut self);
}

/// A recorded audio call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    ButtonSound(ButtonId),
    FeverStinger,
}

/// Audio sink that records every call for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_sounds(&self) -> Vec<ButtonId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AudioCall::ButtonSound(b) => Some(*b),
                AudioCall::FeverStinger => None,
            })
            .collect()
    }

    pub fn stinger_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, AudioCall::FeverStinger))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl AudioSink for RecordingAudio {
    fn play_button_sound(&mut self, button: ButtonId) {
        self.calls.push(AudioCall::ButtonSound(button));
    }

    fn play_fever_stinger(&mut self) {
        self.calls.push(AudioCall::FeverStinger);
    }
}

/// Audio sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_button_sound(&mut self, button: ButtonId) {
        if button == MISS_SOUND {
            log::debug!("audio: miss sound");
        } else {
            log::debug!("audio: button {} sound", button);
        }
    }

    fn play_fever_stinger(&mut self) {
        log::debug!("audio: fever stinger");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_audio_separates_calls() {
        let mut audio = RecordingAudio::new();
        audio.play_button_sound(2);
        audio.play_fever_stinger();
        audio.play_button_sound(MISS_SOUND);

        assert_eq!(audio.button_sounds(), vec![2, MISS_SOUND]);
        assert_eq!(audio.stinger_count(), 1);

        audio.clear();
        assert!(audio.calls.is_empty());
    }
}
