pub mod audio;
pub mod input;
pub mod movement;
pub mod presentation;
pub mod time;

pub use audio::{AudioCall, AudioSink, LogAudio, MISS_SOUND, RecordingAudio};
pub use input::{
    ButtonId, ButtonPress, ChannelInput, ChannelInputSender, InputSource, NoInput, ScriptedInput,
};
pub use movement::{LogMovement, MovementCall, MovementSink, RecordingMovement};
pub use presentation::{LogPresentation, PresentationCall, PresentationSink, RecordingPresentation};
pub use time::{FrameTimer, MockTimeProvider, SystemTimeProvider, TimeProvider};
