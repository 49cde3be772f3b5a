mod timing_judge;

pub use timing_judge::{Judgment, Tier, TimingJudge, TimingWindows, TimingWindowsBuilder};
