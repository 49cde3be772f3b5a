use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Abstraction over time sources.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Deterministic clock for tests and scripted runs. Clones share the same
/// underlying time, so a test can keep a handle while a [`FrameTimer`] owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTimeProvider {
    current_us: Rc<Cell<i64>>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: i64) {
        self.current_us.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.set(self.current_us.get() + delta_us);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }
}

/// Turns a time source into per-frame deltas for the simulation tick.
pub struct FrameTimer<T: TimeProvider> {
    source: T,
    last_us: i64,
}

impl<T: TimeProvider> FrameTimer<T> {
    pub fn new(source: T) -> Self {
        let last_us = source.now_us();
        Self { source, last_us }
    }

    /// Microseconds since the previous call (or construction). Never negative.
    pub fn delta_us(&mut self) -> i64 {
        let now = self.source.now_us();
        let delta = (now - self.last_us).max(0);
        self.last_us = now;
        delta
    }

    /// Current session time in microseconds.
    pub fn now_us(&self) -> i64 {
        self.source.now_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_provider_advance() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_us(), 0);
        tp.advance(1_000_000);
        assert_eq!(tp.now_us(), 1_000_000);
        tp.advance(500_000);
        assert_eq!(tp.now_us(), 1_500_000);
    }

    #[test]
    fn mock_time_provider_set() {
        let tp = MockTimeProvider::new();
        tp.set_time(5_000_000);
        assert_eq!(tp.now_us(), 5_000_000);
    }

    #[test]
    fn system_time_provider_monotonic() {
        let tp = SystemTimeProvider::new();
        let t1 = tp.now_us();
        let t2 = tp.now_us();
        assert!(t2 >= t1);
    }

    #[test]
    fn mock_clones_share_time() {
        let a = MockTimeProvider::new();
        let b = a.clone();
        a.advance(250);
        assert_eq!(b.now_us(), 250);
    }

    #[test]
    fn frame_timer_reports_deltas() {
        let clock = MockTimeProvider::new();
        let mut timer = FrameTimer::new(clock.clone());
        clock.advance(16_667);
        assert_eq!(timer.delta_us(), 16_667);
        assert_eq!(timer.delta_us(), 0);

        clock.advance(33_000);
        assert_eq!(timer.delta_us(), 33_000);
        assert_eq!(timer.now_us(), 49_667);
    }

    #[test]
    fn frame_timer_never_goes_negative() {
        let clock = MockTimeProvider::new();
        let mut timer = FrameTimer::new(clock.clone());
        clock.set_time(10_000);
        assert_eq!(timer.delta_us(), 10_000);
        clock.set_time(5_000);
        assert_eq!(timer.delta_us(), 0);
    }
}
