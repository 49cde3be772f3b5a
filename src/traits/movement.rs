/// Abstraction over tribe movement across the level.
/// Implementations: LogMovement (headless runs), RecordingMovement (testing).
pub trait MovementSink {
    fn move_forward(&mut self, distance: f64);
    fn move_backward(&mut self, distance: f64);
    /// Backward drift applied once per beat while the tribe is stalled.
    fn drift(&mut self, distance: f64);
    /// Whether the current area has been crossed. Queried by level progression.
    fn is_area_complete(&self) -> bool;
}

/// A recorded movement call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementCall {
    Forward(f64),
    Backward(f64),
    Drift(f64),
}

/// Movement sink tracking a 1D position over an area of fixed length.
#[derive(Debug, Clone, Default)]
pub struct RecordingMovement {
    pub calls: Vec<MovementCall>,
    position: f64,
    area_length: f64,
}

impl RecordingMovement {
    pub fn new(area_length: f64) -> Self {
        Self {
            calls: Vec::new(),
            position: 0.0,
            area_length,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn drift_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MovementCall::Drift(_)))
            .count()
    }

    pub fn forward_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MovementCall::Forward(_)))
            .count()
    }

    pub fn backward_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MovementCall::Backward(_)))
            .count()
    }

    // The tribe never walks back past the area start.
    fn retreat(&mut self, distance: f64) {
        self.position = (self.position - distance).max(0.0);
    }
}

impl MovementSink for RecordingMovement {
    fn move_forward(&mut self, distance: f64) {
        self.calls.push(MovementCall::Forward(distance));
        self.position += distance;
    }

    fn move_backward(&mut self, distance: f64) {
        self.calls.push(MovementCall::Backward(distance));
        self.retreat(distance);
    }

    fn drift(&mut self, distance: f64) {
        self.calls.push(MovementCall::Drift(distance));
        self.retreat(distance);
    }

    fn is_area_complete(&self) -> bool {
        self.position >= self.area_length
    }
}

/// Movement sink that logs and tracks position like [`RecordingMovement`].
#[derive(Debug, Clone, Default)]
pub struct LogMovement {
    inner: RecordingMovement,
}

impl LogMovement {
    pub fn new(area_length: f64) -> Self {
        Self {
            inner: RecordingMovement::new(area_length),
        }
    }

    pub fn position(&self) -> f64 {
        self.inner.position()
    }
}

impl MovementSink for LogMovement {
    fn move_forward(&mut self, distance: f64) {
        self.inner.move_forward(distance);
        log::info!("march forward {:.2} -> {:.2}", distance, self.inner.position());
    }

    fn move_backward(&mut self, distance: f64) {
        self.inner.move_backward(distance);
        log::info!("pushed back {:.2} -> {:.2}", distance, self.inner.position());
    }

    fn drift(&mut self, distance: f64) {
        self.inner.drift(distance);
        log::debug!("drift {:.2} -> {:.2}", distance, self.inner.position());
    }

    fn is_area_complete(&self) -> bool {
        self.inner.is_area_complete()
    }
}
