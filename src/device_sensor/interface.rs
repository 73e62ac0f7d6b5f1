use crate::device_sensor::frame::Frame;
use crate::error::BoxError;

/// The hand-tracking device. `frame` returns the most recent snapshot and may
/// return a frame with no hands.
pub trait DeviceSensor {
    fn frame(&self) -> Result<Frame, BoxError>;
}
