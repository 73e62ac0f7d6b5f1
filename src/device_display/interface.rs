use crate::error::BoxError;

pub const CHARS_PER_LINE: usize = 24;

/// Two-line text panel the recognised gesture is shown on.
pub trait DeviceDisplay: Send + Sync {
    fn clear(&mut self) -> Result<(), BoxError>;

    /// Replaces line `line` (0-based). Text longer than the panel is cut.
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), BoxError>;

    fn num_lines(&self) -> u8 {
        2
    }
}
