use crate::device_display::interface::{DeviceDisplay, CHARS_PER_LINE};
use crate::error::BoxError;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

/// Keeps every line written so tests can read back what the user saw.
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    written: Arc<Mutex<Vec<String>>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger,
            written: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared view of the written lines; stays valid after the display is
    /// moved behind a trait object.
    pub fn written(&self) -> Arc<Mutex<Vec<String>>> {
        self.written.clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn clear(&mut self) -> Result<(), BoxError> {
        self.logger.info("DeviceDisplayFake::clear()")?;
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), BoxError> {
        if line >= self.num_lines() {
            return Err(format!("Invalid line number {}", line).into());
        }
        let shown: String = text.chars().take(CHARS_PER_LINE).collect();
        self.logger
            .info(&format!("DeviceDisplayFake::write_line({}, {})", line, shown))?;
        self.written
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })?
            .push(shown);
        Ok(())
    }
}
