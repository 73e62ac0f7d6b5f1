use crate::device_display::interface::{DeviceDisplay, CHARS_PER_LINE};
use crate::error::BoxError;

const LINES: usize = 2;

pub struct DeviceDisplayConsole {
    buffer: [String; LINES],
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            buffer: Default::default(),
        }
    }

    fn render(&self) {
        println!("┌{}┐", "─".repeat(CHARS_PER_LINE));
        for line in &self.buffer {
            println!("│{:<width$}│", line, width = CHARS_PER_LINE);
        }
        println!("└{}┘", "─".repeat(CHARS_PER_LINE));
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn clear(&mut self) -> Result<(), BoxError> {
        self.buffer = Default::default();
        self.render();
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), BoxError> {
        let slot = self
            .buffer
            .get_mut(line as usize)
            .ok_or_else(|| format!("Invalid line number {}", line))?;
        *slot = text.chars().take(CHARS_PER_LINE).collect();
        self.render();
        Ok(())
    }
}
