//! No-op indicator used when animations are disabled.

use std::io::{self, Write};
use std::sync::Mutex;

use super::error::IndicatorError;
use super::Indicator;

/// Stand-in for [`super::StatusIndicator`] that draws nothing.
///
/// Written lines go straight to the output, text is only stored and hiding
/// does nothing. None of its methods ever fail.
pub struct NullIndicator {
    text: Mutex<String>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl NullIndicator {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            text: Mutex::new(String::new()),
            out: Mutex::new(out),
        }
    }

    pub fn text(&self) -> String {
        match self.text.lock() {
            Ok(text) => text.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for NullIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for NullIndicator {
    fn set_text(&self, text: &str) {
        if let Ok(mut current) = self.text.lock() {
            *current = text.to_string();
        }
    }

    fn write(&self, line: &str) -> Result<(), IndicatorError> {
        if let Ok(mut out) = self.out.lock() {
            // Output errors are ignored
            let _ = writeln!(out, "{}", line).and_then(|_| out.flush());
        }
        Ok(())
    }

    fn hide(&self) {}

    fn show(&self) {}

    fn stop(&self) {}
}
