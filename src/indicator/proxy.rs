//! Per-task view onto a shared indicator.

use super::error::IndicatorError;
use super::SharedIndicator;

/// Lets one of several concurrent tasks act as if it owned the indicator.
///
/// Only the proxy marked current talks to the indicator. Every other proxy
/// keeps its written lines in order until it becomes current or is flushed
/// by its coordinator, and remembers its last status text so it can be shown
/// as soon as the proxy takes over. Lines still pending when the proxy is
/// dropped are flushed then.
pub struct IndicatorProxy {
    indicator: SharedIndicator,
    prefix: Option<String>,
    current: bool,
    pending: Vec<String>,
    text: String,
}

impl IndicatorProxy {
    pub fn new(indicator: SharedIndicator) -> Self {
        Self {
            indicator,
            prefix: None,
            current: false,
            pending: Vec::new(),
            text: String::new(),
        }
    }

    /// Proxy whose status text is shown as `"{prefix}: {text}"`.
    pub fn with_prefix(indicator: SharedIndicator, prefix: impl Into<String>) -> Self {
        let mut proxy = Self::new(indicator);
        proxy.prefix = Some(prefix.into());
        proxy
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    /// Grant or revoke ownership of the indicator.
    ///
    /// Ownership is handed out by a coordinator, which must [`flush`] a
    /// newly promoted proxy before anything else is written through it.
    ///
    /// [`flush`]: IndicatorProxy::flush
    pub fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    /// Last status text set, whether or not it was shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines waiting to be written, oldest first.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Write a line, or queue it while this proxy is not current.
    ///
    /// A line that could not be written is queued so a later flush can
    /// retry it.
    pub fn write(&mut self, line: impl Into<String>) -> Result<(), IndicatorError> {
        let line = line.into();
        if !self.current {
            self.pending.push(line);
            return Ok(());
        }

        if let Err(e) = self.flush() {
            self.pending.push(line);
            return Err(e);
        }
        if let Err(e) = self.indicator.write(&line) {
            self.pending.push(line);
            return Err(e);
        }
        Ok(())
    }

    /// Set the status text, showing it right away if this proxy is current.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
        if self.current {
            self.indicator.set_text(&self.display_text());
        }
    }

    /// Push the stored status text to the indicator.
    pub fn refresh(&self) {
        self.indicator.set_text(&self.display_text());
    }

    /// Write all pending lines to the indicator as one block.
    ///
    /// Nothing is written when no lines are pending. On error the pending
    /// lines are kept.
    pub fn flush(&mut self) -> Result<(), IndicatorError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.indicator.write(&self.pending.join("\n"))?;
        self.pending.clear();
        Ok(())
    }

    fn display_text(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}: {}", prefix, self.text),
            None => self.text.clone(),
        }
    }
}

impl Drop for IndicatorProxy {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(
                error = %e,
                lines = self.pending.len(),
                "failed to flush status lines"
            );
            for line in &self.pending {
                tracing::warn!("{}", line);
            }
        }
    }
}
