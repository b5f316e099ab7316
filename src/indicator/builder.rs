//! Construction of the process-wide indicator.

use std::io::{self, Write};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::IndicatorError;
use super::null::NullIndicator;
use super::status::StatusIndicator;
use super::style::{self, SpinnerStyle};
use super::SharedIndicator;
use crate::config::SpinnerConfig;

/// Text shown until the first task sets its own.
pub const DEFAULT_TEXT: &str = "Spinning up...";

/// Builds either a [`StatusIndicator`] or a [`NullIndicator`] from the
/// spinner configuration.
///
/// # Example
///
/// ```no_run
/// use vmwaretool::config::SpinnerConfig;
/// use vmwaretool::indicator::{Indicator, IndicatorBuilder};
///
/// let config = SpinnerConfig::default();
/// let indicator = IndicatorBuilder::new(&config)
///     .text("Connecting to vCenter")
///     .build(&mut rand::thread_rng())?;
/// indicator.stop();
/// # Ok::<(), vmwaretool::indicator::IndicatorError>(())
/// ```
pub struct IndicatorBuilder<'a> {
    config: &'a SpinnerConfig,
    disabled: bool,
    text: String,
    out: Option<Box<dyn Write + Send>>,
    width: Option<usize>,
    animate: bool,
}

impl<'a> IndicatorBuilder<'a> {
    pub fn new(config: &'a SpinnerConfig) -> Self {
        Self {
            config,
            disabled: false,
            text: DEFAULT_TEXT.to_string(),
            out: None,
            width: None,
            animate: true,
        }
    }

    /// Force the no-op indicator regardless of configuration.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Initial status text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Draw to `out` instead of stdout. The terminal width is unknown for a
    /// custom writer unless set with [`Self::width`].
    pub fn writer(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = Some(out);
        self
    }

    /// Terminal width in columns; longer status lines are truncated.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Whether a background thread advances the frames (default on).
    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Whether [`Self::build`] will produce an animated indicator.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && !self.disabled
    }

    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<SharedIndicator, IndicatorError> {
        if !self.is_enabled() {
            tracing::debug!("spinner disabled");
            let indicator = match self.out {
                Some(out) => NullIndicator::with_writer(out),
                None => NullIndicator::new(),
            };
            return Ok(Arc::new(indicator));
        }

        let style = select_style(self.config, rng)?;
        tracing::debug!(style = style.name, "starting spinner");

        let indicator = match self.out {
            Some(out) => StatusIndicator::with_writer(style, self.text, out, self.width),
            None => {
                let width = self
                    .width
                    .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize));
                StatusIndicator::with_writer(style, self.text, Box::new(io::stdout()), width)
            }
        };
        if self.animate {
            indicator.animate();
        }
        Ok(Arc::new(indicator))
    }
}

/// Pick the animation style for an enabled spinner.
///
/// With `random` set, one of the configured styles is drawn with `rng`;
/// otherwise the configured `style` is used. Every configured name is
/// checked against the catalogue either way.
pub fn select_style<R: Rng + ?Sized>(
    config: &SpinnerConfig,
    rng: &mut R,
) -> Result<&'static SpinnerStyle, IndicatorError> {
    let styles = style::verify_styles(&config.styles)?;
    if config.random {
        styles.choose(rng).copied().ok_or(IndicatorError::NoStyles)
    } else {
        style::lookup(&config.style)
    }
}
