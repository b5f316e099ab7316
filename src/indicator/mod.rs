//! Terminal status indicator and the multiplexer sharing it between tasks.
//!
//! One [`StatusIndicator`] owns the terminal line with the spinner. When
//! animations are disabled a [`NullIndicator`] takes its place; both sit
//! behind the [`Indicator`] trait so callers never branch on which one is
//! active. Concurrent tasks never touch the indicator directly: each gets an
//! [`IndicatorProxy`], and a [`Multiplexer`] decides which proxy currently
//! owns the display.

mod builder;
pub mod error;
mod multiplexer;
mod null;
mod proxy;
mod status;
pub mod style;

pub use builder::IndicatorBuilder;
pub use error::IndicatorError;
pub use multiplexer::{Multiplexer, Rotator, TaskHandle, TaskId};
pub use null::NullIndicator;
pub use proxy::IndicatorProxy;
pub use status::StatusIndicator;
pub use style::SpinnerStyle;

use std::sync::Arc;

/// An indicator shared between a coordinator and its proxies.
pub type SharedIndicator = Arc<dyn Indicator>;

/// Capabilities shared by the real spinner and its no-op substitute.
pub trait Indicator: Send + Sync {
    /// Replace the status text shown next to the animation.
    fn set_text(&self, text: &str);

    /// Print a line above the animation.
    fn write(&self, line: &str) -> Result<(), IndicatorError>;

    /// Suspend the animation. Calls nest; see [`Indicator::show`].
    fn hide(&self);

    /// Undo one [`Indicator::hide`]. The animation resumes once every hide
    /// has been matched.
    fn show(&self);

    /// Stop the animation for good and clear its line.
    fn stop(&self);
}

/// Scoped hiding for every indicator, trait objects included.
pub trait IndicatorExt: Indicator {
    /// Hide the animation until the returned guard is dropped.
    fn hidden(&self) -> Hidden<'_, Self> {
        Hidden::new(self)
    }
}

impl<I: Indicator + ?Sized> IndicatorExt for I {}

/// Scope during which an indicator's animation is suspended.
///
/// The animation is resumed when the guard drops, which also happens when
/// the scope is left through `?` or a panic.
#[must_use = "the animation resumes as soon as the guard is dropped"]
pub struct Hidden<'a, I: Indicator + ?Sized> {
    indicator: &'a I,
}

impl<'a, I: Indicator + ?Sized> Hidden<'a, I> {
    pub fn new(indicator: &'a I) -> Self {
        indicator.hide();
        Self { indicator }
    }
}

impl<I: Indicator + ?Sized> Drop for Hidden<'_, I> {
    fn drop(&mut self) {
        self.indicator.show();
    }
}
