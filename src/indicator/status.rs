//! The real terminal spinner.

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use super::error::IndicatorError;
use super::style::SpinnerStyle;
use super::Indicator;

/// Animated spinner followed by a status text, drawn on a single terminal
/// line.
///
/// Lines written through [`Indicator::write`] are printed above the spinner
/// line, which is redrawn right after. Hiding nests: the spinner comes back
/// once every `hide` has been matched by a `show`.
pub struct StatusIndicator {
    shared: Arc<Shared>,
    ticker: Mutex<Option<Ticker>>,
}

struct Shared {
    style: &'static SpinnerStyle,
    state: Mutex<State>,
}

struct State {
    text: String,
    tick: usize,
    hidden: usize,
    stopped: bool,
    width: Option<usize>,
    out: Box<dyn Write + Send>,
}

struct Ticker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl StatusIndicator {
    /// Spinner drawing to `out`. Frames only advance after [`Self::animate`].
    ///
    /// `width` is the terminal width; longer status lines are truncated so
    /// they never wrap.
    pub fn with_writer(
        style: &'static SpinnerStyle,
        text: impl Into<String>,
        out: Box<dyn Write + Send>,
        width: Option<usize>,
    ) -> Self {
        let indicator = Self {
            shared: Arc::new(Shared {
                style,
                state: Mutex::new(State {
                    text: text.into(),
                    tick: 0,
                    hidden: 0,
                    stopped: false,
                    width,
                    out,
                }),
            }),
            ticker: Mutex::new(None),
        };
        indicator.shared.redraw();
        indicator
    }

    /// Start the background thread advancing frames. No-op when already
    /// animating or stopped.
    pub fn animate(&self) {
        let mut ticker = lock(&self.ticker);
        if ticker.is_some() || self.shared.state().stopped {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let shared = Arc::clone(&self.shared);
        let interval = shared.style.interval();
        let handle = thread::spawn(move || {
            // Dropping the sender disconnects the channel and ends the loop
            while let Err(RecvTimeoutError::Timeout) = stop_rx.recv_timeout(interval) {
                shared.advance();
            }
        });
        *ticker = Some(Ticker { stop_tx, handle });
    }

    pub fn style(&self) -> &'static SpinnerStyle {
        self.shared.style
    }

    pub fn text(&self) -> String {
        self.shared.state().text.clone()
    }

    /// Whether the spinner line is currently drawn.
    pub fn is_rendering(&self) -> bool {
        let state = self.shared.state();
        !state.stopped && state.hidden == 0
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.state().stopped
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    fn advance(&self) {
        let mut state = self.state();
        if state.stopped || state.hidden > 0 {
            return;
        }
        state.tick = state.tick.wrapping_add(1);
        if let Err(e) = state.render(self.style) {
            tracing::debug!(error = %e, "failed to draw spinner frame");
        }
    }

    fn redraw(&self) {
        let mut state = self.state();
        if state.is_visible() {
            if let Err(e) = state.render(self.style) {
                tracing::debug!(error = %e, "failed to draw spinner");
            }
        }
    }
}

impl State {
    fn is_visible(&self) -> bool {
        !self.stopped && self.hidden == 0
    }

    fn render(&mut self, style: &SpinnerStyle) -> io::Result<()> {
        let line = format!("{} {}", style.frame(self.tick), self.text);
        let line = truncate_to_width(&line, self.width.map(|w| w.saturating_sub(1)));
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        self.out.flush()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.out.flush()
    }
}

impl Indicator for StatusIndicator {
    fn set_text(&self, text: &str) {
        self.shared.state().text = text.to_string();
        self.shared.redraw();
    }

    fn write(&self, line: &str) -> Result<(), IndicatorError> {
        let mut state = self.shared.state();
        let visible = state.is_visible();
        if visible {
            state.clear_line()?;
        }
        writeln!(state.out, "{}", line)?;
        if visible {
            state.render(self.shared.style)?;
        } else {
            state.out.flush()?;
        }
        Ok(())
    }

    fn hide(&self) {
        let mut state = self.shared.state();
        if state.is_visible() {
            if let Err(e) = state.clear_line() {
                tracing::debug!(error = %e, "failed to clear spinner line");
            }
        }
        state.hidden += 1;
    }

    fn show(&self) {
        {
            let mut state = self.shared.state();
            state.hidden = state.hidden.saturating_sub(1);
        }
        self.shared.redraw();
    }

    fn stop(&self) {
        {
            let mut state = self.shared.state();
            if state.stopped {
                return;
            }
            state.stopped = true;
            if let Err(e) = state.clear_line() {
                tracing::debug!(error = %e, "failed to clear spinner line");
            }
        }

        if let Some(Ticker { stop_tx, handle }) = lock(&self.ticker).take() {
            drop(stop_tx);
            if handle.join().is_err() {
                tracing::warn!("spinner thread panicked");
            }
        }
    }
}

impl Drop for StatusIndicator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lock a mutex, recovering the data if a panicking thread poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cut `line` so it occupies at most `max` terminal columns.
fn truncate_to_width(line: &str, max: Option<usize>) -> Cow<'_, str> {
    let Some(max) = max else {
        return Cow::Borrowed(line);
    };

    let mut used = 0;
    for (idx, ch) in line.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > max {
            return Cow::Owned(line[..idx].to_string());
        }
    }
    Cow::Borrowed(line)
}
