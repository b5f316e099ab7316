//! Coordinator handing one indicator around a group of concurrent tasks.
//!
//! Each registered task gets a [`TaskHandle`] wrapping its own
//! [`IndicatorProxy`]. The multiplexer owns the ownership protocol: at most
//! one proxy is current, and a proxy is flushed and has its text refreshed
//! the moment it is promoted. Transfers run under the multiplexer's state
//! lock, and each proxy sits behind its own lock, always taken after the
//! state lock. A task writing through its proxy therefore never interleaves
//! with a transfer.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rayon::prelude::*;

use super::error::IndicatorError;
use super::proxy::IndicatorProxy;
use super::SharedIndicator;
use crate::color::{alert_percent_color, DEFAULT_END_HUE, DEFAULT_START_HUE};

/// Identifier of a registered task.
pub type TaskId = u64;

/// Shares one indicator between concurrently running tasks.
pub struct Multiplexer {
    indicator: SharedIndicator,
    state: Mutex<MuxState>,
}

#[derive(Default)]
struct MuxState {
    next_id: TaskId,
    tasks: Vec<Slot>,
    current: Option<TaskId>,
    completed: usize,
    abandoned: usize,
}

struct Slot {
    id: TaskId,
    proxy: Arc<Mutex<IndicatorProxy>>,
}

impl MuxState {
    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|slot| slot.id == id)
    }

    /// Demote the current proxy and promote `id`.
    fn promote(&mut self, id: TaskId) -> Result<(), IndicatorError> {
        if self.current == Some(id) {
            return Ok(());
        }
        let Some(idx) = self.position(id) else {
            return Ok(());
        };

        if let Some(current) = self.current.take() {
            if let Some(pos) = self.position(current) {
                lock(&self.tasks[pos].proxy).set_current(false);
            }
        }

        self.current = Some(id);
        tracing::trace!(task = id, "promoted task");
        let mut proxy = lock(&self.tasks[idx].proxy);
        proxy.set_current(true);
        let flushed = proxy.flush();
        proxy.refresh();
        flushed
    }
}

impl Multiplexer {
    pub fn new(indicator: SharedIndicator) -> Arc<Self> {
        Arc::new(Self {
            indicator,
            state: Mutex::new(MuxState::default()),
        })
    }

    pub fn indicator(&self) -> &SharedIndicator {
        &self.indicator
    }

    /// Register a task whose status text is labelled with `label`.
    ///
    /// The first task registered while no task is current takes the
    /// display straight away.
    pub fn register(self: &Arc<Self>, label: impl Into<String>) -> TaskHandle {
        let label = label.into();
        let proxy = Arc::new(Mutex::new(IndicatorProxy::with_prefix(
            Arc::clone(&self.indicator),
            label.as_str(),
        )));

        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.push(Slot {
            id,
            proxy: Arc::clone(&proxy),
        });
        tracing::debug!(task = id, label = %label, "registered task");

        if state.current.is_none() {
            if let Err(e) = state.promote(id) {
                tracing::warn!(task = id, error = %e, "failed to promote task");
            }
        }

        TaskHandle {
            id,
            proxy,
            mux: Arc::clone(self),
            finished: false,
        }
    }

    /// Task currently owning the display.
    pub fn current(&self) -> Option<TaskId> {
        self.state().current
    }

    /// Number of registered tasks that have not finished yet.
    pub fn active(&self) -> usize {
        self.state().tasks.len()
    }

    /// Hand the display to the next live task, round-robin.
    ///
    /// Returns the task that is current afterwards.
    pub fn rotate(&self) -> Result<Option<TaskId>, IndicatorError> {
        let mut state = self.state();
        if state.tasks.is_empty() {
            return Ok(None);
        }
        let next = match state.current.and_then(|id| state.position(id)) {
            Some(pos) => (pos + 1) % state.tasks.len(),
            None => 0,
        };
        let id = state.tasks[next].id;
        state.promote(id)?;
        Ok(Some(id))
    }

    /// Hand the display to a specific task.
    pub fn promote(&self, id: TaskId) -> Result<(), IndicatorError> {
        self.state().promote(id)
    }

    /// Rotate ownership from a background thread every `interval`.
    pub fn rotate_every(self: &Arc<Self>, interval: Duration) -> Rotator {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let mux = Arc::clone(self);
        let handle = thread::spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = stop_rx.recv_timeout(interval) {
                if let Err(e) = mux.rotate() {
                    tracing::warn!(error = %e, "failed to rotate status display");
                }
            }
        });
        Rotator {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Run `jobs` in parallel, one registered task per job.
    ///
    /// A job returning `Ok` counts as completed, one returning `Err` as
    /// abandoned. Results come back in the order of `jobs`.
    pub fn run_all<T, E, F>(self: &Arc<Self>, jobs: Vec<(String, F)>) -> Vec<Result<T, E>>
    where
        F: FnOnce(&TaskHandle) -> Result<T, E> + Send,
        T: Send,
        E: Send,
    {
        let handles: Vec<TaskHandle> = jobs
            .iter()
            .map(|(label, _)| self.register(label.as_str()))
            .collect();

        jobs.into_par_iter()
            .zip(handles.into_par_iter())
            .map(|((_, job), handle)| {
                let result = job(&handle);
                if result.is_ok() {
                    if let Err(e) = handle.complete() {
                        tracing::warn!(error = %e, "failed to flush finished task");
                    }
                }
                result
            })
            .collect()
    }

    /// `"{done}/{total} tasks completed"`, colored from red (none done) to
    /// green (all done).
    pub fn summary(&self) -> String {
        let state = self.state();
        let total = state.completed + state.abandoned + state.tasks.len();
        let percent = if total == 0 {
            100.0
        } else {
            state.completed as f64 * 100.0 / total as f64
        };
        let color = alert_percent_color(percent, DEFAULT_START_HUE, DEFAULT_END_HUE);
        color.paint(&format!("{}/{} tasks completed", state.completed, total))
    }

    /// Counts of `(completed, abandoned)` tasks so far.
    pub fn outcomes(&self) -> (usize, usize) {
        let state = self.state();
        (state.completed, state.abandoned)
    }

    fn release(&self, id: TaskId, completed: bool) -> Result<(), IndicatorError> {
        let mut state = self.state();
        let Some(pos) = state.position(id) else {
            return Ok(());
        };
        let slot = state.tasks.remove(pos);
        if completed {
            state.completed += 1;
        } else {
            state.abandoned += 1;
        }
        tracing::debug!(task = id, completed, "released task");

        let flushed = {
            let mut proxy = lock(&slot.proxy);
            proxy.set_current(false);
            proxy.flush()
        };

        if state.current == Some(id) {
            state.current = None;
            if !state.tasks.is_empty() {
                let next = state.tasks[pos % state.tasks.len()].id;
                if let Err(e) = state.promote(next) {
                    tracing::warn!(task = next, error = %e, "failed to promote task");
                }
            }
        }
        flushed
    }

    fn state(&self) -> MutexGuard<'_, MuxState> {
        lock(&self.state)
    }
}

/// A task's handle on the shared display.
///
/// Dropping the handle without calling [`TaskHandle::complete`] counts the
/// task as abandoned. Either way its pending lines are flushed.
pub struct TaskHandle {
    id: TaskId,
    proxy: Arc<Mutex<IndicatorProxy>>,
    mux: Arc<Multiplexer>,
    finished: bool,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Write a line, shown immediately if this task owns the display.
    pub fn write(&self, line: impl Into<String>) -> Result<(), IndicatorError> {
        lock(&self.proxy).write(line)
    }

    /// Update this task's status text.
    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.proxy).set_text(text);
    }

    pub fn is_current(&self) -> bool {
        lock(&self.proxy).is_current()
    }

    /// Lines still waiting for this task to own the display.
    pub fn pending(&self) -> usize {
        lock(&self.proxy).pending().len()
    }

    /// Mark the task as completed and flush its pending lines.
    pub fn complete(mut self) -> Result<(), IndicatorError> {
        self.finished = true;
        self.mux.release(self.id, true)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.mux.release(self.id, false) {
            tracing::warn!(task = self.id, error = %e, "failed to flush abandoned task");
        }
    }
}

/// Background rotation started by [`Multiplexer::rotate_every`]. Stops when
/// dropped.
pub struct Rotator {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Rotator {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("rotation thread panicked");
            }
        }
    }
}

impl Drop for Rotator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
