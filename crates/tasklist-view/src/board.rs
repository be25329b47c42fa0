use std::{
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use tokio_util::sync::CancellationToken;
use tracing::trace;

use tasklist_model::{Task, TaskStats};

use crate::frame::{Frame, Row};

/// Lifecycle of the list: `Idle -> Loading -> Ready | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet.
    Idle,
    /// A list request is in flight.
    Loading,
    /// The last list request succeeded.
    Ready,
    /// The last list request failed; the list is cleared.
    Failed,
}

#[derive(Debug, Clone)]
struct Banner {
    message: String,
    seq: u64,
}

/// Client-side view state.
///
/// Cloning yields another handle to the same state, which is how the banner
/// dismiss timer reaches it.
#[derive(Clone)]
pub struct Board {
    inner: Arc<RwLock<BoardInner>>,
}

struct BoardInner {
    tasks: Vec<Task>,
    phase: Phase,
    banner: Option<Banner>,
    /// Incremented for every banner shown; a timer only clears its own banner.
    banner_seq: u64,
    /// Cancels the dismiss timer of the current banner.
    dismiss: Option<CancellationToken>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoardInner {
                tasks: Vec::new(),
                phase: Phase::Idle,
                banner: None,
                banner_seq: 0,
                dismiss: None,
            })),
        }
    }

    pub fn phase(&self) -> Phase {
        self.read().phase
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Current banner text, if any.
    pub fn banner(&self) -> Option<String> {
        self.read().banner.as_ref().map(|b| b.message.clone())
    }

    /// Task shown on 1-based row `row`.
    pub fn task_at(&self, row: usize) -> Option<Task> {
        let inner = self.read();
        row.checked_sub(1).and_then(|i| inner.tasks.get(i)).cloned()
    }

    pub fn begin_loading(&self) {
        self.write().phase = Phase::Loading;
    }

    /// Replace the list with a fresh fetch.
    pub fn finish_loading(&self, tasks: Vec<Task>) {
        let mut inner = self.write();
        inner.tasks = tasks;
        inner.phase = Phase::Ready;
    }

    /// Clear the list after a failed fetch.
    pub fn fail_loading(&self) {
        let mut inner = self.write();
        inner.tasks.clear();
        inner.phase = Phase::Failed;
    }

    /// Show `message` as the only banner, replacing any previous one.
    ///
    /// With a `ttl` the banner disappears on its own; this must then be called
    /// from within a tokio runtime.
    pub fn show_error(&self, message: impl Into<String>, ttl: Option<Duration>) {
        let token = CancellationToken::new();
        let seq = {
            let mut inner = self.write();
            if let Some(previous) = inner.dismiss.replace(token.clone()) {
                previous.cancel();
            }
            inner.banner_seq += 1;
            let seq = inner.banner_seq;
            inner.banner = Some(Banner {
                message: message.into(),
                seq,
            });
            seq
        };

        let Some(ttl) = ttl else {
            return;
        };
        let board = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(ttl) => board.dismiss(seq),
            }
        });
    }

    pub fn clear_banner(&self) {
        let mut inner = self.write();
        if let Some(token) = inner.dismiss.take() {
            token.cancel();
        }
        inner.banner = None;
    }

    fn dismiss(&self, seq: u64) {
        let mut inner = self.write();
        if inner.banner.as_ref().is_some_and(|b| b.seq == seq) {
            trace!(seq, "banner dismissed");
            inner.banner = None;
            inner.dismiss = None;
        }
    }

    /// Snapshot for renderers.
    pub fn frame(&self) -> Frame {
        let inner = self.read();
        let rows = inner
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| Row {
                index: i + 1,
                label: task.label().to_string(),
                done: task.is_done,
                status: task.status_label(),
            })
            .collect();

        Frame {
            phase: inner.phase,
            rows,
            stats: TaskStats::from_tasks(&inner.tasks),
            banner: inner.banner.as_ref().map(|b| b.message.clone()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
