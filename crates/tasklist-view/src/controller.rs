use std::sync::Arc;

use tracing::{debug, warn};

use tasklist_client::{ClientError, TaskApi};
use tasklist_model::normalize_title;

use crate::{board::Board, config::ViewConfig, render::Render};

/// User-facing operation, used to pick the banner text when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Add,
    Update,
    Delete,
}

impl Action {
    /// Banner text for a failed `self`.
    ///
    /// Server rejections and transport/decoding failures get different wording.
    pub fn failure_message(self, err: &ClientError) -> &'static str {
        if matches!(err, ClientError::EmptyTitle) {
            return "Please enter a task title.";
        }
        let rejected = err.is_status();
        match (self, rejected) {
            (Action::Load, true) => "Failed to load tasks.",
            (Action::Load, false) => "Error loading tasks.",
            (Action::Add, true) => "Failed to add task. Try again.",
            (Action::Add, false) => "Error while adding task.",
            (Action::Update, true) => "Failed to update task.",
            (Action::Update, false) => "Error while updating task.",
            (Action::Delete, true) => "Failed to delete task.",
            (Action::Delete, false) => "Error while deleting task.",
        }
    }
}

/// Wires user actions to API calls and keeps the board rendered.
///
/// Every successful mutation is followed by a full re-fetch; there is no local
/// patching of the list.
pub struct Controller<R> {
    api: Arc<dyn TaskApi>,
    board: Board,
    renderer: R,
    config: ViewConfig,
}

impl<R: Render> Controller<R> {
    pub fn new(api: Arc<dyn TaskApi>, renderer: R, config: ViewConfig) -> Self {
        Self {
            api,
            board: Board::new(),
            renderer,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render the current board.
    pub fn render(&mut self) {
        let frame = self.board.frame();
        if let Err(e) = self.renderer.render(&frame) {
            warn!(error = %e, "render failed");
        }
    }

    /// Fetch the list and render it. Returns `true` on success.
    pub async fn load(&mut self) -> bool {
        self.board.begin_loading();
        self.render();

        let ok = match self.api.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "board refreshed");
                self.board.finish_loading(tasks);
                self.board.clear_banner();
                true
            }
            Err(e) => {
                self.board.fail_loading();
                self.report(Action::Load, &e);
                false
            }
        };
        self.render();
        ok
    }

    /// Create a task from user input, then reload.
    ///
    /// Blank input only shows a banner; nothing is sent.
    pub async fn add(&mut self, text: &str) -> bool {
        let Some(title) = normalize_title(text) else {
            self.report(Action::Add, &ClientError::EmptyTitle);
            self.render();
            return false;
        };

        match self.api.create_task(&title).await {
            Ok(task) => {
                debug!(id = %task.id, "task added");
                self.board.clear_banner();
                self.load().await
            }
            Err(e) => {
                self.report(Action::Add, &e);
                self.render();
                false
            }
        }
    }

    /// Invert the completion flag of the task on 1-based row `row`, then reload.
    pub async fn toggle(&mut self, row: usize) -> bool {
        let Some(task) = self.lookup(row) else {
            return false;
        };

        match self.api.toggle_task(&task).await {
            Ok(updated) => {
                debug!(id = %updated.id, is_done = updated.is_done, "task toggled");
                self.board.clear_banner();
                self.load().await
            }
            Err(e) => {
                self.report(Action::Update, &e);
                self.render();
                false
            }
        }
    }

    /// Delete the task on 1-based row `row`, then reload.
    pub async fn delete(&mut self, row: usize) -> bool {
        let Some(task) = self.lookup(row) else {
            return false;
        };

        match self.api.delete_task(&task.id).await {
            Ok(()) => {
                debug!(id = %task.id, "task deleted");
                self.board.clear_banner();
                self.load().await
            }
            Err(e) => {
                self.report(Action::Delete, &e);
                self.render();
                false
            }
        }
    }

    /// Backend version, or `None` after showing a banner.
    pub async fn version(&mut self) -> Option<String> {
        match self.api.version().await {
            Ok(v) => Some(v.version),
            Err(e) => {
                warn!(error = %e, "version request failed");
                self.board
                    .show_error("Error fetching server version.", self.config.error_ttl);
                self.render();
                None
            }
        }
    }

    /// Whether the backend reports itself healthy, or `None` after showing a banner.
    pub async fn health(&mut self) -> Option<bool> {
        match self.api.health().await {
            Ok(h) => Some(h.is_healthy()),
            Err(e) => {
                warn!(error = %e, "health request failed");
                self.board
                    .show_error("Error checking server health.", self.config.error_ttl);
                self.render();
                None
            }
        }
    }

    fn lookup(&mut self, row: usize) -> Option<tasklist_model::Task> {
        let task = self.board.task_at(row);
        if task.is_none() {
            self.board
                .show_error(format!("No task #{row}."), self.config.error_ttl);
            self.render();
        }
        task
    }

    fn report(&self, action: Action, err: &ClientError) {
        warn!(?action, error = %err, "request failed");
        self.board
            .show_error(action.failure_message(err), self.config.error_ttl);
    }
}
