use tasklist_model::TaskStats;

use crate::board::Phase;

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position, used to address the row in commands.
    pub index: usize,
    pub label: String,
    pub done: bool,
    pub status: &'static str,
}

/// Immutable snapshot of the board handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub phase: Phase,
    pub rows: Vec<Row>,
    pub stats: TaskStats,
    pub banner: Option<String>,
}

impl Frame {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// A successful fetch returned no tasks.
    pub fn is_empty_state(&self) -> bool {
        self.phase == Phase::Ready && self.rows.is_empty()
    }
}
