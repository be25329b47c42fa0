use super::Task;

/// Aggregate counters shown above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub open: usize,
    pub done: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let done = tasks.iter().filter(|t| t.is_done).count();
        Self {
            total: tasks.len(),
            open: tasks.len() - done,
            done,
        }
    }
}
