mod lenient;

mod task_id;
pub use task_id::TaskId;

mod task;
pub use task::{NO_TITLE, Task, normalize_title};

mod task_patch;
pub use task_patch::{NewTask, TaskPatch};

mod task_stats;
pub use task_stats::TaskStats;

mod service;
pub use service::{Health, Version};
