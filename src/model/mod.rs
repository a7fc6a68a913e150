pub mod duration;
pub mod gantt;
pub mod section;
pub mod task;

pub use duration::Duration;
pub use gantt::{DocumentId, Gantt, ThemeColor};
pub use section::Section;
pub use task::{Task, TaskId, TaskKind, TaskStatus};
