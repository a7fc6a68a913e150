//! Build Gantt chart documents and render them as Mermaid diagram text.
//!
//! - [`model`]: tasks, swimlanes, the document and business-day scheduling.
//! - [`render`]: the Mermaid `gantt` emitter and its front matter.
//! - [`io`]: JSON persistence with tagged decoding.
//! - [`session`]: per-user editing sessions and their registry.

pub mod error;
pub mod io;
pub mod model;
pub mod render;
pub mod session;

pub use error::{ErrorKind, GanttError, Result};
pub use model::{DocumentId, Gantt, Section, Task, TaskId, TaskKind, TaskStatus, ThemeColor};
pub use session::{Session, SessionId, SessionStore};
