use thiserror::Error;

use crate::model::TaskId;

/// Broad category of a [`GanttError`], one per observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced task or section is absent from its expected parent.
    NotFound,
    /// An edit was rejected; the document is unchanged.
    Validation,
    /// Persisted input does not match the document shape.
    Deserialization,
    /// Reading or writing a document file failed.
    Io,
}

/// Errors produced while editing, scheduling, or loading a Gantt document.
#[derive(Debug, Error)]
pub enum GanttError {
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("section {0} not found")]
    SectionNotFound(usize),

    #[error("task {0} does not belong to section {1:?}")]
    ReferenceNotInSection(TaskId, String),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid duration {0:?} (expected a number followed by d, w, m or y)")]
    InvalidDuration(String),

    #[error("unsupported axis format {0:?}")]
    InvalidAxisFormat(String),

    #[error("unsupported tick interval {0:?}")]
    InvalidTickInterval(String),

    #[error("invalid color {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("task {0} has no start date")]
    MissingStartDate(TaskId),

    #[error("task {0} cannot depend on itself")]
    SelfReference(TaskId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a {expected} object, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("duplicate task id {0}")]
    DuplicateTaskId(TaskId),

    #[error("task {task} references unknown task {reference}")]
    DanglingReference { task: TaskId, reference: TaskId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GanttError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::SectionNotFound(_) | Self::ReferenceNotInSection(..) => {
                ErrorKind::NotFound
            }
            Self::EmptyTitle
            | Self::InvalidDuration(_)
            | Self::InvalidAxisFormat(_)
            | Self::InvalidTickInterval(_)
            | Self::InvalidColor(_)
            | Self::MissingStartDate(_)
            | Self::SelfReference(_) => ErrorKind::Validation,
            Self::Json(_)
            | Self::UnexpectedShape { .. }
            | Self::DuplicateTaskId(_)
            | Self::DanglingReference { .. } => ErrorKind::Deserialization,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, GanttError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_taxonomy() {
        assert_eq!(GanttError::SectionNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(GanttError::EmptyTitle.kind(), ErrorKind::Validation);
        assert_eq!(
            GanttError::InvalidDuration("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            GanttError::InvalidTickInterval("1hour".into()).kind(),
            ErrorKind::Validation
        );
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(GanttError::from(json).kind(), ErrorKind::Deserialization);
    }

    #[test]
    fn messages_name_the_offender() {
        let err = GanttError::InvalidDuration("3q".into());
        assert!(err.to_string().contains("\"3q\""));
    }
}
