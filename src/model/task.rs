use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::duration::{self, Duration};
use crate::error::{GanttError, Result};

/// Stable identifier of a task, also used as its Mermaid task id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a row is a regular bar or a zero-length milestone marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Task,
    Milestone,
}

/// Progress state shown by Mermaid as a bar style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// Mermaid tag for this status, if any.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Active => Some("active"),
            Self::Done => Some("done"),
        }
    }
}

/// A single task or milestone within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub critical: bool,
    /// Ids emitted as `before <ids>`.
    #[serde(default)]
    pub before: Vec<TaskId>,
    /// Ids emitted as `after <ids>`.
    #[serde(default)]
    pub after: Vec<TaskId>,
    #[serde(default, with = "date_serde")]
    pub start: Option<NaiveDate>,
    #[serde(default, with = "date_serde")]
    pub end: Option<NaiveDate>,
    /// Raw duration token as entered, e.g. `3d`.
    #[serde(default)]
    pub duration: String,
}

impl Task {
    /// Create a new task with a fresh id and no schedule.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            kind: TaskKind::Task,
            status: TaskStatus::None,
            critical: false,
            before: Vec::new(),
            after: Vec::new(),
            start: None,
            end: None,
            duration: String::new(),
        }
    }

    /// Create a new milestone.
    pub fn new_milestone(title: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Milestone,
            ..Self::new(title)
        }
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GanttError::EmptyTitle);
        }
        self.title = title;
        Ok(())
    }

    /// Store a duration token after checking it parses. An empty token is accepted.
    pub fn set_duration(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        token.parse::<Duration>()?;
        self.duration = token;
        Ok(())
    }

    /// Set `end` to `start` advanced by the duration in business days.
    ///
    /// An empty duration is normalized to `0d` first.
    pub fn recalculate_end(&mut self) -> Result<NaiveDate> {
        let start = self
            .start
            .ok_or_else(|| GanttError::MissingStartDate(self.id.clone()))?;
        let parsed: Duration = self.duration.parse()?;
        if self.duration.trim().is_empty() {
            self.duration = "0d".to_string();
        }
        let end = duration::end_date(start, parsed)
            .ok_or_else(|| GanttError::InvalidDuration(self.duration.clone()))?;
        self.end = Some(end);
        Ok(end)
    }

    /// Drop `id` from both dependency lists.
    pub(crate) fn forget(&mut self, id: &TaskId) {
        self.before.retain(|t| t != id);
        self.after.retain(|t| t != id);
    }
}

/// Serde helper for optional dates stored as `YYYY-MM-DD` or `""`.
mod date_serde {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_tasks_get_distinct_ids_and_lists() {
        let mut a = Task::new("a");
        let b = Task::new("b");
        assert_ne!(a.id, b.id);
        a.after.push(b.id.clone());
        assert!(b.after.is_empty());
    }

    #[test]
    fn milestone_constructor_sets_kind() {
        let task = Task::new_milestone("Launch");
        assert!(task.is_milestone());
        assert!(!Task::new("Build").is_milestone());
    }

    #[test]
    fn empty_title_is_rejected_and_kept() {
        let mut task = Task::new("Compile");
        let err = task.set_title("   ").unwrap_err();
        assert!(matches!(err, GanttError::EmptyTitle));
        assert_eq!(task.title, "Compile");
    }

    #[test]
    fn bad_duration_leaves_old_value() {
        let mut task = Task::new("Compile");
        task.set_duration("2d").unwrap();
        assert!(task.set_duration("two days").is_err());
        assert_eq!(task.duration, "2d");
    }

    #[test]
    fn recalculate_end_uses_business_days() {
        let mut task = Task::new("Compile");
        task.start = Some(date("2024-02-01"));
        task.duration = "2d".into();
        assert_eq!(task.recalculate_end().unwrap(), date("2024-02-05"));
        assert_eq!(task.end, Some(date("2024-02-05")));
    }

    #[test]
    fn recalculate_end_normalizes_empty_duration() {
        let mut task = Task::new("Ship");
        task.start = Some(date("2024-01-06"));
        assert_eq!(task.recalculate_end().unwrap(), date("2024-01-08"));
        assert_eq!(task.duration, "0d");
    }

    #[test]
    fn recalculate_end_requires_start() {
        let mut task = Task::new("Ship");
        assert!(matches!(
            task.recalculate_end(),
            Err(GanttError::MissingStartDate(_))
        ));
    }

    #[test]
    fn dates_serialize_as_plain_strings() {
        let mut task = Task::new("Compile");
        task.start = Some(date("2024-02-01"));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["start"], "2024-02-01");
        assert_eq!(value["end"], "");
        assert_eq!(value["type"], "Task");
        assert_eq!(value["status"], "");
    }
}
