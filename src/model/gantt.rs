use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::section::Section;
use super::task::{Task, TaskId};
use crate::error::{GanttError, Result};

pub const DEFAULT_AXIS_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TICK_INTERVAL: &str = "auto";

/// Axis label formats offered by the editor.
pub const AXIS_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%m-%Y", "%m"];
/// Tick intervals offered by the editor.
pub const TICK_INTERVALS: [&str; 4] = ["auto", "1day", "1week", "1month"];

/// Opaque document identifier; new documents get a UUIDv4 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the four theme colors carried by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    /// First swimlane background.
    Section0,
    EvenSection,
    OddSection,
    Task,
}

/// A Gantt document: titled, ordered swimlanes plus presentation options.
///
/// Every option has a default, so a fresh document renders as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gantt {
    pub id: DocumentId,
    pub title: String,
    pub sections: Vec<Section>,
    pub show_weekends: bool,
    pub show_title: bool,
    pub axis_format: String,
    pub tick_interval: String,
    pub show_today: bool,
    pub section0bgcolor: String,
    pub even_sectionbgcolor: String,
    pub odd_sectionbgcolor: String,
    pub taskbgcolor: String,
}

impl Default for Gantt {
    fn default() -> Self {
        Self {
            id: DocumentId::new(),
            title: String::new(),
            sections: Vec::new(),
            show_weekends: false,
            show_title: false,
            axis_format: DEFAULT_AXIS_FORMAT.to_string(),
            tick_interval: DEFAULT_TICK_INTERVAL.to_string(),
            show_today: true,
            section0bgcolor: "#85A0F9".to_string(),
            even_sectionbgcolor: "#26EFE9".to_string(),
            odd_sectionbgcolor: "#2F78C4".to_string(),
            taskbgcolor: "#fafa05".to_string(),
        }
    }
}

impl Gantt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GanttError::EmptyTitle);
        }
        self.title = title;
        Ok(())
    }

    /// Set the axis label format; only [`AXIS_FORMATS`] are accepted.
    pub fn set_axis_format(&mut self, format: &str) -> Result<()> {
        if !AXIS_FORMATS.contains(&format) {
            return Err(GanttError::InvalidAxisFormat(format.to_string()));
        }
        self.axis_format = format.to_string();
        Ok(())
    }

    /// Set the tick interval; only [`TICK_INTERVALS`] are accepted.
    pub fn set_tick_interval(&mut self, interval: &str) -> Result<()> {
        if !TICK_INTERVALS.contains(&interval) {
            return Err(GanttError::InvalidTickInterval(interval.to_string()));
        }
        self.tick_interval = interval.to_string();
        Ok(())
    }

    /// Set a theme color given as `#rgb` or `#rrggbb`.
    pub fn set_color(&mut self, slot: ThemeColor, color: &str) -> Result<()> {
        let digits = color.strip_prefix('#').unwrap_or_default();
        let valid = matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !valid {
            return Err(GanttError::InvalidColor(color.to_string()));
        }
        let target = match slot {
            ThemeColor::Section0 => &mut self.section0bgcolor,
            ThemeColor::EvenSection => &mut self.even_sectionbgcolor,
            ThemeColor::OddSection => &mut self.odd_sectionbgcolor,
            ThemeColor::Task => &mut self.taskbgcolor,
        };
        *target = color.to_string();
        Ok(())
    }

    /// Append a section and return its index.
    pub fn add_section(&mut self, title: impl Into<String>) -> usize {
        self.sections.push(Section::new(title));
        tracing::debug!(index = self.sections.len() - 1, "Section added");
        self.sections.len() - 1
    }

    /// Insert a section at `index`; `index == len` appends.
    pub fn insert_section(&mut self, index: usize, title: impl Into<String>) -> Result<usize> {
        if index > self.sections.len() {
            return Err(GanttError::SectionNotFound(index));
        }
        self.sections.insert(index, Section::new(title));
        tracing::debug!(index, "Section inserted");
        Ok(index)
    }

    /// Remove a section together with its tasks.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        if index >= self.sections.len() {
            return Err(GanttError::SectionNotFound(index));
        }
        let section = self.sections.remove(index);
        for task in &section.tasks {
            self.forget(&task.id);
        }
        tracing::debug!(index, tasks = section.tasks.len(), "Section removed");
        Ok(section)
    }

    pub fn section_mut(&mut self, index: usize) -> Result<&mut Section> {
        self.sections
            .get_mut(index)
            .ok_or(GanttError::SectionNotFound(index))
    }

    /// Add a task to a section, at the end or directly after `after`.
    pub fn add_task(
        &mut self,
        section: usize,
        title: impl Into<String>,
        after: Option<&TaskId>,
    ) -> Result<TaskId> {
        let id = self.section_mut(section)?.add_task(title, after)?;
        tracing::debug!(section, task = %id, "Task added");
        Ok(id)
    }

    /// Remove a task; its section goes too if it was the last one there.
    ///
    /// References to the removed task in other tasks' `before`/`after`
    /// lists are pruned so every remaining reference still resolves.
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .section_of(id)
            .ok_or_else(|| GanttError::TaskNotFound(id.clone()))?;
        let task = self.sections[index].remove_task(id)?;
        if self.sections[index].is_empty() {
            self.sections.remove(index);
            tracing::debug!(index, "Emptied section removed");
        }
        self.forget(id);
        tracing::debug!(task = %id, "Task removed");
        Ok(task)
    }

    /// Index of the section owning `id`.
    pub fn section_of(&self, id: &TaskId) -> Option<usize> {
        self.sections.iter().position(|s| s.contains(id))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.sections.iter().find_map(|s| s.task(id))
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.sections.iter_mut().find_map(|s| s.task_mut(id))
    }

    /// All tasks in diagram order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.sections.iter().flat_map(|s| s.tasks.iter())
    }

    /// Record that `task` is scheduled after `other`.
    pub fn add_after(&mut self, task: &TaskId, other: &TaskId) -> Result<()> {
        let target = self.link_target(task, other)?;
        if !target.after.contains(other) {
            target.after.push(other.clone());
        }
        Ok(())
    }

    /// Record that `task` must finish before `other`.
    pub fn add_before(&mut self, task: &TaskId, other: &TaskId) -> Result<()> {
        let target = self.link_target(task, other)?;
        if !target.before.contains(other) {
            target.before.push(other.clone());
        }
        Ok(())
    }

    fn link_target(&mut self, task: &TaskId, other: &TaskId) -> Result<&mut Task> {
        if task == other {
            return Err(GanttError::SelfReference(task.clone()));
        }
        if self.task(other).is_none() {
            return Err(GanttError::TaskNotFound(other.clone()));
        }
        self.task_mut(task)
            .ok_or_else(|| GanttError::TaskNotFound(task.clone()))
    }

    fn forget(&mut self, id: &TaskId) {
        for section in &mut self.sections {
            for task in &mut section.tasks {
                task.forget(id);
            }
        }
    }

    /// Check that task ids are unique and every dependency resolves.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for task in self.tasks() {
            if !seen.insert(&task.id) {
                return Err(GanttError::DuplicateTaskId(task.id.clone()));
            }
        }
        for task in self.tasks() {
            if let Some(missing) = task
                .before
                .iter()
                .chain(task.after.iter())
                .find(|r| !seen.contains(r))
            {
                return Err(GanttError::DanglingReference {
                    task: task.id.clone(),
                    reference: missing.clone(),
                });
            }
        }
        Ok(())
    }
}
