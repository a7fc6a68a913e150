use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId};
use crate::error::{GanttError, Result};

/// A swimlane: a titled, ordered group of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tasks: Vec::new(),
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

    pub fn contains(&self, id: &TaskId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Add a new task at the end, or directly after `after` when given.
    ///
    /// The reference task must belong to this section.
    pub fn add_task(&mut self, title: impl Into<String>, after: Option<&TaskId>) -> Result<TaskId> {
        self.insert_task(Task::new(title), after)
    }

    /// Place an existing task at the end, or directly after `after` when given.
    pub fn insert_task(&mut self, task: Task, after: Option<&TaskId>) -> Result<TaskId> {
        let index = match after {
            None => self.tasks.len(),
            Some(reference) => {
                self.position(reference).ok_or_else(|| {
                    GanttError::ReferenceNotInSection(reference.clone(), self.title.clone())
                })? + 1
            }
        };
        let id = task.id.clone();
        self.tasks.insert(index, task);
        Ok(id)
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| GanttError::TaskNotFound(id.clone()))?;
        Ok(self.tasks.remove(index))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
