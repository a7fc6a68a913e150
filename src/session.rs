//! Editing sessions and the registry that owns them.
//!
//! Each session owns one document. The registry is a plain owned map; all
//! access goes through `&mut SessionStore`, so there is a single writer.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{GanttError, Result};
use crate::io;
use crate::model::{Gantt, Task, TaskId};
use crate::render::{self, ChartConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One user's editing state.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub gantt: Gantt,
    pub status_message: String,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            gantt: Gantt::new(),
            status_message: "Ready".to_string(),
        }
    }

    /// Add an untitled swimlane holding one fresh task.
    pub fn add_swimlane(&mut self, today: NaiveDate) -> Result<(usize, TaskId)> {
        let section = self.gantt.add_section("");
        let task = self.add_task(section, None, today)?;
        self.status_message = "Swimlane added".to_string();
        Ok((section, task))
    }

    /// Add a task with editor defaults: it ends today and starts where the
    /// preceding task ended, or today when there is none.
    pub fn add_task(
        &mut self,
        section: usize,
        after: Option<&TaskId>,
        today: NaiveDate,
    ) -> Result<TaskId> {
        let previous_end = after
            .and_then(|id| self.gantt.task(id))
            .and_then(|t| t.end);
        let mut task = Task::new("");
        task.start = Some(previous_end.unwrap_or(today));
        task.end = Some(today);
        let id = self.gantt.section_mut(section)?.insert_task(task, after)?;
        tracing::debug!(session = %self.id, section, task = %id, "Task added");
        self.status_message = "Task added".to_string();
        Ok(id)
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let task = self.gantt.remove_task(id)?;
        self.status_message = "Task deleted".to_string();
        Ok(task)
    }

    /// Store a new duration token and recompute the task's end date.
    ///
    /// On error the task is left exactly as it was.
    pub fn set_duration(&mut self, id: &TaskId, token: &str) -> Result<NaiveDate> {
        let task = self
            .gantt
            .task_mut(id)
            .ok_or_else(|| GanttError::TaskNotFound(id.clone()))?;
        let mut edited = task.clone();
        edited.set_duration(token)?;
        let end = edited.recalculate_end()?;
        *task = edited;
        Ok(end)
    }

    /// Replace the document with one decoded from `bytes`.
    ///
    /// A document that fails to decode leaves the current one in place.
    pub fn import(&mut self, bytes: &[u8]) -> Result<()> {
        match io::decode_slice(bytes) {
            Ok(gantt) => {
                tracing::debug!(session = %self.id, gantt = %gantt.id, "Document imported");
                self.gantt = gantt;
                self.status_message = "Diagram loaded".to_string();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Import rejected");
                self.status_message = format!("Error loading: {}", e);
                Err(e)
            }
        }
    }

    /// File name and JSON bytes for downloading the document.
    pub fn export(&self) -> Result<(String, Vec<u8>)> {
        let json = io::encode(&self.gantt)?;
        Ok((io::export_file_name(&self.gantt), json.into_bytes()))
    }

    /// Drop every swimlane, keeping the document's options.
    pub fn clear(&mut self) {
        self.gantt.sections.clear();
        self.status_message = "Diagram cleared".to_string();
    }

    pub fn diagram(&self) -> String {
        render::diagram(&self.gantt)
    }

    pub fn render(&self, config: &ChartConfig) -> String {
        render::render_document(&self.gantt, config)
    }
}

/// Maps session ids to their sessions so a reloaded page can resume.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume the session for `id`, or start a new one.
    ///
    /// An unknown id gets a fresh session registered under that same id.
    pub fn open(&mut self, id: Option<SessionId>) -> &mut Session {
        let id = id.unwrap_or_default();
        self.sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session = %id, "Session created");
            Session::new(id)
        })
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn close(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&id);
        if session.is_some() {
            tracing::debug!(session = %id, "Session closed");
        }
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
