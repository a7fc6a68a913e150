//! Mermaid `gantt` text emitter.
//!
//! Output depends only on the document's field values. Missing optional
//! fields drop their token; emitting never fails.

use std::fmt::Write;

use crate::model::{Gantt, Section, Task, TaskId};

/// Date format declared to Mermaid; matches how dates are stored.
pub const DATE_FORMAT: &str = "YYYY-MM-DD";

/// Emit the full diagram definition for `gantt`.
pub fn diagram(gantt: &Gantt) -> String {
    let mut out = String::from("gantt\n");
    if gantt.show_title {
        let _ = writeln!(out, " title {}", gantt.title);
    }
    let _ = writeln!(out, "  axisFormat {}", gantt.axis_format);
    let _ = writeln!(out, "  tickInterval {}", gantt.tick_interval);
    if !gantt.show_today {
        out.push_str("  todayMarker off\n");
    }
    let _ = writeln!(out, "  dateformat {DATE_FORMAT}");
    if gantt.show_weekends {
        out.push_str("  excludes weekends\n");
    }
    for section in &gantt.sections {
        out.push_str(&section_lines(section));
    }
    out
}

pub fn section_lines(section: &Section) -> String {
    let mut out = format!("section {}\n", section.title);
    for task in &section.tasks {
        out.push_str(&task_line(task));
    }
    out
}

/// One task row: `  <title>: <tokens>` with tokens in fixed order.
pub fn task_line(task: &Task) -> String {
    format!("  {}: {}\n", task.title, task_tokens(task).join(", "))
}

/// Tokens for a task row, in emission order.
pub fn task_tokens(task: &Task) -> Vec<String> {
    let mut tokens = Vec::new();
    if task.critical {
        tokens.push("crit".to_string());
    }
    if let Some(status) = task.status.token() {
        tokens.push(status.to_string());
    }
    if task.is_milestone() {
        tokens.push("milestone".to_string());
    }
    tokens.push(task.id.to_string());
    if let Some(start) = task.start {
        tokens.push(start.format("%Y-%m-%d").to_string());
    }
    if !task.after.is_empty() {
        tokens.push(format!("after {}", join_ids(&task.after)));
    }
    if !task.before.is_empty() {
        tokens.push(format!("before {}", join_ids(&task.before)));
    }
    match (task.end, task.duration.trim()) {
        (Some(end), _) => tokens.push(end.format("%Y-%m-%d").to_string()),
        (None, "") => {}
        (None, duration) => tokens.push(duration.to_string()),
    }
    tokens
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(TaskId::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
