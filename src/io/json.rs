//! JSON encoding and tagged decoding of Gantt documents.
//!
//! Decoding walks a parsed [`Value`] and picks the entity by which key is
//! present: `sections` means a Gantt, `tasks` a Section, `type` a Task.
//! Anything else is handed back untouched as [`Node::Value`].

use serde_json::{Map, Value};

use crate::error::{GanttError, Result};
use crate::model::{Gantt, Section, Task};

/// A decoded JSON node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Gantt(Gantt),
    Section(Section),
    Task(Task),
    Value(Value),
}

impl Node {
    fn describe(&self) -> &'static str {
        match self {
            Self::Gantt(_) => "gantt",
            Self::Section(_) => "section",
            Self::Task(_) => "task",
            Self::Value(Value::Object(_)) => "untagged object",
            Self::Value(Value::Array(_)) => "array",
            Self::Value(Value::String(_)) => "string",
            Self::Value(Value::Number(_)) => "number",
            Self::Value(Value::Bool(_)) => "boolean",
            Self::Value(Value::Null) => "null",
        }
    }
}

/// Encode a document as pretty-printed JSON.
pub fn encode(gantt: &Gantt) -> Result<String> {
    Ok(serde_json::to_string_pretty(gantt)?)
}

/// Decode a document from JSON text.
///
/// The top level must be a Gantt. Task ids must be unique and every
/// `before`/`after` reference must resolve within the document.
pub fn decode(json: &str) -> Result<Gantt> {
    decode_value(serde_json::from_str(json)?)
}

/// Decode a document from raw UTF-8 bytes, e.g. an uploaded file.
pub fn decode_slice(bytes: &[u8]) -> Result<Gantt> {
    decode_value(serde_json::from_slice(bytes)?)
}

fn decode_value(value: Value) -> Result<Gantt> {
    let gantt = match decode_node(value)? {
        Node::Gantt(gantt) => gantt,
        other => {
            return Err(GanttError::UnexpectedShape {
                expected: "gantt",
                found: other.describe(),
            })
        }
    };
    gantt.validate()?;
    Ok(gantt)
}

/// Decode one node by its discriminator key.
pub fn decode_node(value: Value) -> Result<Node> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok(Node::Value(other)),
    };
    if map.contains_key("sections") {
        let sections = take_children(&mut map, "sections")?
            .into_iter()
            .map(|v| expect_section(decode_node(v)?))
            .collect::<Result<Vec<_>>>()?;
        let mut gantt: Gantt = serde_json::from_value(Value::Object(map))?;
        gantt.sections = sections;
        Ok(Node::Gantt(gantt))
    } else if map.contains_key("tasks") {
        let tasks = take_children(&mut map, "tasks")?
            .into_iter()
            .map(|v| expect_task(decode_node(v)?))
            .collect::<Result<Vec<_>>>()?;
        let mut section: Section = serde_json::from_value(Value::Object(map))?;
        section.tasks = tasks;
        Ok(Node::Section(section))
    } else if map.contains_key("type") {
        Ok(Node::Task(serde_json::from_value(Value::Object(map))?))
    } else {
        Ok(Node::Value(Value::Object(map)))
    }
}

fn take_children(map: &mut Map<String, Value>, key: &'static str) -> Result<Vec<Value>> {
    match map.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => Err(GanttError::UnexpectedShape {
            expected: "array",
            found: Node::Value(other).describe(),
        }),
    }
}

fn expect_section(node: Node) -> Result<Section> {
    match node {
        Node::Section(section) => Ok(section),
        other => Err(GanttError::UnexpectedShape {
            expected: "section",
            found: other.describe(),
        }),
    }
}

fn expect_task(node: Node) -> Result<Task> {
    match node {
        Node::Task(task) => Ok(task),
        other => Err(GanttError::UnexpectedShape {
            expected: "task",
            found: other.describe(),
        }),
    }
}
