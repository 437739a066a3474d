use calamine::Data;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{to_boolean, to_float, to_integer, to_text, to_timestamp};

//==============================================================================
// Field allow-lists
//==============================================================================

/// Task sheet columns, in the fixed order they appear in the workbook.
/// Fields outside this list are dropped in both directions.
pub const TASK_FIELDS: [&str; 17] = [
    "id",
    "parent",
    "text",
    "type",
    "start",
    "end",
    "duration",
    "optimistic",
    "pessimistic",
    "progress",
    "resources",
    "url",
    "details",
    "open",
    "unscheduled",
    "base_start",
    "base_end",
];

/// Link sheet columns, in fixed order.
pub const LINK_FIELDS: [&str; 4] = ["id", "source", "target", "type"];

/// Default dependency kind (end-to-start).
pub const DEFAULT_LINK_TYPE: &str = "e2s";

//==============================================================================
// Cell scalars
//==============================================================================

/// A single scalar value as found in a JSON field or a spreadsheet cell.
///
/// Both pipelines funnel their raw values through this type so the coercion
/// layer has one input shape regardless of direction.
#[derive(Debug, Clone, PartialEq)]
pub enum CellScalar {
    Empty,
    Int(i64),
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellScalar {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellScalar::Empty)
    }
}

impl From<&Value> for CellScalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellScalar::Empty,
            Value::Bool(b) => CellScalar::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellScalar::Int(i)
                } else {
                    n.as_f64().map_or(CellScalar::Empty, CellScalar::Number)
                }
            }
            Value::String(s) => CellScalar::Text(s.clone()),
            // Arrays and objects are not scalar; the field is dropped
            Value::Array(_) | Value::Object(_) => CellScalar::Empty,
        }
    }
}

impl From<&Data> for CellScalar {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellScalar::Empty,
            Data::Int(i) => CellScalar::Int(*i),
            Data::Float(f) => CellScalar::Number(*f),
            Data::String(s) => CellScalar::Text(s.clone()),
            Data::Bool(b) => CellScalar::Bool(*b),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map_or(CellScalar::Empty, CellScalar::DateTime),
            // ISO strings go through the same string parsing as typed text
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellScalar::Text(s.clone()),
        }
    }
}

//==============================================================================
// Project model
//==============================================================================

/// One schedulable item. All fields are sparse: `None` means the key is
/// absent in the JSON document and the cell is blank in the workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pessimistic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unscheduled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_end: Option<String>,
}

impl Task {
    /// Assemble a task from per-field scalars, applying the kind-driven
    /// coercions. `lookup` returns the raw scalar for a field name; fields
    /// whose coercion fails stay `None`.
    pub fn assemble(lookup: impl Fn(&str) -> CellScalar) -> Self {
        let int = |f: &str| to_integer(&lookup(f));
        let date = |f: &str| to_timestamp(&lookup(f));
        let text = |f: &str| to_text(&lookup(f));
        let boolean = |f: &str| to_boolean(&lookup(f));

        Task {
            id: int("id"),
            parent: int("parent"),
            text: text("text"),
            task_type: text("type"),
            start: date("start"),
            end: date("end"),
            duration: int("duration"),
            optimistic: int("optimistic"),
            pessimistic: int("pessimistic"),
            progress: to_float(&lookup("progress")),
            resources: text("resources"),
            url: text("url"),
            details: text("details"),
            open: boolean("open"),
            unscheduled: boolean("unscheduled"),
            base_start: date("base_start"),
            base_end: date("base_end"),
        }
    }

    /// Build a task from one entry of the JSON `tasks` array. Non-object
    /// entries produce an empty task; unknown keys are ignored.
    pub fn from_json(value: &Value) -> Self {
        Self::assemble(|field| {
            value
                .get(field)
                .map_or(CellScalar::Empty, CellScalar::from)
        })
    }

    pub fn is_blank(&self) -> bool {
        *self == Task::default()
    }
}

/// A directed dependency edge between two tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

impl Link {
    pub fn assemble(lookup: impl Fn(&str) -> CellScalar) -> Self {
        Link {
            id: to_integer(&lookup("id")),
            source: to_integer(&lookup("source")),
            target: to_integer(&lookup("target")),
            link_type: to_text(&lookup("type")),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        Self::assemble(|field| {
            value
                .get(field)
                .map_or(CellScalar::Empty, CellScalar::from)
        })
    }

    /// A link is well-formed when both endpoints are present and distinct.
    /// The importer drops everything else.
    pub fn has_valid_endpoints(&self) -> bool {
        match (self.source, self.target) {
            (Some(source), Some(target)) => source != target,
            _ => false,
        }
    }
}

/// The in-memory project plan, constructed fresh per invocation from either
/// a JSON document or a workbook.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub metadata: Map<String, Value>,
    pub tasks: Vec<Task>,
    pub links: Vec<Link>,
}
