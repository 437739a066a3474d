//! Fixed Gantt viewer arrays reused on import.
//!
//! These are opaque viewer configuration blocks: every imported document
//! gets a fresh copy, nothing is ever derived from the workbook.

use serde_json::{json, Value};

/// Default timeline scales (month header row over day cells).
pub fn scales() -> Value {
    json!([
        { "unit": "month", "step": 1, "format": "MMMM yyy" },
        { "unit": "day", "step": 1, "format": "d" },
    ])
}

/// Default grid column layout.
pub fn columns() -> Value {
    json!([
        { "id": "text", "header": "Task name", "flexgrow": 2, "editor": "text" },
        { "id": "url", "header": "Url", "flexgrow": 1, "align": "left" },
        { "id": "start", "header": "Start date", "flexgrow": 1, "align": "center" },
        { "id": "duration", "header": "Duration", "align": "center", "flexgrow": 1 },
        { "id": "resources", "header": "Resources", "flexgrow": 1, "align": "center", "editor": "text" },
    ])
}

/// Default task-type legend.
pub fn task_types() -> Value {
    json!([
        { "id": "task", "label": "Task" },
        { "id": "summary", "label": "Summary task" },
        { "id": "milestone", "label": "Milestone" },
        { "id": "critical", "label": "Critical" },
        { "id": "narrow", "label": "Narrow" },
        { "id": "progress", "label": "Progress" },
        { "id": "buffer", "label": "Buffer" },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arrays_shape() {
        assert_eq!(scales().as_array().unwrap().len(), 2);
        assert_eq!(columns().as_array().unwrap().len(), 5);

        let types = task_types();
        let types = types.as_array().unwrap();
        assert_eq!(types.len(), 7);
        assert_eq!(types[0]["id"], "task");
        assert_eq!(types[6]["id"], "buffer");
    }
}
