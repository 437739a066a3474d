//! JSON project document read/write.
//!
//! The export pipeline loads `metadata`/`tasks`/`links` from a viewer
//! document (every other top-level key is ignored). The import pipeline
//! assembles a full document around the synthesized project, attaching the
//! fixed viewer default arrays.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::defaults;
use crate::error::PlanResult;
use crate::types::{Link, Project, Task};

/// Load a project from a viewer JSON document. Malformed JSON is fatal;
/// missing sections default to empty.
pub fn load_project(path: &Path) -> PlanResult<Project> {
    let raw = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;

    let metadata = document
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let tasks: Vec<Task> = document
        .get("tasks")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(Task::from_json).collect())
        .unwrap_or_default();

    let links: Vec<Link> = document
        .get("links")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(Link::from_json).collect())
        .unwrap_or_default();

    Ok(Project {
        metadata,
        tasks,
        links,
    })
}

/// Assemble the full import-output document. Key order matches the viewer's
/// own export; `scales`/`columns`/`taskTypes` are always the built-in
/// defaults and `markers` is never emitted.
pub fn assemble_document(project: &Project) -> PlanResult<Value> {
    let mut document = Map::new();
    document.insert(
        "metadata".to_string(),
        Value::Object(project.metadata.clone()),
    );
    document.insert("tasks".to_string(), serde_json::to_value(&project.tasks)?);
    document.insert("links".to_string(), serde_json::to_value(&project.links)?);
    document.insert("scales".to_string(), defaults::scales());
    document.insert("columns".to_string(), defaults::columns());
    document.insert("taskTypes".to_string(), defaults::task_types());
    Ok(Value::Object(document))
}

/// Write the import-output document, pretty-printed. The document is fully
/// assembled before anything touches the filesystem, so a failed run leaves
/// no partial output behind.
pub fn write_document(path: &Path, project: &Project) -> PlanResult<()> {
    let document = assemble_document(project)?;
    let pretty = serde_json::to_string_pretty(&document)?;
    fs::write(path, pretty)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_layout() {
        let project = Project::default();
        let document = assemble_document(&project).unwrap();
        let keys: Vec<&String> = document.as_object().unwrap().keys().collect();

        assert_eq!(
            keys,
            ["metadata", "tasks", "links", "scales", "columns", "taskTypes"]
        );
        assert!(document.get("markers").is_none());
    }

    #[test]
    fn test_load_project_defaults_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "{}").unwrap();

        let project = load_project(&path).unwrap();
        assert!(project.metadata.is_empty());
        assert!(project.tasks.is_empty());
        assert!(project.links.is_empty());
    }

    #[test]
    fn test_load_project_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load_project(&path).is_err());
    }
}
