//! Excel importer implementation - .xlsx → project plan

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::Duration;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::coerce::{format_iso_z, parse_timestamp};
use crate::error::{PlanError, PlanResult};
use crate::metadata::{self, MetadataOverrides};
use crate::types::{CellScalar, Link, Project, Task, DEFAULT_LINK_TYPE, LINK_FIELDS, TASK_FIELDS};

/// Excel importer for project workbooks.
///
/// Reads the `Tasks` and `Links` sheets (names matched case-insensitively),
/// assembling a sparse project model. The task sheet is mandatory; the link
/// sheet is optional. Single malformed cells drop the affected field only.
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the workbook, synthesizing document metadata from the task
    /// extents and the caller's overrides.
    pub fn import(&self, overrides: &MetadataOverrides) -> PlanResult<Project> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| PlanError::Import(format!("Failed to open Excel file: {}", e)))?;

        // Resolve sheet names case-insensitively
        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_map: HashMap<String, String> = sheet_names
            .iter()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();

        let tasks_sheet = sheet_map
            .get(&super::TASKS_SHEET.to_lowercase())
            .ok_or_else(|| {
                PlanError::Import(format!(
                    "Excel file must contain a '{}' sheet",
                    super::TASKS_SHEET
                ))
            })?;

        let tasks_range = workbook
            .worksheet_range(tasks_sheet)
            .map_err(|e| PlanError::Import(format!("Failed to read task sheet: {}", e)))?;
        let tasks = read_tasks(&tasks_range);

        let links = match sheet_map.get(&super::LINKS_SHEET.to_lowercase()) {
            Some(links_sheet) => {
                let links_range = workbook
                    .worksheet_range(links_sheet)
                    .map_err(|e| PlanError::Import(format!("Failed to read link sheet: {}", e)))?;
                read_links(&links_range)
            }
            None => Vec::new(),
        };

        let metadata = metadata::synthesize(overrides, &tasks);

        Ok(Project {
            metadata,
            tasks,
            links,
        })
    }
}

/// Map header-row cells to recognized field names. Headers are trimmed and
/// matched exactly; unknown columns are ignored (the allow-list both ways).
fn header_columns(range: &Range<Data>, fields: &[&str]) -> HashMap<String, usize> {
    let mut columns = HashMap::new();
    let (_, width) = range.get_size();

    for col in 0..width {
        if let Some(Data::String(name)) = range.get((0, col)) {
            let name = name.trim();
            if fields.contains(&name) {
                columns.insert(name.to_string(), col);
            }
        }
    }

    columns
}

fn cell_scalar(range: &Range<Data>, row: usize, col: usize) -> CellScalar {
    range.get((row, col)).map_or(CellScalar::Empty, CellScalar::from)
}

fn read_tasks(range: &Range<Data>) -> Vec<Task> {
    let columns = header_columns(range, &TASK_FIELDS);
    let (height, _) = range.get_size();
    let mut tasks = Vec::new();

    for row in 1..height {
        let mut task = Task::assemble(|field| {
            columns
                .get(field)
                .map_or(CellScalar::Empty, |&col| cell_scalar(range, row, col))
        });
        if task.is_blank() {
            continue;
        }
        apply_task_defaults(&mut task);
        tasks.push(task);
    }

    tasks
}

/// Import-only default synthesis. Export intentionally does none of this:
/// a stale `end` in the JSON document is exported as-is.
fn apply_task_defaults(task: &mut Task) {
    // Derive end from start + duration (whole days) when absent
    if task.end.is_none() {
        if let (Some(start), Some(duration)) = (task.start.as_deref(), task.duration) {
            if let Some(end) = parse_timestamp(start)
                .zip(Duration::try_days(duration))
                .and_then(|(instant, delta)| instant.checked_add_signed(delta))
            {
                task.end = Some(format_iso_z(end));
            }
        }
    }

    if task.task_type.is_none() {
        task.task_type = Some("task".to_string());
    }

    if task.text.is_none() {
        task.text = Some(match task.id {
            Some(id) => format!("Task {}", id),
            None => "Task".to_string(),
        });
    }
}

fn read_links(range: &Range<Data>) -> Vec<Link> {
    let columns = header_columns(range, &LINK_FIELDS);
    let (height, _) = range.get_size();
    let mut links = Vec::new();

    for row in 1..height {
        let mut link = Link::assemble(|field| {
            columns
                .get(field)
                .map_or(CellScalar::Empty, |&col| cell_scalar(range, row, col))
        });

        if link.link_type.is_none() {
            link.link_type = Some(DEFAULT_LINK_TYPE.to_string());
        }

        // Self-loops and dangling endpoints are silently dropped
        if link.has_valid_endpoints() {
            links.push(link);
        }
    }

    links
}
