//! Excel exporter implementation - project plan → .xlsx

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use crate::coerce::parse_timestamp;
use crate::error::{PlanError, PlanResult};
use crate::types::{Project, DEFAULT_LINK_TYPE, LINK_FIELDS, TASK_FIELDS};

/// Excel exporter for project plans.
///
/// Produces exactly two sheets, `Tasks` and `Links`, with the fixed column
/// order of the field allow-lists. Date cells are written as naive Excel
/// datetimes carrying the UTC wall clock of the JSON timestamps.
pub struct ExcelExporter {
    project: Project,
}

impl ExcelExporter {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Export the project to an Excel .xlsx file.
    pub fn export(&self, output_path: &Path) -> PlanResult<()> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        let tasks_sheet = workbook.add_worksheet();
        tasks_sheet
            .set_name(super::TASKS_SHEET)
            .map_err(|e| PlanError::Export(format!("Failed to set worksheet name: {}", e)))?;
        self.write_tasks(tasks_sheet, &date_format)?;

        let links_sheet = workbook.add_worksheet();
        links_sheet
            .set_name(super::LINKS_SHEET)
            .map_err(|e| PlanError::Export(format!("Failed to set worksheet name: {}", e)))?;
        self.write_links(links_sheet)?;

        workbook
            .save(output_path)
            .map_err(|e| PlanError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    fn write_tasks(&self, worksheet: &mut Worksheet, date_format: &Format) -> PlanResult<()> {
        write_header(worksheet, &TASK_FIELDS)?;

        for (row_idx, task) in self.project.tasks.iter().enumerate() {
            let row = (row_idx + 1) as u32;

            write_opt_integer(worksheet, row, 0, task.id)?;
            write_opt_integer(worksheet, row, 1, task.parent)?;
            write_opt_string(worksheet, row, 2, task.text.as_deref())?;
            write_opt_string(worksheet, row, 3, task.task_type.as_deref())?;
            write_opt_date(worksheet, row, 4, task.start.as_deref(), date_format)?;
            write_opt_date(worksheet, row, 5, task.end.as_deref(), date_format)?;
            write_opt_integer(worksheet, row, 6, task.duration)?;
            write_opt_integer(worksheet, row, 7, task.optimistic)?;
            write_opt_integer(worksheet, row, 8, task.pessimistic)?;
            if let Some(progress) = task.progress {
                worksheet
                    .write_number(row, 9, progress)
                    .map_err(|e| PlanError::Export(format!("Failed to write number: {}", e)))?;
            }
            write_opt_string(worksheet, row, 10, task.resources.as_deref())?;
            write_opt_string(worksheet, row, 11, task.url.as_deref())?;
            write_opt_string(worksheet, row, 12, task.details.as_deref())?;
            write_opt_boolean(worksheet, row, 13, task.open)?;
            write_opt_boolean(worksheet, row, 14, task.unscheduled)?;
            write_opt_date(worksheet, row, 15, task.base_start.as_deref(), date_format)?;
            write_opt_date(worksheet, row, 16, task.base_end.as_deref(), date_format)?;
        }

        Ok(())
    }

    fn write_links(&self, worksheet: &mut Worksheet) -> PlanResult<()> {
        write_header(worksheet, &LINK_FIELDS)?;

        for (row_idx, link) in self.project.links.iter().enumerate() {
            let row = (row_idx + 1) as u32;

            write_opt_integer(worksheet, row, 0, link.id)?;
            write_opt_integer(worksheet, row, 1, link.source)?;
            write_opt_integer(worksheet, row, 2, link.target)?;
            let link_type = link.link_type.as_deref().unwrap_or(DEFAULT_LINK_TYPE);
            worksheet
                .write_string(row, 3, link_type)
                .map_err(|e| PlanError::Export(format!("Failed to write text: {}", e)))?;
        }

        Ok(())
    }
}

fn write_header(worksheet: &mut Worksheet, fields: &[&str]) -> PlanResult<()> {
    for (col_idx, field) in fields.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, *field)
            .map_err(|e| PlanError::Export(format!("Failed to write header: {}", e)))?;
    }
    Ok(())
}

fn write_opt_integer(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<i64>,
) -> PlanResult<()> {
    if let Some(value) = value {
        worksheet
            .write_number(row, col, value as f64)
            .map_err(|e| PlanError::Export(format!("Failed to write number: {}", e)))?;
    }
    Ok(())
}

fn write_opt_string(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> PlanResult<()> {
    if let Some(value) = value {
        worksheet
            .write_string(row, col, value)
            .map_err(|e| PlanError::Export(format!("Failed to write text: {}", e)))?;
    }
    Ok(())
}

fn write_opt_boolean(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<bool>,
) -> PlanResult<()> {
    if let Some(value) = value {
        worksheet
            .write_boolean(row, col, value)
            .map_err(|e| PlanError::Export(format!("Failed to write boolean: {}", e)))?;
    }
    Ok(())
}

/// Write a stored timestamp as a naive datetime cell with the UTC wall
/// clock. A string that survived coercion without parsing (ISO-shaped but
/// malformed) is written as text, matching the lenient import side.
fn write_opt_date(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
    date_format: &Format,
) -> PlanResult<()> {
    if let Some(value) = value {
        match parse_timestamp(value) {
            Some(instant) => {
                worksheet
                    .write_datetime_with_format(row, col, &instant.naive_utc(), date_format)
                    .map_err(|e| PlanError::Export(format!("Failed to write date: {}", e)))?;
            }
            None => {
                worksheet
                    .write_string(row, col, value)
                    .map_err(|e| PlanError::Export(format!("Failed to write date: {}", e)))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Link, Task};
    use tempfile::TempDir;

    #[test]
    fn test_export_empty_project() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("empty.xlsx");

        let exporter = ExcelExporter::new(Project::default());
        let result = exporter.export(&output_path);

        assert!(result.is_ok(), "Export empty project should succeed");
        assert!(output_path.exists(), "Output file should exist");
    }

    #[test]
    fn test_export_tasks_and_links() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("plan.xlsx");

        let project = Project {
            tasks: vec![Task {
                id: Some(1),
                text: Some("Kickoff".to_string()),
                task_type: Some("task".to_string()),
                start: Some("2025-01-01T00:00:00Z".to_string()),
                duration: Some(5),
                ..Task::default()
            }],
            links: vec![Link {
                id: Some(1),
                source: Some(1),
                target: Some(2),
                link_type: None,
            }],
            ..Project::default()
        };

        let exporter = ExcelExporter::new(project);
        assert!(exporter.export(&output_path).is_ok());
        assert!(output_path.exists());
    }
}
