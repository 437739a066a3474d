//! Plansheet - Gantt project plan JSON ⇄ Excel converter
//!
//! This library converts project-plan data between the JSON document a Gantt
//! viewer loads and a two-sheet Excel workbook ("Tasks", "Links") suitable
//! for hand editing, preserving hierarchy, scheduling fields and dependency
//! links across the round trip.
//!
//! # Features
//!
//! - Lenient per-field coercion: malformed cells drop a field, never a run
//! - UTC wall-clock timestamp relabeling between ISO `Z` strings and naive
//!   Excel datetimes
//! - Import-side synthesis of document metadata and a padded timeline window
//!
//! # Example
//!
//! ```no_run
//! use plansheet::excel::{ExcelExporter, ExcelImporter};
//! use plansheet::metadata::MetadataOverrides;
//! use std::path::Path;
//!
//! let project = plansheet::json::load_project(Path::new("plan.json"))?;
//! ExcelExporter::new(project).export(Path::new("plan.xlsx"))?;
//!
//! let importer = ExcelImporter::new("plan.xlsx");
//! let reimported = importer.import(&MetadataOverrides::default())?;
//! println!("Tasks: {}", reimported.tasks.len());
//! # Ok::<(), plansheet::error::PlanError>(())
//! ```

pub mod cli;
pub mod coerce;
pub mod defaults;
pub mod error;
pub mod excel;
pub mod json;
pub mod metadata;
pub mod types;

// Re-export commonly used types
pub use error::{PlanError, PlanResult};
pub use types::{CellScalar, Link, Project, Task};
