//! CLI command handlers

use colored::Colorize;
use std::path::PathBuf;

use crate::error::PlanResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::json;
use crate::metadata::MetadataOverrides;

/// Execute the export command (JSON → Excel)
pub fn export(input: PathBuf, output: PathBuf, verbose: bool) -> PlanResult<()> {
    println!("{}", "📊 Plansheet - Excel Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading JSON project...".cyan());
    }

    let project = json::load_project(&input)?;

    if verbose {
        println!(
            "   Found {} tasks, {} links\n",
            project.tasks.len(),
            project.links.len()
        );
        println!("{}", "📊 Writing workbook...".cyan());
    }

    let exporter = ExcelExporter::new(project);
    exporter.export(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the import command (Excel → JSON)
pub fn import(
    input: PathBuf,
    output: PathBuf,
    project_name: Option<String>,
    timeline_start: Option<String>,
    timeline_end: Option<String>,
    verbose: bool,
) -> PlanResult<()> {
    println!("{}", "📊 Plansheet - Excel Import".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading Excel workbook...".cyan());
    }

    let overrides = MetadataOverrides {
        project_name,
        timeline_start,
        timeline_end,
    };

    let importer = ExcelImporter::new(&input);
    let project = importer.import(&overrides)?;

    if verbose {
        println!(
            "   Found {} tasks, {} links",
            project.tasks.len(),
            project.links.len()
        );
        if let Some(name) = project.metadata.get("projectName") {
            println!("   Project: {}", name.as_str().unwrap_or_default().bright_blue());
        }
        println!();
        println!("{}", "💾 Writing JSON document...".cyan());
    }

    json::write_document(&output, &project)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   JSON file: {}\n", output.display());

    Ok(())
}
