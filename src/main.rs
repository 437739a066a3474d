use clap::{Parser, Subcommand};
use plansheet::cli;
use plansheet::error::PlanResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plansheet")]
#[command(about = "Convert Gantt project plans between viewer JSON and Excel workbooks")]
#[command(long_about = "Plansheet - Gantt JSON ⇄ Excel converter

COMMANDS:
  export - JSON project document to Excel (.xlsx)
  import - Excel (.xlsx) to JSON project document

EXAMPLES:
  plansheet export plan.json plan.xlsx
  plansheet import plan.xlsx plan.json --project-name \"My Plan\"
  plansheet import plan.xlsx plan.json \\
      --timeline-start 2025-08-10T00:00:00Z --timeline-end 2025-09-30T00:00:00Z

The workbook uses two sheets: \"Tasks\" and \"Links\". JSON times are UTC (Z);
Excel cells hold the same wall clock as naive datetimes, no offset applied.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a JSON project document to an Excel .xlsx workbook.

Writes two sheets, \"Tasks\" and \"Links\", with a fixed column layout.
Timestamps are written as naive datetimes carrying the JSON UTC wall clock.
Only the recognized task and link fields are exported; anything else in the
document is dropped.

EXAMPLE:
  plansheet export plan.json plan.xlsx")]
    /// Export a JSON project document to Excel (.xlsx)
    Export {
        /// Input JSON path
        input: PathBuf,

        /// Output Excel path (.xlsx)
        output: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import an Excel .xlsx workbook to a JSON project document.

The \"Tasks\" sheet is mandatory (matched case-insensitively); \"Links\" is
optional. Cells that fail to parse drop that single field, never the run.
Document metadata is synthesized: project name, export timestamp, and a
timeline window padded around the task extents (3 days lead, 7 days trail).
Viewer scales, columns and task types are filled from built-in defaults.

EXAMPLES:
  plansheet import plan.xlsx plan.json
  plansheet import plan.xlsx plan.json --project-name \"My Plan\"
  plansheet import plan.xlsx plan.json --timeline-start 2025-08-10T00:00:00Z")]
    /// Import an Excel .xlsx workbook to a JSON project document
    Import {
        /// Input Excel path (.xlsx)
        input: PathBuf,

        /// Output JSON path
        output: PathBuf,

        /// Project name for metadata (default: "Imported Plan")
        #[arg(long)]
        project_name: Option<String>,

        /// Override timelineStart (ISO timestamp)
        #[arg(long)]
        timeline_start: Option<String>,

        /// Override timelineEnd (ISO timestamp)
        #[arg(long)]
        timeline_end: Option<String>,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> PlanResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            verbose,
        } => cli::export(input, output, verbose),

        Commands::Import {
            input,
            output,
            project_name,
            timeline_start,
            timeline_end,
            verbose,
        } => cli::import(
            input,
            output,
            project_name,
            timeline_start,
            timeline_end,
            verbose,
        ),
    }
}
