//! Document metadata synthesis for imported projects.
//!
//! The workbook carries no document-level metadata, so the importer derives
//! it: a project name, the export timestamp, and the visible timeline
//! window. Caller-supplied overrides win per field.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use crate::coerce::{format_iso_z, parse_timestamp};
use crate::types::Task;

/// Leading margin before the earliest task start.
const TIMELINE_LEAD_DAYS: i64 = 3;
/// Trailing margin after the latest task end. Wider than the lead so the
/// viewer has room to show schedule slippage.
const TIMELINE_TRAIL_DAYS: i64 = 7;

/// Caller-supplied metadata overrides, straight from the CLI flags.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub project_name: Option<String>,
    pub timeline_start: Option<String>,
    pub timeline_end: Option<String>,
}

/// Build the metadata object for an imported project document.
pub fn synthesize(overrides: &MetadataOverrides, tasks: &[Task]) -> Map<String, Value> {
    let now = Utc::now();
    let (computed_start, computed_end) = compute_timeline(tasks, now);

    let timeline_start = overrides
        .timeline_start
        .clone()
        .unwrap_or(computed_start);
    let timeline_end = overrides.timeline_end.clone().unwrap_or(computed_end);

    let project_name = overrides
        .project_name
        .clone()
        .unwrap_or_else(|| "Imported Plan".to_string());

    let mut metadata = Map::new();
    metadata.insert("projectName".to_string(), Value::String(project_name));
    metadata.insert("exportDate".to_string(), Value::String(format_iso_z(now)));
    metadata.insert("version".to_string(), Value::String("1.0.0".to_string()));
    metadata.insert("normalizedIds".to_string(), Value::Bool(true));
    metadata.insert("timelineStart".to_string(), Value::String(timeline_start));
    metadata.insert("timelineEnd".to_string(), Value::String(timeline_end));
    metadata
}

/// Compute the default timeline window from task extents: earliest start
/// minus the lead margin, latest end plus the trail margin. Falls back to
/// `now` for both edges when the tasks give no usable extent.
fn compute_timeline(tasks: &[Task], now: DateTime<Utc>) -> (String, String) {
    let mut min_start: Option<DateTime<Utc>> = None;
    let mut max_end: Option<DateTime<Utc>> = None;

    for task in tasks {
        if let Some(start) = task.start.as_deref().and_then(parse_timestamp) {
            if min_start.map_or(true, |current| start < current) {
                min_start = Some(start);
            }
        }
        if let Some(end) = task.end.as_deref().and_then(parse_timestamp) {
            if max_end.map_or(true, |current| end > current) {
                max_end = Some(end);
            }
        }
    }

    match (min_start, max_end) {
        (Some(start), Some(end)) => (
            format_iso_z(start - Duration::days(TIMELINE_LEAD_DAYS)),
            format_iso_z(end + Duration::days(TIMELINE_TRAIL_DAYS)),
        ),
        _ => (format_iso_z(now), format_iso_z(now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(start: Option<&str>, end: Option<&str>) -> Task {
        Task {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            ..Task::default()
        }
    }

    #[test]
    fn test_timeline_padding() {
        let tasks = vec![
            task(Some("2025-03-10T00:00:00Z"), Some("2025-03-15T00:00:00Z")),
            task(Some("2025-03-12T00:00:00Z"), Some("2025-03-20T00:00:00Z")),
        ];

        let metadata = synthesize(&MetadataOverrides::default(), &tasks);
        assert_eq!(metadata["timelineStart"], "2025-03-07T00:00:00Z");
        assert_eq!(metadata["timelineEnd"], "2025-03-27T00:00:00Z");
    }

    #[test]
    fn test_timeline_falls_back_to_now_without_extents() {
        let metadata = synthesize(&MetadataOverrides::default(), &[]);
        let start = metadata["timelineStart"].as_str().unwrap();
        let end = metadata["timelineEnd"].as_str().unwrap();

        assert_eq!(start, end);
        assert!(start.ends_with('Z'));
    }

    #[test]
    fn test_overrides_win_per_field() {
        let tasks = vec![task(
            Some("2025-03-10T00:00:00Z"),
            Some("2025-03-20T00:00:00Z"),
        )];
        let overrides = MetadataOverrides {
            project_name: Some("Rollout".to_string()),
            timeline_start: Some("2025-01-01T00:00:00Z".to_string()),
            timeline_end: None,
        };

        let metadata = synthesize(&overrides, &tasks);
        assert_eq!(metadata["projectName"], "Rollout");
        assert_eq!(metadata["timelineStart"], "2025-01-01T00:00:00Z");
        // The un-overridden edge is still computed from extents
        assert_eq!(metadata["timelineEnd"], "2025-03-27T00:00:00Z");
    }

    #[test]
    fn test_fixed_fields() {
        let metadata = synthesize(&MetadataOverrides::default(), &[]);
        assert_eq!(metadata["projectName"], "Imported Plan");
        assert_eq!(metadata["version"], "1.0.0");
        assert_eq!(metadata["normalizedIds"], true);
        assert!(metadata["exportDate"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_unparseable_extents_ignored() {
        let tasks = vec![
            task(Some("not a date"), None),
            task(Some("2025-03-10T00:00:00Z"), Some("2025-03-20T00:00:00Z")),
        ];

        let metadata = synthesize(&MetadataOverrides::default(), &tasks);
        assert_eq!(metadata["timelineStart"], "2025-03-07T00:00:00Z");
    }
}
