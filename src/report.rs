//! Validate-then-summarize pipeline and its renderings

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::dataset::{ClipKind, Dataset};
use crate::error::{ArchiveError, Result};
use crate::loader::{load_json, DocumentRole};
use crate::metrics::{aggregate, FrequencyTable, Metrics};
use crate::timestamp::format_duration;
use crate::validator::{SchemaValidator, ValidationFailure};

/// Outcome of a successful validation run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Load the schema and the archive, validate, then aggregate.
///
/// Checks run in a fixed order (schema file, data file, JSON parse,
/// conformance) and the first failure ends the run before any counting.
pub fn build_report(data_path: &Path, schema_path: &Path) -> Result<Report> {
    let schema = load_json(schema_path, DocumentRole::Schema)?;
    let document = load_json(data_path, DocumentRole::Data)?;

    SchemaValidator::new(&schema)?.validate(&document)?;
    info!(data = %data_path.display(), "archive is valid");

    let metrics = aggregate(&Dataset::from_value(&document));
    Ok(Report {
        generated_at: Utc::now(),
        metrics,
    })
}

fn write_table(out: &mut String, heading: &str, table: &FrequencyTable) {
    if table.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", heading);
    for (label, count) in table.most_common() {
        let _ = writeln!(out, "  {}: {}", label, count);
    }
}

/// Human-readable summary, as printed by `lbw-validate`
pub fn render_text(metrics: &Metrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Valid!\n");
    let _ = writeln!(out, "Videos: {}", metrics.video_count);
    let _ = writeln!(out, "Deliveries: {}", metrics.delivery_count);

    write_table(&mut out, "Deliveries per format", &metrics.format_counts);
    write_table(&mut out, "On-field decisions", &metrics.onfield_decision_counts);
    write_table(&mut out, "Final decisions", &metrics.final_decision_counts);
    write_table(&mut out, "DRS pitching", &metrics.drs_pitching_counts);
    write_table(&mut out, "DRS impact", &metrics.drs_impact_counts);
    write_table(&mut out, "DRS wickets", &metrics.drs_wickets_counts);

    let _ = writeln!(out, "Average clip lengths:");
    let _ = writeln!(
        out,
        "  Delivery: {}",
        format_duration(metrics.average_clip_length(ClipKind::Delivery))
    );
    let _ = writeln!(
        out,
        "  Review:   {}",
        format_duration(metrics.average_clip_length(ClipKind::Review))
    );
    out
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Diagnostic for a document that failed validation
pub fn render_failure(failure: &ValidationFailure) -> String {
    format!(
        "Validation error:\n{}\n\nLocation: {}",
        failure.message,
        failure.location()
    )
}

/// What a binary prints before exiting with status 1
pub fn render_error(err: &ArchiveError) -> String {
    match err.violation() {
        Some(failure) => render_failure(failure),
        None => err.to_string(),
    }
}
