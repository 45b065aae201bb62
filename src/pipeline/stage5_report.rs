use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::lookup::SpotLookup;
use crate::model::calibration::{Calibration, CalibrationProfile};
use crate::model::spot::{NormalizedSpot, Reactivity};
use crate::model::tier::{ReactivityTier, TierDisplay};
use crate::report::json::{AnalysisRecord, render_analysis_record, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    ReportContext, ResultRow, SummaryData, build_result_rows, format_f64_4, median,
    normalized_cell, p90, tier_stats,
};
use crate::settings::GridSettings;
use crate::simd;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct Stage5Input<'a> {
    pub name: String,
    pub description: Option<String>,
    pub image_filename: Option<String>,
    pub image_width: usize,
    pub image_height: usize,
    pub created_at_unix: u64,

    pub settings: &'a GridSettings,
    pub spots: &'a [NormalizedSpot],
    pub calibration: &'a Calibration,
    pub profile: &'a CalibrationProfile,
    pub lookup: &'a dyn SpotLookup,
    pub display: TierDisplay,

    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let rows = build_result_rows(input.spots, input.lookup);

    let spots_path = out_dir.join("spots.tsv");
    write_spots_tsv(&rows, input.profile.low_value, input.display, &spots_path)?;

    let summary = build_summary(input);
    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    let ctx = build_report_context(input, &rows, summary);
    write_text(&report_path, &render_report_text(&ctx))?;

    let record = AnalysisRecord {
        name: input.name.clone(),
        description: input.description.clone(),
        created_at_unix: input.created_at_unix,
        rows: input.settings.params.rows,
        cols: input.settings.params.cols,
        image_filename: input.image_filename.clone(),
        grid_params: input.settings.clone(),
        results: rows,
    };
    let record_path = out_dir.join("analysis.json");
    write_text(&record_path, &render_analysis_record(&record)?)?;

    info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let measured: Vec<&NormalizedSpot> = input
        .spots
        .iter()
        .filter(|s| s.measurement.is_measured())
        .collect();
    let ods: Vec<f64> = measured.iter().map(|s| s.measurement.avg_od).collect();
    let normalized: Vec<f64> = input
        .spots
        .iter()
        .filter_map(|s| s.reactivity.value())
        .collect();
    let n_not_computable = input
        .spots
        .iter()
        .filter(|s| s.reactivity == Reactivity::NotComputable)
        .count();

    SummaryData {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        simd_backend: simd::backend_name().to_string(),
        image_width: input.image_width,
        image_height: input.image_height,
        rows: input.settings.params.rows,
        cols: input.settings.params.cols,
        n_spots: input.spots.len(),
        n_overrides: input.settings.overrides.len(),
        n_measured: measured.len(),
        n_out_of_bounds: input.spots.len() - measured.len(),
        n_not_computable,
        calibration: *input.calibration,
        tiers: tier_stats(input.spots),
        od_median: median(&ods),
        od_p90: p90(&ods),
        normalized_median: if normalized.is_empty() {
            None
        } else {
            Some(median(&normalized))
        },
    }
}

fn build_report_context(
    input: &Stage5Input<'_>,
    rows: &[ResultRow],
    summary: SummaryData,
) -> ReportContext {
    let mut highlights: Vec<ResultRow> = input
        .spots
        .iter()
        .zip(rows)
        .filter(|(s, _)| s.reactivity.tier() == Some(ReactivityTier::HighlyElevated))
        .map(|(_, r)| r.clone())
        .collect();
    highlights.sort_by(|a, b| match (b.normalized, a.normalized) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => std::cmp::Ordering::Equal,
    });

    ReportContext {
        title: input.name.clone(),
        summary,
        highlights,
        display: input.display,
        elevated_min: input.profile.low_value,
    }
}

fn write_spots_tsv(
    rows: &[ResultRow],
    elevated_min: f64,
    display: TierDisplay,
    path: &Path,
) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "row",
        "col",
        "name",
        "latin_name",
        "category",
        "x",
        "y",
        "mean_intensity",
        "pixel_count",
        "avg_od",
        "normalized",
        "tier",
        "status",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for r in rows {
        let line = [
            r.row.to_string(),
            r.col.to_string(),
            sanitize(&r.name),
            sanitize(&r.latin_name),
            sanitize(&r.category),
            format_f64_4(r.x),
            format_f64_4(r.y),
            format_f64_4(r.mean_intensity),
            r.pixel_count.to_string(),
            format_f64_4(r.avg_od),
            normalized_cell(r, elevated_min, display),
            r.tier.clone(),
            r.status.clone(),
        ]
        .join("\t");
        writeln!(w, "{}", line)?;
    }
    w.flush()
}

fn sanitize(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(content.as_bytes())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
