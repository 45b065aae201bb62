pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::lookup::SpotLookup;
use crate::model::calibration::Calibration;
use crate::model::spot::NormalizedSpot;
use crate::model::tier::{ReactivityTier, TierDisplay, format_normalized, tier_order};

/// One line of the result table, joined with the spot annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub row: u32,
    pub col: u32,
    pub name: String,
    pub latin_name: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub mean_intensity: f64,
    pub pixel_count: u32,
    pub avg_od: f64,
    pub normalized: Option<f64>,
    /// Display label: a tier label, "Not computable" or "Undefined".
    pub tier: String,
    #[serde(default)]
    pub reactivity_tier: Option<ReactivityTier>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub simd_backend: String,

    pub image_width: usize,
    pub image_height: usize,
    pub rows: u32,
    pub cols: u32,
    pub n_spots: usize,
    pub n_overrides: usize,
    pub n_measured: usize,
    pub n_out_of_bounds: usize,
    pub n_not_computable: usize,

    pub calibration: Calibration,
    pub tiers: Vec<TierStat>,

    pub od_median: f64,
    pub od_p90: f64,
    pub normalized_median: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub title: String,
    pub summary: SummaryData,
    /// Highly elevated spots, strongest first.
    pub highlights: Vec<ResultRow>,
    pub display: TierDisplay,
    pub elevated_min: f64,
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn tier_stats(spots: &[NormalizedSpot]) -> Vec<TierStat> {
    let n = spots.len();
    tier_order()
        .iter()
        .map(|&tier| {
            let count = spots
                .iter()
                .filter(|s| s.reactivity.tier() == Some(tier))
                .count();
            TierStat {
                name: tier.key(),
                count,
                fraction: if n == 0 { 0.0 } else { count as f64 / n as f64 },
            }
        })
        .collect()
}

pub fn build_result_rows(spots: &[NormalizedSpot], lookup: &dyn SpotLookup) -> Vec<ResultRow> {
    spots
        .iter()
        .map(|s| {
            let m = &s.measurement;
            let annotation = lookup.lookup(m.row, m.col);
            ResultRow {
                row: m.row,
                col: m.col,
                name: annotation.map(|a| a.name.clone()).unwrap_or_default(),
                latin_name: annotation.map(|a| a.latin_name.clone()).unwrap_or_default(),
                category: annotation.map(|a| a.category.clone()).unwrap_or_default(),
                x: m.x,
                y: m.y,
                mean_intensity: m.mean_intensity,
                pixel_count: m.pixel_count,
                avg_od: m.avg_od,
                normalized: s.reactivity.value(),
                tier: s.reactivity.label().to_string(),
                reactivity_tier: s.reactivity.tier(),
                status: m.status.as_str().to_string(),
            }
        })
        .collect()
}

/// Table cell for the normalized column.
pub fn normalized_cell(row: &ResultRow, elevated_min: f64, display: TierDisplay) -> String {
    match (row.normalized, row.reactivity_tier) {
        (Some(value), Some(tier)) => format_normalized(value, tier, elevated_min, display),
        _ => "NA".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
