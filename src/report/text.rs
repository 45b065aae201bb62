use crate::model::calibration::CalibrationQuality;
use crate::model::tier::TierDisplay;
use crate::report::{ReportContext, TierStat, format_f64_4, normalized_cell};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let s = &ctx.summary;
    let mut out = String::new();

    out.push_str(&format!("Microarray Reactivity Report: {}\n", ctx.title));
    out.push_str("====================================\n\n");

    out.push_str("1. Grid\n");
    out.push_str(&format!(
        "Image: {}x{} px\nLattice: {} rows x {} cols ({} spots, {} manual overrides)\n",
        s.image_width, s.image_height, s.rows, s.cols, s.n_spots, s.n_overrides
    ));
    out.push_str(&format!(
        "Measured: {}\nOut of bounds: {}\n\n",
        s.n_measured, s.n_out_of_bounds
    ));

    out.push_str("2. Calibration\n");
    out.push_str(&format!(
        "Quality: {}\n",
        quality_statement(s.calibration.quality)
    ));
    if let (Some(top), Some(low)) = (s.calibration.od_top, s.calibration.od_low) {
        out.push_str(&format!(
            "Reference OD: upper={} lower={}\n",
            format_f64_4(top),
            format_f64_4(low)
        ));
    }
    if let (Some(a), Some(b)) = (s.calibration.slope, s.calibration.intercept) {
        out.push_str(&format!(
            "Fit: normalized = {} * OD + {}\n",
            format_f64_4(a),
            format_f64_4(b)
        ));
    }
    out.push_str(&format!(
        "OD median: {}\nOD p90: {}\n\n",
        format_f64_4(s.od_median),
        format_f64_4(s.od_p90)
    ));

    out.push_str("3. Reactivity\n");
    if s.n_not_computable > 0 {
        out.push_str(&format!(
            "Not computable: {} spots (no spread between reference spots)\n",
            s.n_not_computable
        ));
    }
    for stat in &s.tiers {
        out.push_str(&format_tier_line(stat));
    }
    out.push('\n');

    out.push_str("4. Highly elevated spots\n");
    if ctx.highlights.is_empty() {
        out.push_str("None\n");
    }
    for row in &ctx.highlights {
        let label = if row.name.is_empty() {
            format!("r{}c{}", row.row, row.col)
        } else {
            format!("{} (r{}c{})", row.name, row.row, row.col)
        };
        out.push_str(&format!(
            "{}: {}\n",
            label,
            normalized_cell(row, ctx.elevated_min, ctx.display)
        ));
    }
    if ctx.display == TierDisplay::Threshold {
        out.push_str(&format!(
            "\nNot elevated values are shown as < {}.\n",
            ctx.elevated_min
        ));
    }

    out
}

fn format_tier_line(stat: &TierStat) -> String {
    format!(
        "{}: {} ({})\n",
        stat.name,
        stat.count,
        format_f64_4(stat.fraction)
    )
}

fn quality_statement(quality: CalibrationQuality) -> &'static str {
    match quality {
        CalibrationQuality::Full => "full (3rd and 20th strongest spots)",
        CalibrationQuality::ReducedLowRank => {
            "reduced (fewer than 20 measured spots; dimmest spot used as lower reference)"
        }
        CalibrationQuality::MinMaxFallback => {
            "low confidence (fewer than 3 measured spots; max/min OD used)"
        }
        CalibrationQuality::Degenerate => "not computable",
    }
}
