use super::*;
use crate::lookup::{AnnotationTable, SpotAnnotation};
use crate::model::calibration::CalibrationQuality;
use crate::model::params::GridParameters;
use crate::model::spot::{SpotMeasurement, SpotStatus};
use crate::report::json::parse_analysis_record;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_spotgrid_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn measured(row: u32, col: u32, od: f64) -> SpotMeasurement {
    SpotMeasurement {
        row,
        col,
        x: 10.0 * col as f64,
        y: 10.0 * row as f64,
        mean_intensity: 255.0 - od,
        pixel_count: 21,
        avg_od: od,
        status: SpotStatus::Measured,
    }
}

fn spots() -> Vec<NormalizedSpot> {
    vec![
        NormalizedSpot {
            measurement: measured(0, 0, 120.0),
            od_rank: Some(0),
            reactivity: Reactivity::Computed {
                value: 24.0,
                tier: ReactivityTier::HighlyElevated,
            },
        },
        NormalizedSpot {
            measurement: measured(0, 1, 60.0),
            od_rank: Some(1),
            reactivity: Reactivity::Computed {
                value: 11.0,
                tier: ReactivityTier::Elevated,
            },
        },
        NormalizedSpot {
            measurement: measured(1, 0, 10.0),
            od_rank: Some(2),
            reactivity: Reactivity::Computed {
                value: 2.5,
                tier: ReactivityTier::NotElevated,
            },
        },
        NormalizedSpot {
            measurement: SpotMeasurement {
                mean_intensity: 0.0,
                pixel_count: 0,
                avg_od: 0.0,
                status: SpotStatus::OutOfBounds,
                ..measured(1, 1, 0.0)
            },
            od_rank: None,
            reactivity: Reactivity::Undefined,
        },
    ]
}

fn calibration() -> Calibration {
    Calibration {
        quality: CalibrationQuality::MinMaxFallback,
        n_candidates: 3,
        od_top: Some(120.0),
        od_low: Some(10.0),
        slope: Some(12.5 / 110.0),
        intercept: Some(20.0 - 12.5 / 110.0 * 120.0),
    }
}

fn lookup() -> AnnotationTable {
    let mut table = AnnotationTable::default();
    table.insert(
        0,
        0,
        SpotAnnotation {
            name: "Hazelnut".to_string(),
            latin_name: "Corylus avellana".to_string(),
            category: "Nuts".to_string(),
        },
    );
    table
}

#[test]
fn test_write_reports_outputs() {
    let dir = make_temp_dir();
    let settings = GridSettings {
        params: GridParameters {
            rows: 2,
            cols: 2,
            ..GridParameters::default()
        },
        ..GridSettings::default()
    };
    let spots = spots();
    let cal = calibration();
    let profile = CalibrationProfile::default_v1();
    let table = lookup();
    let input = Stage5Input {
        name: "plate-1".to_string(),
        description: None,
        image_filename: Some("plate-1.png".to_string()),
        image_width: 40,
        image_height: 40,
        created_at_unix: 42,
        settings: &settings,
        spots: &spots,
        calibration: &cal,
        profile: &profile,
        lookup: &table,
        display: TierDisplay::Threshold,
        tool_name: "kira-spotgrid".to_string(),
        tool_version: "0.0.0".to_string(),
    };
    write_reports(&input, &dir).unwrap();

    let tsv = std::fs::read_to_string(dir.join("spots.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("row\tcol\tname\tlatin_name"));
    assert!(lines[1].contains("Hazelnut"));
    assert!(lines[1].contains("Highly elevated"));
    assert!(lines[3].contains("< 7.5"));
    assert!(lines[4].ends_with("Undefined\tout_of_bounds"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["tool"], "kira-spotgrid");
    assert_eq!(summary["n_measured"], 3);
    assert_eq!(summary["n_out_of_bounds"], 1);
    assert_eq!(summary["calibration"]["quality"], "min_max_fallback");

    let report = std::fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(report.contains("Hazelnut (r0c0)"));
    assert!(report.contains("low confidence"));

    let record =
        parse_analysis_record(&std::fs::read_to_string(dir.join("analysis.json")).unwrap())
            .unwrap();
    assert_eq!(record.name, "plate-1");
    assert_eq!(record.results.len(), 4);
    assert_eq!(record.grid_params, settings);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_build_summary_counts() {
    let settings = GridSettings::default();
    let spots = spots();
    let cal = calibration();
    let profile = CalibrationProfile::default_v1();
    let table = lookup();
    let input = Stage5Input {
        name: "s".to_string(),
        description: None,
        image_filename: None,
        image_width: 1,
        image_height: 1,
        created_at_unix: 0,
        settings: &settings,
        spots: &spots,
        calibration: &cal,
        profile: &profile,
        lookup: &table,
        display: TierDisplay::Numeric,
        tool_name: "t".to_string(),
        tool_version: "v".to_string(),
    };
    let summary = build_summary(&input);
    assert_eq!(summary.n_spots, 4);
    assert_eq!(summary.n_measured, 3);
    assert_eq!(summary.n_not_computable, 0);
    assert_eq!(summary.od_median, 60.0);
    assert_eq!(summary.normalized_median, Some(11.0));
    assert_eq!(summary.tiers[0].count, 1);
}
