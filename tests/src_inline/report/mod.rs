use super::*;
use crate::lookup::{AnnotationTable, NoLookup, SpotAnnotation};
use crate::model::spot::{Reactivity, SpotMeasurement, SpotStatus};

fn spot(row: u32, col: u32, reactivity: Reactivity, status: SpotStatus) -> NormalizedSpot {
    NormalizedSpot {
        measurement: SpotMeasurement {
            row,
            col,
            x: 1.0,
            y: 2.0,
            mean_intensity: 100.0,
            pixel_count: 9,
            avg_od: 155.0,
            status,
        },
        od_rank: None,
        reactivity,
    }
}

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(median(&[]), 0.0);
}

#[test]
fn test_tier_stats_counts() {
    let spots = vec![
        spot(
            0,
            0,
            Reactivity::Computed {
                value: 25.0,
                tier: ReactivityTier::HighlyElevated,
            },
            SpotStatus::Measured,
        ),
        spot(
            0,
            1,
            Reactivity::Computed {
                value: 3.0,
                tier: ReactivityTier::NotElevated,
            },
            SpotStatus::Measured,
        ),
        spot(0, 2, Reactivity::Undefined, SpotStatus::OutOfBounds),
        spot(
            0,
            3,
            Reactivity::Computed {
                value: 1.0,
                tier: ReactivityTier::NotElevated,
            },
            SpotStatus::Measured,
        ),
    ];
    let stats = tier_stats(&spots);
    assert_eq!(stats[0].name, "highly_elevated");
    assert_eq!(stats[0].count, 1);
    assert_eq!(stats[1].count, 0);
    assert_eq!(stats[2].count, 2);
    assert!((stats[2].fraction - 0.5).abs() < 1e-12);
}

#[test]
fn test_result_rows_join_lookup() {
    let mut table = AnnotationTable::default();
    table.insert(
        0,
        1,
        SpotAnnotation {
            name: "Peanut".to_string(),
            latin_name: "Arachis hypogaea".to_string(),
            category: "Nuts".to_string(),
        },
    );
    let spots = vec![
        spot(0, 0, Reactivity::NotComputable, SpotStatus::Measured),
        spot(
            0,
            1,
            Reactivity::Computed {
                value: 8.0,
                tier: ReactivityTier::Elevated,
            },
            SpotStatus::Measured,
        ),
    ];
    let rows = build_result_rows(&spots, &table);
    assert_eq!(rows[0].name, "");
    assert_eq!(rows[0].tier, "Not computable");
    assert_eq!(rows[0].normalized, None);
    assert_eq!(rows[1].name, "Peanut");
    assert_eq!(rows[1].tier, "Elevated");
    assert_eq!(rows[1].status, "measured");
    assert_eq!(rows[0].reactivity_tier, None);
    assert_eq!(rows[1].reactivity_tier, Some(ReactivityTier::Elevated));

    let plain = build_result_rows(&spots, &NoLookup);
    assert_eq!(plain[1].name, "");
}

#[test]
fn test_normalized_cell_threshold_style() {
    let spots = vec![spot(
        0,
        0,
        Reactivity::Computed {
            value: 2.0,
            tier: ReactivityTier::NotElevated,
        },
        SpotStatus::Measured,
    )];
    let rows = build_result_rows(&spots, &NoLookup);
    assert_eq!(normalized_cell(&rows[0], 7.5, TierDisplay::Threshold), "< 7.5");
    assert_eq!(normalized_cell(&rows[0], 7.5, TierDisplay::Numeric), "2.00");
}

#[test]
fn test_normalized_cell_uses_carried_tier() {
    let spots = vec![
        spot(
            0,
            0,
            Reactivity::Computed {
                value: 7.5,
                tier: ReactivityTier::Elevated,
            },
            SpotStatus::Measured,
        ),
        spot(
            0,
            1,
            Reactivity::Computed {
                value: 3.0,
                tier: ReactivityTier::NotElevated,
            },
            SpotStatus::Measured,
        ),
        spot(0, 2, Reactivity::NotComputable, SpotStatus::Measured),
    ];
    let mut rows = build_result_rows(&spots, &NoLookup);
    // The label is display text only.
    rows[1].tier = "relabelled".to_string();
    assert_eq!(normalized_cell(&rows[0], 7.5, TierDisplay::Threshold), "7.50");
    assert_eq!(normalized_cell(&rows[1], 7.5, TierDisplay::Threshold), "< 7.5");
    assert_eq!(normalized_cell(&rows[2], 7.5, TierDisplay::Threshold), "NA");
}
