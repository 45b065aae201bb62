use super::*;
use crate::model::params::GridParameters;
use crate::pipeline::stage1_grid::generate;

fn lattice(rows: u32, cols: u32) -> Vec<SpotCoordinate> {
    let params = GridParameters {
        rows,
        cols,
        rotation: 4.0,
        ..GridParameters::default()
    };
    generate(600, 800, &params)
}

#[test]
fn test_empty_overrides_return_base() {
    let base = lattice(4, 5);
    let out = merge(&base, &SpotOverrideMap::new(), 4, 5).unwrap();
    assert_eq!(out, base);
}

#[test]
fn test_only_overridden_positions_differ() {
    let base = lattice(4, 5);
    let mut overrides = SpotOverrideMap::new();
    overrides.set_override(0, 0, 1.0, 2.0);
    overrides.set_override(2, 3, 300.0, 400.0);

    let out = merge(&base, &overrides, 4, 5).unwrap();
    assert_eq!(out.len(), base.len());

    let mut changed = Vec::new();
    for (i, (a, b)) in out.iter().zip(&base).enumerate() {
        if a != b {
            changed.push(i);
        }
    }
    assert_eq!(changed, vec![0, 2 * 5 + 3]);
    assert_eq!((out[0].x, out[0].y), (1.0, 2.0));
    assert_eq!((out[13].x, out[13].y), (300.0, 400.0));
    assert_eq!((out[13].row, out[13].col), (2, 3));
}

#[test]
fn test_stale_base_is_structural_mismatch() {
    let base = lattice(10, 10);
    let err = merge(&base, &SpotOverrideMap::new(), 12, 10).unwrap_err();
    assert_eq!(
        err,
        GridError::StructuralMismatch {
            stage: "merge",
            expected: 120,
            actual: 100,
        }
    );
}

#[test]
fn test_out_of_range_override_is_ignored() {
    let base = lattice(2, 2);
    let mut overrides = SpotOverrideMap::new();
    overrides.set_override(5, 5, 0.0, 0.0);
    let out = merge(&base, &overrides, 2, 2).unwrap();
    assert_eq!(out, base);
}
