use super::*;

#[test]
fn test_default_is_valid() {
    let params = GridParameters::default();
    assert!(params.validate().is_ok());
    assert_eq!(params.n_spots(), 120);
}

#[test]
fn test_flat_index_row_major() {
    let params = GridParameters {
        rows: 3,
        cols: 4,
        ..GridParameters::default()
    };
    assert_eq!(params.flat_index(0, 0), 0);
    assert_eq!(params.flat_index(0, 3), 3);
    assert_eq!(params.flat_index(2, 3), 11);
}

#[test]
fn test_validate_rejects_zero_rows_and_cols() {
    let mut params = GridParameters::default();
    params.rows = 0;
    assert!(matches!(
        params.validate(),
        Err(GridError::InvalidParameter(_))
    ));
    params.rows = 2;
    params.cols = 0;
    assert!(matches!(
        params.validate(),
        Err(GridError::InvalidParameter(_))
    ));
}

#[test]
fn test_validate_rejects_non_positive_scale_and_radius() {
    let mut params = GridParameters::default();
    params.scale = 0.0;
    assert!(params.validate().is_err());
    params.scale = 1.0;
    params.spot_size = -1.0;
    assert!(params.validate().is_err());
    params.spot_size = f64::NAN;
    assert!(params.validate().is_err());
}

#[test]
fn test_negative_offsets_are_allowed() {
    let params = GridParameters {
        x_offset: -20.0,
        y_offset: -5.5,
        rotation: 270.0,
        ..GridParameters::default()
    };
    assert!(params.validate().is_ok());
}

#[test]
fn test_override_invalidation_policy() {
    let base = GridParameters::default();

    let mut next = base;
    next.rows = 12;
    assert!(base.invalidates_overrides(&next));

    let mut next = base;
    next.x_offset += 1.0;
    assert!(base.invalidates_overrides(&next));

    let mut next = base;
    next.rotation = 3.0;
    next.scale = 1.2;
    next.h_spacing = 41.0;
    next.spot_size = 9.0;
    assert!(!base.invalidates_overrides(&next));
    assert!(base.changes_geometry(&next));

    let mut next = base;
    next.spot_size = 12.0;
    assert!(!base.changes_geometry(&next));
}
