use tracing::debug;

use crate::error::GridError;
use crate::model::overrides::SpotOverrideMap;
use crate::model::spot::SpotCoordinate;

/// Effective spot centers: the override for an index when one exists, the
/// generated lattice point otherwise. A base lattice of the wrong length is
/// stale and must be regenerated by the caller.
pub fn merge(
    base: &[SpotCoordinate],
    overrides: &SpotOverrideMap,
    rows: u32,
    cols: u32,
) -> Result<Vec<SpotCoordinate>, GridError> {
    let expected = rows as usize * cols as usize;
    if base.len() != expected {
        return Err(GridError::StructuralMismatch {
            stage: "merge",
            expected,
            actual: base.len(),
        });
    }

    let mut applied = 0usize;
    let mut out = Vec::with_capacity(expected);
    for row in 0..rows {
        for col in 0..cols {
            let idx = row as usize * cols as usize + col as usize;
            match overrides.get(row, col) {
                Some((x, y)) => {
                    applied += 1;
                    out.push(SpotCoordinate { row, col, x, y });
                }
                None => {
                    let p = base[idx];
                    out.push(SpotCoordinate { row, col, x: p.x, y: p.y });
                }
            }
        }
    }

    if applied != overrides.len() {
        debug!(
            applied,
            stored = overrides.len(),
            "some overrides address indices outside the lattice"
        );
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_merge.rs"]
mod tests;
