use tracing::{debug, warn};

use crate::error::GridError;
use crate::image::IntensityImage;
use crate::model::spot::{SpotCoordinate, SpotMeasurement, SpotStatus};
use crate::simd;

/// Full-scale value of an 8-bit intensity channel.
pub const INTENSITY_MAX: f64 = 255.0;

/// Optical density proxy: `255 - mean`. Darker spots read higher and the
/// value is finite for every input, including a black spot.
#[inline]
pub fn optical_density(mean_intensity: f64) -> f64 {
    INTENSITY_MAX - mean_intensity
}

/// One measurement per coordinate, in input order.
///
/// Each spot is sampled over the pixels whose centers fall inside a disk of
/// `spot_radius` around the spot center, clipped to the image. A spot whose
/// clipped disk is empty is reported as `OutOfBounds` with zero intensity and
/// zero OD; it never aborts the batch.
pub fn analyze(
    image: &IntensityImage<'_>,
    coordinates: &[SpotCoordinate],
    rows: u32,
    cols: u32,
    spot_radius: f64,
) -> Result<Vec<SpotMeasurement>, GridError> {
    let expected = rows as usize * cols as usize;
    if coordinates.len() != expected {
        return Err(GridError::StructuralMismatch {
            stage: "analyze",
            expected,
            actual: coordinates.len(),
        });
    }

    let mut out = Vec::with_capacity(coordinates.len());
    let mut out_of_bounds = 0usize;
    for coord in coordinates {
        let (sum, count) = sample_disk(image, coord.x, coord.y, spot_radius);
        let m = if count == 0 {
            out_of_bounds += 1;
            SpotMeasurement {
                row: coord.row,
                col: coord.col,
                x: coord.x,
                y: coord.y,
                mean_intensity: 0.0,
                pixel_count: 0,
                avg_od: 0.0,
                status: SpotStatus::OutOfBounds,
            }
        } else {
            let mean = sum as f64 / count as f64;
            SpotMeasurement {
                row: coord.row,
                col: coord.col,
                x: coord.x,
                y: coord.y,
                mean_intensity: mean,
                pixel_count: count,
                avg_od: optical_density(mean),
                status: SpotStatus::Measured,
            }
        };
        out.push(m);
    }

    if out_of_bounds > 0 {
        warn!(
            out_of_bounds,
            total = coordinates.len(),
            "spots without image coverage reported as out of bounds"
        );
    }
    debug!(
        spots = out.len(),
        radius = spot_radius,
        backend = simd::backend_name(),
        "analyzed spots"
    );

    Ok(out)
}

/// Sum and count of pixels whose centers lie within `radius` of `(cx, cy)`.
fn sample_disk(image: &IntensityImage<'_>, cx: f64, cy: f64, radius: f64) -> (u64, u32) {
    if image.is_empty() || !cx.is_finite() || !cy.is_finite() || !(radius > 0.0) {
        return (0, 0);
    }

    let w = image.w as f64;
    let h = image.h as f64;
    let y_min = (cy - radius).ceil().max(0.0);
    let y_max = (cy + radius).floor().min(h - 1.0);
    if y_min > y_max {
        return (0, 0);
    }

    let r2 = radius * radius;
    let mut sum = 0u64;
    let mut count = 0u32;
    let mut py = y_min;
    while py <= y_max {
        let dy = py - cy;
        let half = (r2 - dy * dy).max(0.0).sqrt();
        let x0 = (cx - half).ceil().max(0.0);
        let x1 = (cx + half).floor().min(w - 1.0);
        if x0 <= x1 {
            let row = image.row(py as usize);
            let (a, b) = (x0 as usize, x1 as usize + 1);
            if let Some(span) = row.get(a..b) {
                sum += simd::sum_u8_u64(span);
                count += span.len() as u32;
            }
        }
        py += 1.0;
    }
    (sum, count)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_analyze.rs"]
mod tests;
