use tracing::debug;

use crate::model::params::GridParameters;
use crate::model::spot::SpotCoordinate;

/// Ideal spot centers for `params`, row-major.
///
/// The unrotated lattice starts at the offsets and steps by spacing × scale;
/// it is then rotated about its own centroid. Points are never clamped to the
/// canvas, the canvas size only feeds the out-of-canvas debug count.
pub fn generate(
    image_height: usize,
    image_width: usize,
    params: &GridParameters,
) -> Vec<SpotCoordinate> {
    let rows = params.rows as usize;
    let cols = params.cols as usize;
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let base_x: Vec<f64> = (0..cols)
        .map(|c| params.x_offset + c as f64 * params.h_spacing * params.scale)
        .collect();
    let base_y: Vec<f64> = (0..rows)
        .map(|r| params.y_offset + r as f64 * params.v_spacing * params.scale)
        .collect();

    // Every column value appears once per row, so the lattice mean equals the
    // mean of the axis vectors.
    let cx = base_x.iter().sum::<f64>() / cols as f64;
    let cy = base_y.iter().sum::<f64>() / rows as f64;

    let rotation = rotation_terms(params.rotation);

    let mut out = Vec::with_capacity(rows * cols);
    for (r, &y) in base_y.iter().enumerate() {
        for (c, &x) in base_x.iter().enumerate() {
            let (x, y) = match rotation {
                Some((cos, sin)) => rotate_about(x, y, cx, cy, cos, sin),
                None => (x, y),
            };
            out.push(SpotCoordinate {
                row: r as u32,
                col: c as u32,
                x,
                y,
            });
        }
    }

    let outside = out
        .iter()
        .filter(|p| !inside_canvas(p.x, p.y, image_width, image_height))
        .count();
    debug!(
        rows,
        cols,
        rotation = params.rotation,
        outside,
        "generated spot lattice"
    );

    out
}

/// `None` for whole turns, which keeps 0° and 360° bit-exact.
fn rotation_terms(degrees: f64) -> Option<(f64, f64)> {
    if degrees.rem_euclid(360.0) == 0.0 {
        return None;
    }
    let theta = degrees.to_radians();
    Some((theta.cos(), theta.sin()))
}

#[inline]
fn rotate_about(x: f64, y: f64, cx: f64, cy: f64, cos: f64, sin: f64) -> (f64, f64) {
    let dx = x - cx;
    let dy = y - cy;
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}

#[inline]
fn inside_canvas(x: f64, y: f64, width: usize, height: usize) -> bool {
    x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_grid.rs"]
mod tests;
