use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Operator-facing grid geometry. Field names are the persisted settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    pub rows: u32,
    pub cols: u32,
    pub h_spacing: f64,
    pub v_spacing: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    /// Degrees, counter-clockwise in image coordinates.
    pub rotation: f64,
    pub scale: f64,
    /// Spot radius in pixels.
    pub spot_size: f64,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 12,
            h_spacing: 40.0,
            v_spacing: 40.0,
            x_offset: 50.0,
            y_offset: 50.0,
            rotation: 0.0,
            scale: 1.0,
            spot_size: 8.0,
        }
    }
}

impl GridParameters {
    pub fn n_spots(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub fn flat_index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows < 1 {
            return Err(GridError::InvalidParameter("rows must be >= 1".to_string()));
        }
        if self.cols < 1 {
            return Err(GridError::InvalidParameter("cols must be >= 1".to_string()));
        }
        let reals = [
            ("h_spacing", self.h_spacing),
            ("v_spacing", self.v_spacing),
            ("x_offset", self.x_offset),
            ("y_offset", self.y_offset),
            ("rotation", self.rotation),
            ("scale", self.scale),
            ("spot_size", self.spot_size),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(GridError::InvalidParameter(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.scale <= 0.0 {
            return Err(GridError::InvalidParameter(format!(
                "scale must be > 0, got {}",
                self.scale
            )));
        }
        if self.spot_size <= 0.0 {
            return Err(GridError::InvalidParameter(format!(
                "spot_size must be > 0, got {}",
                self.spot_size
            )));
        }
        Ok(())
    }

    /// Lattice shape or grid origin moved; per-spot overrides no longer apply.
    pub fn invalidates_overrides(&self, next: &GridParameters) -> bool {
        self.rows != next.rows
            || self.cols != next.cols
            || self.x_offset != next.x_offset
            || self.y_offset != next.y_offset
    }

    /// Any field that feeds lattice generation changed.
    pub fn changes_geometry(&self, next: &GridParameters) -> bool {
        self.invalidates_overrides(next)
            || self.h_spacing != next.h_spacing
            || self.v_spacing != next.v_spacing
            || self.rotation != next.rotation
            || self.scale != next.scale
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/params.rs"]
mod tests;
