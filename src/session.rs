//! Host-owned editing state for one image.
//!
//! The session is the only place where the override invalidation policy is
//! applied. Every parameter edit goes through [`GridSession::update_parameters`],
//! which reports what was invalidated so the host decides when to redraw or
//! re-analyze.

use tracing::{debug, info};

use crate::error::GridError;
use crate::model::overrides::SpotOverrideMap;
use crate::model::params::GridParameters;
use crate::model::spot::SpotCoordinate;
use crate::pipeline::stage1_grid::generate;
use crate::pipeline::stage2_merge::merge;
use crate::settings::GridSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterChange {
    pub overrides_cleared: bool,
    pub lattice_regenerated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSession {
    image_height: usize,
    image_width: usize,
    params: GridParameters,
    overrides: SpotOverrideMap,
    lattice: Vec<SpotCoordinate>,
}

impl GridSession {
    pub fn new(
        image_height: usize,
        image_width: usize,
        params: GridParameters,
    ) -> Result<Self, GridError> {
        Self::from_settings(
            image_height,
            image_width,
            GridSettings {
                params,
                overrides: SpotOverrideMap::new(),
            },
        )
    }

    /// Restores a persisted session. Overrides are taken as stored.
    pub fn from_settings(
        image_height: usize,
        image_width: usize,
        settings: GridSettings,
    ) -> Result<Self, GridError> {
        settings.params.validate()?;
        let lattice = generate(image_height, image_width, &settings.params);
        Ok(Self {
            image_height,
            image_width,
            params: settings.params,
            overrides: settings.overrides,
            lattice,
        })
    }

    pub fn params(&self) -> &GridParameters {
        &self.params
    }

    pub fn overrides(&self) -> &SpotOverrideMap {
        &self.overrides
    }

    pub fn base_lattice(&self) -> &[SpotCoordinate] {
        &self.lattice
    }

    /// Replaces the parameters wholesale.
    ///
    /// Rows, cols, x-offset or y-offset changes clear every override; other
    /// geometry changes keep overrides and regenerate the base lattice. An
    /// invalid parameter set is rejected and leaves the session untouched.
    pub fn update_parameters(
        &mut self,
        next: GridParameters,
    ) -> Result<ParameterChange, GridError> {
        next.validate()?;

        let mut change = ParameterChange::default();
        if self.params.invalidates_overrides(&next) && !self.overrides.is_empty() {
            info!(
                cleared = self.overrides.len(),
                "grid shape or origin changed; clearing spot overrides"
            );
            self.overrides.clear();
            change.overrides_cleared = true;
        }
        let regenerate = self.params.changes_geometry(&next);
        self.params = next;
        if regenerate {
            self.lattice = generate(self.image_height, self.image_width, &self.params);
            change.lattice_regenerated = true;
        }
        debug!(?change, "parameters updated");
        Ok(change)
    }

    pub fn set_override(&mut self, row: u32, col: u32, x: f64, y: f64) {
        self.overrides.set_override(row, col, x, y);
    }

    pub fn clear_override(&mut self, row: u32, col: u32) -> bool {
        self.overrides.remove(row, col).is_some()
    }

    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
    }

    pub fn effective_coordinates(&self) -> Result<Vec<SpotCoordinate>, GridError> {
        merge(
            &self.lattice,
            &self.overrides,
            self.params.rows,
            self.params.cols,
        )
    }

    pub fn to_settings(&self) -> GridSettings {
        GridSettings {
            params: self.params,
            overrides: self.overrides.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
