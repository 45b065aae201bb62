pub mod stage1_grid;
pub mod stage2_merge;
pub mod stage3_analyze;
pub mod stage4_normalize;
pub mod stage5_report;

use tracing::info;

use crate::error::GridError;
use crate::image::IntensityImage;
use crate::model::calibration::CalibrationProfile;
use crate::model::spot::{SpotCoordinate, SpotMeasurement};
use crate::settings::GridSettings;

use stage4_normalize::Stage4Output;

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub coordinates: Vec<SpotCoordinate>,
    pub measurements: Vec<SpotMeasurement>,
    pub normalized: Stage4Output,
}

/// Stages 1-4 on one image: lattice, overrides, sampling, calibration.
pub fn run_analysis(
    image: &IntensityImage<'_>,
    settings: &GridSettings,
    profile: &CalibrationProfile,
) -> Result<AnalysisOutput, GridError> {
    let params = &settings.params;
    params.validate()?;

    let lattice = stage1_grid::generate(image.h, image.w, params);
    let coordinates = stage2_merge::merge(&lattice, &settings.overrides, params.rows, params.cols)?;
    let measurements = stage3_analyze::analyze(
        image,
        &coordinates,
        params.rows,
        params.cols,
        params.spot_size,
    )?;
    let normalized = stage4_normalize::normalize(&measurements, profile);

    info!(
        rows = params.rows,
        cols = params.cols,
        overrides = settings.overrides.len(),
        "analysis complete"
    );

    Ok(AnalysisOutput {
        coordinates,
        measurements,
        normalized,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
