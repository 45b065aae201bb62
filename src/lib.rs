//! Spot-grid geometry, optical density extraction and rank-based reactivity
//! calibration for colorimetric microarray images.
//!
//! The stages in [`pipeline`] are pure functions over an [`crate::image::IntensityImage`]
//! and a [`settings::GridSettings`]. Loading, persistence and report writing are
//! kept at the edges ([`crate::image::load_intensity_image`], [`settings`],
//! [`pipeline::stage5_report`]).

pub mod error;
pub mod image;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod settings;
pub mod simd;

pub use error::GridError;
pub use model::calibration::{Calibration, CalibrationProfile, CalibrationQuality};
pub use model::overrides::SpotOverrideMap;
pub use model::params::GridParameters;
pub use model::spot::{NormalizedSpot, Reactivity, SpotCoordinate, SpotMeasurement, SpotStatus};
pub use model::tier::{ReactivityTier, TierDisplay};
pub use pipeline::{AnalysisOutput, run_analysis};
pub use session::{GridSession, ParameterChange};
pub use settings::GridSettings;
