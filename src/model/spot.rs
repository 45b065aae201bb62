use serde::{Deserialize, Serialize};

use crate::model::tier::ReactivityTier;

/// Spot center in image pixel space, addressed by lattice index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotCoordinate {
    pub row: u32,
    pub col: u32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotStatus {
    Measured,
    /// The sampling disk covers no pixel center inside the image. This is a
    /// spot placed off the image, and equally an in-image spot whose radius is
    /// too small to enclose any pixel center. Both carry no signal.
    OutOfBounds,
}

impl SpotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SpotStatus::Measured => "measured",
            SpotStatus::OutOfBounds => "out_of_bounds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotMeasurement {
    pub row: u32,
    pub col: u32,
    pub x: f64,
    pub y: f64,
    pub mean_intensity: f64,
    pub pixel_count: u32,
    pub avg_od: f64,
    pub status: SpotStatus,
}

impl SpotMeasurement {
    pub fn is_measured(&self) -> bool {
        self.status == SpotStatus::Measured
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Reactivity {
    Computed { value: f64, tier: ReactivityTier },
    /// Calibration has no spread; no spot in the batch can be scored.
    NotComputable,
    /// The spot itself produced no signal.
    Undefined,
}

impl Reactivity {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reactivity::Computed { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn tier(&self) -> Option<ReactivityTier> {
        match self {
            Reactivity::Computed { tier, .. } => Some(*tier),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reactivity::Computed { tier, .. } => tier.label(),
            Reactivity::NotComputable => "Not computable",
            Reactivity::Undefined => "Undefined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSpot {
    pub measurement: SpotMeasurement,
    /// 0-based position in the OD-descending order of measured spots.
    pub od_rank: Option<u32>,
    pub reactivity: Reactivity,
}
