use serde::{Deserialize, Serialize};

/// Two-point rank calibration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// 0-based rank (OD descending) of the upper reference spot.
    pub top_rank: usize,
    /// 0-based rank of the lower reference spot.
    pub low_rank: usize,
    /// Normalized value assigned to the upper reference; also the
    /// highly-elevated threshold.
    pub top_value: f64,
    /// Normalized value assigned to the lower reference; also the
    /// elevated threshold.
    pub low_value: f64,
}

impl CalibrationProfile {
    pub fn default_v1() -> Self {
        Self {
            top_rank: 2,
            low_rank: 19,
            top_value: 20.0,
            low_value: 7.5,
        }
    }
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationQuality {
    /// Both reference ranks present.
    Full,
    /// Fewer spots than `low_rank + 1`; the dimmest spot stands in for the
    /// lower reference.
    ReducedLowRank,
    /// Fewer spots than `top_rank + 1`; max and min OD are used. Low confidence.
    MinMaxFallback,
    /// Reference ODs coincide or no measurable spots; nothing is computable.
    Degenerate,
}

/// Fitted `normalized = slope * od + intercept`.
///
/// `slope` and `intercept` describe the line for reporting. Values are
/// evaluated by [`Calibration::apply`], which anchors the line at the reference
/// ODs so the references land exactly on the profile values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub quality: CalibrationQuality,
    pub n_candidates: usize,
    pub od_top: Option<f64>,
    pub od_low: Option<f64>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
}

impl Calibration {
    pub fn is_computable(&self) -> bool {
        self.slope.is_some() && self.intercept.is_some()
    }

    /// Normalized value for `od`, or `None` when the fit is degenerate.
    ///
    /// ODs at or above `od_top` map to `top_value` or more, ODs in
    /// `[od_low, od_top)` to `[low_value, top_value)`, and ODs below `od_low`
    /// to less than `low_value`, so tier boundaries coincide with the
    /// reference ODs regardless of rounding.
    pub fn apply(&self, od: f64, profile: &CalibrationProfile) -> Option<f64> {
        let (Some(od_top), Some(od_low), Some(slope), Some(_)) =
            (self.od_top, self.od_low, self.slope, self.intercept)
        else {
            return None;
        };

        let value = if od >= od_top {
            profile.top_value + (od - od_top) * slope
        } else if od >= od_low {
            (profile.low_value + (od - od_low) * slope).min(profile.top_value.next_down())
        } else {
            (profile.low_value + (od - od_low) * slope).min(profile.low_value.next_down())
        };
        Some(value)
    }
}
