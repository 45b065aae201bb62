use tracing::{info, warn};

use crate::model::calibration::{Calibration, CalibrationProfile, CalibrationQuality};
use crate::model::spot::{NormalizedSpot, Reactivity, SpotMeasurement};
use crate::model::tier::ReactivityTier;

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub spots: Vec<NormalizedSpot>,
    pub calibration: Calibration,
}

/// Indices of measured spots ordered by OD descending. The sort is stable over
/// ascending spot index, so equal ODs keep their lattice order.
pub fn rank_by_od(measurements: &[SpotMeasurement]) -> Vec<usize> {
    let mut order: Vec<usize> = measurements
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_measured())
        .map(|(i, _)| i)
        .collect();
    order.sort_by(|&a, &b| measurements[b].avg_od.total_cmp(&measurements[a].avg_od));
    order
}

/// Picks the two reference ODs and fits the line through
/// `(od_top, top_value)` and `(od_low, low_value)`.
pub fn fit_calibration(
    measurements: &[SpotMeasurement],
    order: &[usize],
    profile: &CalibrationProfile,
) -> Calibration {
    let n = order.len();
    if n == 0 {
        return Calibration {
            quality: CalibrationQuality::Degenerate,
            n_candidates: 0,
            od_top: None,
            od_low: None,
            slope: None,
            intercept: None,
        };
    }

    let od_at = |rank: usize| measurements[order[rank]].avg_od;
    let (od_top, od_low, quality) = if n > profile.low_rank {
        (
            od_at(profile.top_rank),
            od_at(profile.low_rank),
            CalibrationQuality::Full,
        )
    } else if n > profile.top_rank {
        (
            od_at(profile.top_rank),
            od_at(n - 1),
            CalibrationQuality::ReducedLowRank,
        )
    } else {
        (od_at(0), od_at(n - 1), CalibrationQuality::MinMaxFallback)
    };

    let spread = od_top - od_low;
    let slope = (profile.top_value - profile.low_value) / spread;
    let intercept = profile.top_value - slope * od_top;
    if spread == 0.0 || !slope.is_finite() || !intercept.is_finite() {
        return Calibration {
            quality: CalibrationQuality::Degenerate,
            n_candidates: n,
            od_top: Some(od_top),
            od_low: Some(od_low),
            slope: None,
            intercept: None,
        };
    }

    Calibration {
        quality,
        n_candidates: n,
        od_top: Some(od_top),
        od_low: Some(od_low),
        slope: Some(slope),
        intercept: Some(intercept),
    }
}

pub fn normalize(measurements: &[SpotMeasurement], profile: &CalibrationProfile) -> Stage4Output {
    let order = rank_by_od(measurements);
    let calibration = fit_calibration(measurements, &order, profile);

    let mut ranks: Vec<Option<u32>> = vec![None; measurements.len()];
    for (rank, &idx) in order.iter().enumerate() {
        ranks[idx] = Some(rank as u32);
    }

    let spots = measurements
        .iter()
        .zip(ranks)
        .map(|(m, od_rank)| {
            let reactivity = if !m.is_measured() {
                Reactivity::Undefined
            } else {
                match calibration.apply(m.avg_od, profile) {
                    Some(value) => Reactivity::Computed {
                        value,
                        tier: ReactivityTier::classify(
                            value,
                            profile.low_value,
                            profile.top_value,
                        ),
                    },
                    None => Reactivity::NotComputable,
                }
            };
            NormalizedSpot {
                measurement: *m,
                od_rank,
                reactivity,
            }
        })
        .collect();

    match calibration.quality {
        CalibrationQuality::Full => {}
        CalibrationQuality::ReducedLowRank => warn!(
            n = calibration.n_candidates,
            "fewer measured spots than the lower reference rank; using the dimmest spot"
        ),
        CalibrationQuality::MinMaxFallback => warn!(
            n = calibration.n_candidates,
            "very small batch; calibrating on max/min OD, results are low confidence"
        ),
        CalibrationQuality::Degenerate => warn!(
            n = calibration.n_candidates,
            "reference ODs coincide; reactivity is not computable"
        ),
    }
    info!(
        quality = ?calibration.quality,
        od_top = ?calibration.od_top,
        od_low = ?calibration.od_low,
        slope = ?calibration.slope,
        intercept = ?calibration.intercept,
        "reactivity calibration"
    );

    Stage4Output { spots, calibration }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_normalize.rs"]
mod tests;
