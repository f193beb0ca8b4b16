//! Inverse-distance-squared busyness interpolation.
//!
//! Each street's raw score is the sum of every zone sample's score divided
//! by the squared distance between street and zone centroid. Influence
//! therefore decays quadratically with distance: nearby zones dominate
//! without needing a bounded kernel radius. The street's own zone
//! membership is deliberately ignored; every sample contributes to every
//! street.

use curbside_core::{GeometryError, GeometryFrame, ZoneScoreSample, ZoneScoreSet};
use geo::{Distance, Euclidean, Point};
use rayon::prelude::*;

use crate::error::EngineError;

/// Distance floor substituted when a street coincides exactly with a zone
/// centroid, where the inverse-square weight is otherwise undefined. Keeps
/// the weight large but finite and deterministic.
pub(crate) const MIN_DISTANCE: f64 = 1e-9;

/// Interpolate a raw busyness score for every street in the frame.
///
/// Scores are conditioned by `scale_divisor` before being returned so the
/// normalizer receives numerically convenient magnitudes; the division is
/// monotonic and applied uniformly, so ranking is unaffected.
///
/// Returns one score per street, in the frame's row order.
///
/// # Errors
/// Returns [`EngineError::NoZoneScores`] when the sample set is empty and
/// [`EngineError::Geometry`] when streets and samples are expressed in
/// different coordinate references.
#[expect(
    clippy::float_arithmetic,
    reason = "inverse-distance weighting is floating-point by nature"
)]
pub fn interpolate<A: Sync>(
    streets: &GeometryFrame<A>,
    samples: &ZoneScoreSet,
    scale_divisor: f64,
) -> Result<Vec<f64>, EngineError> {
    if samples.is_empty() {
        return Err(EngineError::NoZoneScores {
            hour: samples.hour(),
        });
    }
    if streets.crs() != samples.crs() {
        return Err(EngineError::Geometry {
            step: "interpolation inputs",
            source: GeometryError::CrsMismatch {
                left: streets.crs(),
                right: samples.crs(),
            },
        });
    }
    Ok(streets
        .points()
        .par_iter()
        .map(|point| raw_score(*point, samples.samples()) / scale_divisor)
        .collect())
}

/// Sum of inverse-distance-squared weighted sample scores for one point.
#[expect(
    clippy::float_arithmetic,
    reason = "inverse-distance weighting is floating-point by nature"
)]
fn raw_score(point: Point<f64>, samples: &[ZoneScoreSample]) -> f64 {
    samples
        .iter()
        .map(|sample| {
            let distance = Euclidean.distance(point, sample.centroid).max(MIN_DISTANCE);
            sample.score / (distance * distance)
        })
        .sum()
}
