//! Min-max score normalization.
//!
//! Raw interpolated scores are rescaled onto a fixed target range so
//! results are comparable across requests (and convenient for
//! heat-mapping). Output order and length always match the input.

use crate::error::EngineError;

/// The inclusive target range scores are rescaled onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    /// Lower bound of the range; the minimum input maps here.
    pub min: f64,
    /// Upper bound of the range; the maximum input maps here.
    pub max: f64,
}

impl ScoreRange {
    /// Validate the range and return a copy.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidScoreRange`] when either bound is not
    /// finite or the range is not increasing.
    pub fn validate(self) -> Result<Self, EngineError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(self)
        } else {
            Err(EngineError::InvalidScoreRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// The midpoint of the range, used as the degenerate-input fallback.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "midpoint of the target range is a simple average"
    )]
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl Default for ScoreRange {
    /// The conventional `[0, 10]` heat-map range.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
        }
    }
}

/// Linearly rescale `values` onto `range`, preserving order and length.
///
/// The minimum input maps exactly to `range.min` and the maximum to
/// `range.max`. An empty input yields an empty output.
///
/// # Errors
/// Returns [`EngineError::DegenerateScores`] when every value is identical
/// (including a single-element input): the rescale would divide by zero, so
/// the condition is surfaced rather than silently coerced. Callers wanting
/// the documented fallback use [`normalize_or_midpoint`].
#[expect(
    clippy::float_arithmetic,
    reason = "min-max rescaling is floating-point by nature"
)]
pub fn normalize(values: &[f64], range: ScoreRange) -> Result<Vec<f64>, EngineError> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        return Err(EngineError::DegenerateScores {
            count: values.len(),
        });
    }
    let span = high - low;
    let width = range.max - range.min;
    Ok(values
        .iter()
        .map(|v| width * (v - low) / span + range.min)
        .collect())
}

/// Rescale `values` onto `range`, mapping degenerate input to the range
/// midpoint.
///
/// All-equal scores carry no ordering information, so every street is given
/// the neutral midpoint rather than an arbitrary extreme. The fallback is
/// logged because it usually signals sparse zone data.
#[must_use]
pub fn normalize_or_midpoint(values: &[f64], range: ScoreRange) -> Vec<f64> {
    match normalize(values, range) {
        Ok(scaled) => scaled,
        Err(_) => {
            log::warn!(
                "all {} interpolated scores identical; assigning range midpoint",
                values.len()
            );
            vec![range.midpoint(); values.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn maps_extremes_onto_the_range_bounds() {
        let scaled = normalize(&[2.0, 4.0, 6.0], ScoreRange::default()).expect("non-degenerate");
        assert_eq!(scaled, vec![0.0, 5.0, 10.0]);
    }

    #[rstest]
    fn preserves_input_order_and_length() {
        let values = [3.0, 1.0, 2.0, 1.5];
        let scaled = normalize(&values, ScoreRange::default()).expect("non-degenerate");
        assert_eq!(scaled.len(), values.len());
        assert_eq!(scaled[0], 10.0);
        assert_eq!(scaled[1], 0.0);
        assert!(scaled[2] > scaled[3]);
    }

    #[rstest]
    fn outputs_stay_within_the_range() {
        let values = [0.003, 0.17, 0.0041, 0.9, 0.44];
        let range = ScoreRange { min: 1.0, max: 5.0 };
        for v in normalize(&values, range).expect("non-degenerate") {
            assert!((range.min..=range.max).contains(&v));
        }
    }

    #[rstest]
    #[case(&[7.0])]
    #[case(&[2.5, 2.5, 2.5])]
    fn all_equal_input_is_degenerate(#[case] values: &[f64]) {
        let err = normalize(values, ScoreRange::default()).expect_err("degenerate");
        assert!(matches!(
            err,
            EngineError::DegenerateScores { count } if count == values.len()
        ));
    }

    #[rstest]
    fn degenerate_fallback_assigns_the_midpoint() {
        let scaled = normalize_or_midpoint(&[7.0, 7.0], ScoreRange::default());
        assert_eq!(scaled, vec![5.0, 5.0]);
    }

    #[rstest]
    fn empty_input_yields_empty_output() {
        assert!(normalize(&[], ScoreRange::default()).expect("empty ok").is_empty());
        assert!(normalize_or_midpoint(&[], ScoreRange::default()).is_empty());
    }

    #[rstest]
    #[case(ScoreRange { min: 10.0, max: 0.0 })]
    #[case(ScoreRange { min: 5.0, max: 5.0 })]
    #[case(ScoreRange { min: f64::NAN, max: 1.0 })]
    fn rejects_invalid_ranges(#[case] range: ScoreRange) {
        assert!(matches!(
            range.validate(),
            Err(EngineError::InvalidScoreRange { .. })
        ));
    }
}
