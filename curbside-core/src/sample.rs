//! Zone busyness samples.
//!
//! A zone's busyness is recorded as a scalar score at its centroid, one
//! sample per whole-hour bucket. [`ZoneScoreSet`] materialises the rows for
//! a single bucket, decoding centroid text uniformly and tracking the shared
//! coordinate reference so the interpolator can refuse mismatched inputs.

use chrono::{DateTime, Utc};
use geo::Point;

use crate::crs::{Crs, GeometryError, decode_point};
use crate::source::ZoneScoreRow;

/// A single zone busyness measurement at one time bucket.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneScoreSample {
    /// Identifier of the measured zone.
    pub zone_id: u32,
    /// Whole-hour bucket the score was recorded for.
    pub hour: DateTime<Utc>,
    /// Busyness score at the zone centroid.
    pub score: f64,
    /// Zone centroid in the set's coordinate reference.
    pub centroid: Point<f64>,
}

/// All zone samples for one time bucket, in one coordinate reference.
///
/// An empty set is a meaningful "no data for this hour" condition that the
/// interpolator surfaces as an explicit failure instead of a zero-filled
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneScoreSet {
    hour: DateTime<Utc>,
    crs: Crs,
    samples: Vec<ZoneScoreSample>,
}

impl ZoneScoreSet {
    /// Decode source rows for `hour` into samples.
    ///
    /// Centroid text is WKT or EWKT; rows without an SRID default to WGS84.
    /// The first row fixes the set's reference.
    ///
    /// # Errors
    /// Returns [`GeometryError`] for malformed centroid text or when rows
    /// disagree on their coordinate reference.
    pub fn from_rows(
        hour: DateTime<Utc>,
        rows: impl IntoIterator<Item = ZoneScoreRow>,
    ) -> Result<Self, GeometryError> {
        let mut crs: Option<Crs> = None;
        let mut samples = Vec::new();
        for row in rows {
            let (centroid, row_crs) = decode_point(&row.centroid, Crs::WGS84)?;
            match crs {
                None => crs = Some(row_crs),
                Some(set_crs) if set_crs != row_crs => {
                    return Err(GeometryError::CrsMismatch {
                        left: set_crs,
                        right: row_crs,
                    });
                }
                Some(_) => {}
            }
            samples.push(ZoneScoreSample {
                zone_id: row.zone_id,
                hour: row.hour,
                score: row.score,
                centroid,
            });
        }
        Ok(Self {
            hour,
            crs: crs.unwrap_or(Crs::WGS84),
            samples,
        })
    }

    /// The time bucket this set was sampled for.
    #[must_use]
    pub const fn hour(&self) -> DateTime<Utc> {
        self.hour
    }

    /// The shared coordinate reference of every centroid.
    #[must_use]
    pub const fn crs(&self) -> Crs {
        self.crs
    }

    /// The decoded samples.
    #[must_use]
    pub fn samples(&self) -> &[ZoneScoreSample] {
        &self.samples
    }

    /// Number of samples in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no scores were recorded for the bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0)
            .single()
            .expect("valid time")
    }

    fn row(zone_id: u32, score: f64, centroid: &str) -> ZoneScoreRow {
        ZoneScoreRow {
            zone_id,
            hour: noon(),
            score,
            centroid: centroid.to_owned(),
        }
    }

    #[rstest]
    fn decodes_rows_into_samples() {
        let set = ZoneScoreSet::from_rows(
            noon(),
            vec![row(1, 10.0, "POINT(0 0)"), row(2, 3.5, "POINT(10 10)")],
        )
        .expect("valid rows");
        assert_eq!(set.len(), 2);
        assert_eq!(set.crs(), Crs::WGS84);
        assert_eq!(set.samples()[1].centroid, Point::new(10.0, 10.0));
        assert_eq!(set.samples()[1].score, 3.5);
    }

    #[rstest]
    fn empty_rows_yield_an_empty_set() {
        let set = ZoneScoreSet::from_rows(noon(), Vec::new()).expect("no rows");
        assert!(set.is_empty());
        assert_eq!(set.hour(), noon());
    }

    #[rstest]
    fn malformed_centroid_text_is_fatal() {
        let err = ZoneScoreSet::from_rows(noon(), vec![row(1, 1.0, "POINT(oops)")])
            .expect_err("malformed centroid");
        assert!(matches!(err, GeometryError::MalformedWkt { .. }));
    }

    #[rstest]
    fn mixed_references_are_rejected() {
        let err = ZoneScoreSet::from_rows(
            noon(),
            vec![
                row(1, 1.0, "SRID=4326;POINT(0 0)"),
                row(2, 1.0, "SRID=3857;POINT(0 0)"),
            ],
        )
        .expect_err("mixed srid");
        assert!(matches!(err, GeometryError::CrsMismatch { .. }));
    }
}
