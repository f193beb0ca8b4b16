//! Read-only data-source traits.
//!
//! Persistence lives outside the engine. These traits describe the three
//! row shapes the engine consumes per request: zone busyness scores for one
//! time bucket, street candidates, and events overlapping a service window.
//! Geometry fields cross this boundary as WKT or EWKT text and are decoded
//! by the engine, not the source.
//!
//! Sources must be safely shareable across concurrent requests
//! (`Send + Sync`); the engine only ever reads from them.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Restrict which streets are scored in a request.
///
/// The filter applies to streets only; zone score samples always remain
/// global, so a street near a zone boundary is still influenced by its
/// neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneFilter {
    /// Score streets from every zone.
    #[default]
    All,
    /// Score only the streets belonging to one zone.
    Zone(u32),
}

impl ZoneFilter {
    /// Whether a street in `zone_id` passes the filter.
    #[must_use]
    pub const fn matches(self, zone_id: u32) -> bool {
        match self {
            Self::All => true,
            Self::Zone(wanted) => wanted == zone_id,
        }
    }
}

/// An opaque failure reported by a data source.
///
/// Sources wrap their own error types; the engine attaches the pipeline
/// step before surfacing them.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SourceError(Box<dyn std::error::Error + Send + Sync>);

impl SourceError {
    /// Wrap an arbitrary source failure.
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }
}

/// One zone busyness score row, geometry still encoded as text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneScoreRow {
    /// Identifier of the measured zone.
    pub zone_id: u32,
    /// Whole-hour bucket the score was recorded for.
    pub hour: DateTime<Utc>,
    /// Busyness score at the zone centroid.
    pub score: f64,
    /// Zone centroid as WKT or EWKT text.
    pub centroid: String,
}

/// One street candidate row, geometry still encoded as text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetRow {
    /// Human-readable street address.
    pub address: String,
    /// Street centroid as WKT or EWKT text.
    pub centroid: String,
    /// Identifier of the zone the street belongs to.
    pub zone_id: u32,
}

/// One event row, geometry still encoded as text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRow {
    /// Event name.
    pub name: String,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end.
    pub end: DateTime<Utc>,
    /// Event location as WKT or EWKT text.
    pub location: String,
}

/// Fetch zone busyness scores for a single time bucket.
pub trait ZoneScoreSource: Send + Sync {
    /// Return exactly the rows whose bucket equals `hour`.
    ///
    /// No interpolation across buckets: a missing hour yields an empty
    /// vector, which downstream interpolation reports as insufficient data.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the underlying store fails.
    fn zone_scores(&self, hour: DateTime<Utc>) -> Result<Vec<ZoneScoreRow>, SourceError>;
}

/// Fetch street candidates, optionally restricted to one zone.
pub trait StreetSource: Send + Sync {
    /// Return the streets passing `filter`.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the underlying store fails.
    fn streets(&self, filter: ZoneFilter) -> Result<Vec<StreetRow>, SourceError>;
}

/// Fetch events overlapping a service window.
pub trait EventSource: Send + Sync {
    /// Return events whose `start` or `end` falls inside the inclusive
    /// `[start, end]` range.
    ///
    /// An event spanning the whole window without either endpoint inside it
    /// is excluded.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the underlying store fails.
    fn events_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventRow>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ZoneFilter::All, 7, true)]
    #[case(ZoneFilter::Zone(7), 7, true)]
    #[case(ZoneFilter::Zone(7), 8, false)]
    fn zone_filter_matches(#[case] filter: ZoneFilter, #[case] zone: u32, #[case] expected: bool) {
        assert_eq!(filter.matches(zone), expected);
    }

    #[rstest]
    fn source_error_preserves_the_message() {
        let err = SourceError::new("connection reset");
        assert_eq!(err.to_string(), "connection reset");
    }
}
