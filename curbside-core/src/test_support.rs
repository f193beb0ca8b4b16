//! Test-only, in-memory source implementations used by unit and
//! integration tests.
//!
//! Each source holds validated domain records and encodes geometry back to
//! EWKT text, exercising the same decode path a real store would feed.

use chrono::{DateTime, Utc};
use geo::Point;
use wkt::ToWkt;

use crate::crs::Crs;
use crate::event::EventRecord;
use crate::sample::ZoneScoreSample;
use crate::source::{
    EventRow, EventSource, SourceError, StreetRow, StreetSource, ZoneFilter, ZoneScoreRow,
    ZoneScoreSource,
};
use crate::street::StreetRecord;

fn ewkt(point: Point<f64>, crs: Crs) -> String {
    format!("SRID={};{}", crs.epsg(), point.wkt_string())
}

/// In-memory `ZoneScoreSource` performing a linear scan over its samples.
#[derive(Debug, Default)]
pub struct MemoryZoneScores {
    samples: Vec<ZoneScoreSample>,
    crs: Crs,
}

impl MemoryZoneScores {
    /// Create a source over WGS84 samples.
    pub fn new(samples: impl IntoIterator<Item = ZoneScoreSample>) -> Self {
        Self::with_crs(samples, Crs::WGS84)
    }

    /// Create a source encoding centroids in the given reference.
    pub fn with_crs(samples: impl IntoIterator<Item = ZoneScoreSample>, crs: Crs) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            crs,
        }
    }
}

impl ZoneScoreSource for MemoryZoneScores {
    fn zone_scores(&self, hour: DateTime<Utc>) -> Result<Vec<ZoneScoreRow>, SourceError> {
        Ok(self
            .samples
            .iter()
            .filter(|s| s.hour == hour)
            .map(|s| ZoneScoreRow {
                zone_id: s.zone_id,
                hour: s.hour,
                score: s.score,
                centroid: ewkt(s.centroid, self.crs),
            })
            .collect())
    }
}

/// In-memory `StreetSource` performing a linear scan over its records.
#[derive(Debug, Default)]
pub struct MemoryStreets {
    records: Vec<StreetRecord>,
    crs: Crs,
}

impl MemoryStreets {
    /// Create a source over WGS84 streets.
    pub fn new(records: impl IntoIterator<Item = StreetRecord>) -> Self {
        Self::with_crs(records, Crs::WGS84)
    }

    /// Create a source encoding centroids in the given reference.
    pub fn with_crs(records: impl IntoIterator<Item = StreetRecord>, crs: Crs) -> Self {
        Self {
            records: records.into_iter().collect(),
            crs,
        }
    }
}

impl StreetSource for MemoryStreets {
    fn streets(&self, filter: ZoneFilter) -> Result<Vec<StreetRow>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r.zone_id))
            .map(|r| StreetRow {
                address: r.address.clone(),
                centroid: ewkt(r.centroid, self.crs),
                zone_id: r.zone_id,
            })
            .collect())
    }
}

/// In-memory `EventSource` applying the inclusive endpoint-in-window rule.
#[derive(Debug, Default)]
pub struct MemoryEvents {
    records: Vec<EventRecord>,
    crs: Crs,
}

impl MemoryEvents {
    /// Create a source over WGS84 events.
    pub fn new(records: impl IntoIterator<Item = EventRecord>) -> Self {
        Self::with_crs(records, Crs::WGS84)
    }

    /// Create a source encoding locations in the given reference.
    pub fn with_crs(records: impl IntoIterator<Item = EventRecord>, crs: Crs) -> Self {
        Self {
            records: records.into_iter().collect(),
            crs,
        }
    }
}

impl EventSource for MemoryEvents {
    fn events_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventRow>, SourceError> {
        let inside = |at: DateTime<Utc>| at >= start && at <= end;
        Ok(self
            .records
            .iter()
            // An endpoint inside the window qualifies; merely spanning it
            // does not.
            .filter(|r| inside(r.start) || inside(r.end))
            .map(|r| EventRow {
                name: r.name.clone(),
                start: r.start,
                end: r.end,
                location: ewkt(r.location, self.crs),
            })
            .collect())
    }
}
