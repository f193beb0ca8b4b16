//! Busyness estimation and location recommendation for street vendors.
//!
//! The crate provides two complementary capabilities over the domain types
//! in [`curbside_core`]:
//! - **Busyness estimation** samples zone scores for one whole-hour bucket,
//!   interpolates them onto street centroids with inverse-distance-squared
//!   weighting, and min-max normalizes the surface onto a fixed range.
//! - **Recommendation generation** combines the estimated surface with each
//!   street's distance to the nearest event in the service window, ranking
//!   busier, event-independent streets first.
//!
//! Both run synchronously per request over read-only sources; requests
//! share nothing mutable, and all failures are deterministic and surfaced
//! as typed [`EngineError`]s with no partial results.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use curbside_core::test_support::{MemoryEvents, MemoryStreets, MemoryZoneScores};
//! use curbside_core::{StreetRecord, ZoneFilter, ZoneScoreSample};
//! use curbside_scorer::BusynessEngine;
//! use geo::Point;
//!
//! let noon = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
//! let zones = MemoryZoneScores::new(vec![
//!     ZoneScoreSample { zone_id: 1, hour: noon, score: 10.0, centroid: Point::new(0.0, 0.0) },
//!     ZoneScoreSample { zone_id: 2, hour: noon, score: 2.0, centroid: Point::new(10.0, 10.0) },
//! ]);
//! let streets = MemoryStreets::new(vec![
//!     StreetRecord { address: "1 Dock Rd".into(), centroid: Point::new(1.0, 1.0), zone_id: 1 },
//!     StreetRecord { address: "9 Hill Ln".into(), centroid: Point::new(9.0, 9.0), zone_id: 2 },
//! ]);
//! let engine = BusynessEngine::new(zones, streets, MemoryEvents::default());
//!
//! let scored = engine.estimate_busyness(noon, ZoneFilter::All)?;
//! assert_eq!(scored.len(), 2);
//! assert!(scored.iter().any(|s| s.score == 10.0));
//! # Ok::<(), curbside_scorer::EngineError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Instant;

use chrono::{DateTime, Utc};
use curbside_core::{
    Crs, EventSource, GeometryFrame, RankedStreet, ScoredStreet, ServiceWindow, StreetRecord,
    StreetSource, ZoneFilter, ZoneScoreSet, ZoneScoreSource, truncate_to_hour,
};

mod error;
mod interpolate;
mod normalize;
mod proximity;
mod rank;

pub use error::EngineError;
pub use interpolate::interpolate;
pub use normalize::{ScoreRange, normalize, normalize_or_midpoint};
pub use proximity::min_event_distances;
pub use rank::rank;

/// Tuning knobs for the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Divisor applied to raw interpolated sums before normalization.
    ///
    /// Pure magnitude conditioning: monotonic and uniform, so ranking is
    /// unaffected. The default of `1e5` keeps degree-based sums in a
    /// numerically convenient range.
    pub scale_divisor: f64,
    /// Target range normalized scores are rescaled onto.
    pub score_range: ScoreRange,
}

impl EngineConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidScaleDivisor`] for a non-finite or
    /// non-positive divisor and [`EngineError::InvalidScoreRange`] for a
    /// malformed range.
    pub fn validate(self) -> Result<Self, EngineError> {
        if !self.scale_divisor.is_finite() || self.scale_divisor <= 0.0 {
            return Err(EngineError::InvalidScaleDivisor {
                divisor: self.scale_divisor,
            });
        }
        self.score_range.validate()?;
        Ok(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale_divisor: 100_000.0,
            score_range: ScoreRange::default(),
        }
    }
}

/// Street attributes carried through the scoring pipeline alongside the
/// geometry column.
#[derive(Debug, Clone)]
struct StreetMeta {
    address: String,
    zone_id: u32,
}

/// The busyness-estimation and recommendation engine over three read-only
/// sources.
///
/// One engine value serves any number of concurrent requests: it holds no
/// mutable state and its sources are only ever read.
#[derive(Debug)]
pub struct BusynessEngine<Z, S, E> {
    zone_scores: Z,
    streets: S,
    events: E,
    config: EngineConfig,
}

impl<Z, S, E> BusynessEngine<Z, S, E>
where
    Z: ZoneScoreSource,
    S: StreetSource,
    E: EventSource,
{
    /// Build an engine with the default configuration.
    pub fn new(zone_scores: Z, streets: S, events: E) -> Self {
        Self {
            zone_scores,
            streets,
            events,
            config: EngineConfig::default(),
        }
    }

    /// Build an engine with a custom configuration.
    ///
    /// # Errors
    /// Propagates the failures of [`EngineConfig::validate`].
    pub fn with_config(
        zone_scores: Z,
        streets: S,
        events: E,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let config = config.validate()?;
        Ok(Self {
            zone_scores,
            streets,
            events,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimate a normalized busyness score for every street passing the
    /// zone filter.
    ///
    /// `target_time` is truncated to its whole-hour bucket before sampling.
    /// The zone filter restricts which streets are scored; interpolation
    /// always weighs every zone sample for the bucket. An empty street set
    /// yields an empty result; a missing bucket is an explicit failure.
    ///
    /// # Errors
    /// Returns [`EngineError::NoZoneScores`] when the bucket holds no
    /// samples, plus geometry and source failures from materialisation.
    pub fn estimate_busyness(
        &self,
        target_time: DateTime<Utc>,
        zone: ZoneFilter,
    ) -> Result<Vec<ScoredStreet>, EngineError> {
        let started = Instant::now();
        let (frame, scores) = self.score_streets(truncate_to_hour(target_time), zone)?;
        let scored = into_scored(frame, scores);
        log::debug!(
            "estimated busyness for {} streets in {:?}",
            scored.len(),
            started.elapsed()
        );
        Ok(scored)
    }

    /// Rank street candidates for a vendor service window.
    ///
    /// Fetches events overlapping the window, estimates busyness at the
    /// window midpoint restricted to `zone`, annotates each street with its
    /// distance to the nearest event, and sorts by `(score descending,
    /// distance descending)`. `count` of `None` or `Some(0)` returns the
    /// full ranked sequence; otherwise the top `count` entries.
    ///
    /// # Errors
    /// Returns [`EngineError::NoEvents`] when nothing overlaps the window,
    /// [`EngineError::NoZoneScores`] when the midpoint bucket is missing,
    /// plus geometry and source failures from materialisation.
    pub fn generate_recommendations(
        &self,
        window: &ServiceWindow,
        zone: ZoneFilter,
        count: Option<usize>,
    ) -> Result<Vec<RankedStreet>, EngineError> {
        let started = Instant::now();
        let event_rows = self
            .events
            .events_in_window(window.start(), window.end())
            .map_err(|source| EngineError::Source {
                step: "events",
                source,
            })?;
        let events = GeometryFrame::decode(Crs::WGS84, event_rows, |row| (row.location, row.name))
            .map_err(|source| EngineError::Geometry {
                step: "events",
                source,
            })?;
        if events.is_empty() {
            return Err(EngineError::NoEvents {
                start: window.start(),
                end: window.end(),
            });
        }

        let (frame, scores) = self.score_streets(window.bucket(), zone)?;
        if frame.is_empty() {
            log::debug!("no streets passed the zone filter; nothing to rank");
            return Ok(Vec::new());
        }
        let distances = min_event_distances(&frame, events, window)?;

        let candidates = into_scored(frame, scores)
            .into_iter()
            .zip(distances)
            .map(|(scored, min_distance_to_event)| RankedStreet {
                street: scored.street,
                score: scored.score,
                min_distance_to_event,
            })
            .collect();
        let ranked = rank(candidates, count);
        log::debug!(
            "ranked {} street candidates in {:?}",
            ranked.len(),
            started.elapsed()
        );
        Ok(ranked)
    }

    /// Shared first half of both entry points: sample, interpolate,
    /// normalize.
    fn score_streets(
        &self,
        hour: DateTime<Utc>,
        zone: ZoneFilter,
    ) -> Result<(GeometryFrame<StreetMeta>, Vec<f64>), EngineError> {
        let score_rows = self
            .zone_scores
            .zone_scores(hour)
            .map_err(|source| EngineError::Source {
                step: "zone scores",
                source,
            })?;
        let samples =
            ZoneScoreSet::from_rows(hour, score_rows).map_err(|source| EngineError::Geometry {
                step: "zone scores",
                source,
            })?;
        if samples.is_empty() {
            return Err(EngineError::NoZoneScores { hour });
        }

        let street_rows = self
            .streets
            .streets(zone)
            .map_err(|source| EngineError::Source {
                step: "streets",
                source,
            })?;
        let frame = GeometryFrame::decode(Crs::WGS84, street_rows, |row| {
            (
                row.centroid,
                StreetMeta {
                    address: row.address,
                    zone_id: row.zone_id,
                },
            )
        })
        .map_err(|source| EngineError::Geometry {
            step: "streets",
            source,
        })?;
        if frame.is_empty() {
            return Ok((frame, Vec::new()));
        }

        let raw = interpolate(&frame, &samples, self.config.scale_divisor)?;
        let scores = normalize_or_midpoint(&raw, self.config.score_range);
        Ok((frame, scores))
    }
}

/// Zip a scored frame back into output records.
fn into_scored(frame: GeometryFrame<StreetMeta>, scores: Vec<f64>) -> Vec<ScoredStreet> {
    let (_, points, metas) = frame.into_parts();
    points
        .into_iter()
        .zip(metas)
        .zip(scores)
        .map(|((centroid, meta), score)| ScoredStreet {
            street: StreetRecord {
                address: meta.address,
                centroid,
                zone_id: meta.zone_id,
            },
            score,
        })
        .collect()
}
