//! Facade crate for the Curbside busyness engine.
//!
//! This crate re-exports the core domain types alongside the scoring
//! pipeline, so callers depend on a single crate.

#![forbid(unsafe_code)]

pub use curbside_core::{
    Crs, EventError, EventRecord, EventRow, EventSource, GeometryError, GeometryFrame,
    RankedStreet, ScoredStreet, ServiceWindow, SourceError, StreetRecord, StreetRow, StreetSource,
    WindowError, ZoneFilter, ZoneScoreRow, ZoneScoreSample, ZoneScoreSet, ZoneScoreSource,
    truncate_to_hour,
};
pub use curbside_scorer::{
    BusynessEngine, EngineConfig, EngineError, ScoreRange, interpolate, min_event_distances,
    normalize, normalize_or_midpoint, rank,
};

#[cfg(feature = "test-support")]
pub use curbside_core::test_support;
