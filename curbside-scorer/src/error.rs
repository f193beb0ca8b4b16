//! Error types surfaced by the scoring pipeline.

use chrono::{DateTime, Utc};
use curbside_core::{GeometryError, SourceError};
use thiserror::Error;

/// Errors raised while estimating busyness or generating recommendations.
///
/// Every failure is deterministic for a given input, so none are retried
/// internally; the engine fails fast and returns no partial results. Each
/// variant names the pipeline step and inputs needed to diagnose it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Geometry decoding or reprojection failed during a pipeline step.
    #[error("geometry handling failed while loading {step}")]
    Geometry {
        /// Pipeline step that was materialising geometry.
        step: &'static str,
        /// Underlying geometry failure.
        #[source]
        source: GeometryError,
    },
    /// A data source failed during a pipeline step.
    #[error("failed to fetch {step}")]
    Source {
        /// Pipeline step that was fetching rows.
        step: &'static str,
        /// Underlying source failure.
        #[source]
        source: SourceError,
    },
    /// No zone busyness scores exist for the requested time bucket.
    ///
    /// Interpolation over an empty sample set is undefined; the condition is
    /// surfaced instead of returning a zero-filled surface.
    #[error("no zone busyness scores recorded for bucket {hour}")]
    NoZoneScores {
        /// The requested whole-hour bucket.
        hour: DateTime<Utc>,
    },
    /// No events overlap the requested service window.
    ///
    /// A nearest-event distance is undefined without events; the condition
    /// is surfaced instead of fabricating a distance.
    #[error("no events overlap the window {start}..={end}")]
    NoEvents {
        /// Window start.
        start: DateTime<Utc>,
        /// Window end.
        end: DateTime<Utc>,
    },
    /// Every input score was identical, leaving no spread to rescale.
    #[error("cannot rescale {count} identical scores onto a range")]
    DegenerateScores {
        /// Number of identical scores supplied.
        count: usize,
    },
    /// The configured score range is not a valid interval.
    #[error("score range [{min}, {max}] is not a finite, increasing interval")]
    InvalidScoreRange {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The configured magnitude-conditioning divisor is unusable.
    #[error("scale divisor {divisor} must be finite and positive")]
    InvalidScaleDivisor {
        /// Configured divisor.
        divisor: f64,
    },
}
