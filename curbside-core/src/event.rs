//! Scheduled events that compete for foot traffic.

use chrono::{DateTime, Utc};
use geo::Point;
use thiserror::Error;

/// Errors returned by [`EventRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event ended before it started.
    #[error("event {name:?} ends before it starts")]
    ReversedTimes {
        /// Name of the offending event.
        name: String,
    },
}

/// A scheduled event at a fixed location.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Point;
/// use curbside_core::EventRecord;
///
/// let start = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap();
/// let event = EventRecord::new("street fair", start, end, Point::new(0.0, 0.0))?;
/// assert_eq!(event.name, "street fair");
/// # Ok::<(), curbside_core::EventError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    /// Event name.
    pub name: String,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end; never before `start`.
    pub end: DateTime<Utc>,
    /// Event location.
    pub location: Point<f64>,
}

impl EventRecord {
    /// Validate and construct an event.
    ///
    /// # Errors
    /// Returns [`EventError::ReversedTimes`] when `start > end`.
    pub fn new(
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Point<f64>,
    ) -> Result<Self, EventError> {
        let name = name.into();
        if start > end {
            return Err(EventError::ReversedTimes { name });
        }
        Ok(Self {
            name,
            start,
            end,
            location,
        })
    }
}
