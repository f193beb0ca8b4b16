//! Service-window arithmetic.
//!
//! A vendor service slot is a closed `[start, end]` time range. Its midpoint
//! selects the busyness time bucket and the full range selects overlapping
//! events. Every entry point takes explicit times; nothing in the engine
//! reads the wall clock, which keeps request handling deterministic under
//! test.

use chrono::{DateTime, Timelike, Utc};
use thiserror::Error;

/// Errors returned by [`ServiceWindow::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The window ended before it started.
    #[error("service window ends ({end}) before it starts ({start})")]
    Reversed {
        /// Requested window start.
        start: DateTime<Utc>,
        /// Requested window end.
        end: DateTime<Utc>,
    },
}

/// A validated `[start, end]` service time range.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use curbside_core::ServiceWindow;
///
/// let start = Utc.with_ymd_and_hms(2024, 7, 1, 11, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 7, 1, 15, 0, 0).unwrap();
/// let window = ServiceWindow::new(start, end)?;
/// assert_eq!(window.mid(), Utc.with_ymd_and_hms(2024, 7, 1, 13, 0, 0).unwrap());
/// # Ok::<(), curbside_core::WindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ServiceWindow {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`WindowError::Reversed`] when `start > end`. A zero-length
    /// window is allowed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive window start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive window end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The midpoint of the window, used to pick the busyness time bucket.
    #[must_use]
    pub fn mid(&self) -> DateTime<Utc> {
        self.start + (self.end - self.start) / 2
    }

    /// The busyness bucket for this window: the midpoint truncated to the
    /// hour.
    #[must_use]
    pub fn bucket(&self) -> DateTime<Utc> {
        truncate_to_hour(self.mid())
    }
}

/// Truncate a timestamp to the start of its hour.
///
/// Zone busyness scores are keyed by whole-hour buckets; lookups must use
/// the same discretisation.
#[must_use]
pub fn truncate_to_hour(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
