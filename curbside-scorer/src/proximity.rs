//! Nearest-event distances for scored streets.
//!
//! Events fetched for a service window are reconciled into the streets'
//! coordinate reference, then each street receives the minimum planar
//! distance to any event. Distances are reported in the streets' reference
//! units (degrees for WGS84, metres for web mercator).

use curbside_core::{GeometryFrame, ServiceWindow};
use geo::{Distance, Euclidean, Point};
use rayon::prelude::*;

use crate::error::EngineError;

/// Compute each street's minimum distance to any event.
///
/// Events expressed in a different reference are reprojected into the
/// streets' reference first, mirroring how a geodata frame would be
/// re-coordinated before a distance join. Returns one distance per street
/// in the frame's row order.
///
/// # Errors
/// Returns [`EngineError::NoEvents`] when the event frame is empty (a
/// nearest distance is undefined, not zero or infinite) and
/// [`EngineError::Geometry`] when the references cannot be reconciled.
pub fn min_event_distances<A: Sync, B: Sync>(
    streets: &GeometryFrame<A>,
    events: GeometryFrame<B>,
    window: &ServiceWindow,
) -> Result<Vec<f64>, EngineError> {
    if events.is_empty() {
        return Err(EngineError::NoEvents {
            start: window.start(),
            end: window.end(),
        });
    }
    let events = events
        .reproject(streets.crs())
        .map_err(|source| EngineError::Geometry {
            step: "event reprojection",
            source,
        })?;
    Ok(streets
        .points()
        .par_iter()
        .map(|street| nearest(*street, events.points()))
        .collect())
}

/// Minimum planar distance from one street to a non-empty set of events.
fn nearest(street: Point<f64>, events: &[Point<f64>]) -> f64 {
    events
        .iter()
        .map(|event| Euclidean.distance(street, *event))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use curbside_core::Crs;
    use rstest::rstest;

    fn window() -> ServiceWindow {
        let at = |h: u32| -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 7, 1, h, 0, 0)
                .single()
                .expect("valid time")
        };
        ServiceWindow::new(at(11), at(15)).expect("ordered")
    }

    fn frame(crs: Crs, points: &[(f64, f64)]) -> GeometryFrame<usize> {
        let mut frame = GeometryFrame::new(crs);
        for (i, (x, y)) in points.iter().enumerate() {
            frame.push(Point::new(*x, *y), i);
        }
        frame
    }

    #[rstest]
    fn picks_the_nearest_event_per_street() {
        let streets = frame(Crs::WGS84, &[(0.0, 0.0), (10.0, 0.0)]);
        let events = frame(Crs::WGS84, &[(3.0, 0.0), (9.0, 0.0)]);
        let distances = min_event_distances(&streets, events, &window()).expect("events present");
        assert_eq!(distances, vec![3.0, 1.0]);
    }

    #[rstest]
    fn empty_events_are_missing_data() {
        let streets = frame(Crs::WGS84, &[(0.0, 0.0)]);
        let events = frame(Crs::WGS84, &[]);
        let err = min_event_distances(&streets, events, &window()).expect_err("no events");
        assert!(matches!(err, EngineError::NoEvents { .. }));
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "test checks the reprojected distance numerically"
    )]
    fn reprojects_events_into_the_streets_reference() {
        // One degree of longitude at the equator, expressed in web-mercator
        // metres; after reprojection the planar distance is 1 degree.
        let streets = frame(Crs::WGS84, &[(0.0, 0.0)]);
        let events = frame(Crs::WEB_MERCATOR, &[(111_319.490_793_273_57, 0.0)]);
        let distances = min_event_distances(&streets, events, &window()).expect("events present");
        assert!((distances[0] - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn irreconcilable_references_fail() {
        let streets = frame(Crs::from_epsg(27700), &[(0.0, 0.0)]);
        let events = frame(Crs::WGS84, &[(1.0, 1.0)]);
        let err = min_event_distances(&streets, events, &window()).expect_err("unsupported pair");
        assert!(matches!(
            err,
            EngineError::Geometry {
                step: "event reprojection",
                ..
            }
        ));
    }
}
