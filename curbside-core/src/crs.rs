//! Coordinate reference handling and geometry text decoding.
//!
//! Geometry crosses the engine boundary as WKT or EWKT text. [`decode_point`]
//! turns that text into a [`geo::Point`] plus the [`Crs`] it was expressed
//! in, defaulting to WGS84 when the text carries no SRID prefix.
//! [`project_point`] provides the closed-form spherical-mercator transforms
//! needed to reconcile EPSG:4326 and EPSG:3857 without a native PROJ
//! dependency; any other pair is reported as unsupported rather than
//! silently computed in mismatched units.

use geo::Point;
use std::fmt;
use thiserror::Error;
use wkt::TryFromWkt;

/// An EPSG-coded coordinate reference system identifier.
///
/// Only equality and the two supported transforms are interpreted; any EPSG
/// code can be carried so that mismatches are reported with full context.
///
/// # Examples
///
/// ```
/// use curbside_core::Crs;
///
/// let crs = Crs::parse("EPSG:4326")?;
/// assert_eq!(crs, Crs::WGS84);
/// assert_eq!(crs.to_string(), "EPSG:4326");
/// # Ok::<(), curbside_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs(u32);

impl Crs {
    /// Geographic longitude/latitude degrees, EPSG:4326. The default
    /// reference for geometry text without an SRID.
    pub const WGS84: Self = Self(4326);

    /// Spherical web-mercator metres, EPSG:3857.
    pub const WEB_MERCATOR: Self = Self(3857);

    /// Wrap a raw EPSG code.
    #[must_use]
    pub const fn from_epsg(code: u32) -> Self {
        Self(code)
    }

    /// The raw EPSG code.
    #[must_use]
    pub const fn epsg(self) -> u32 {
        self.0
    }

    /// Parse an `EPSG:nnnn` authority string.
    ///
    /// # Errors
    /// Returns [`GeometryError::MalformedSrid`] when the text is not an
    /// `EPSG:`-prefixed numeric code.
    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        text.strip_prefix("EPSG:")
            .and_then(|code| code.parse::<u32>().ok())
            .map(Self)
            .ok_or_else(|| GeometryError::MalformedSrid {
                text: text.to_owned(),
            })
    }
}

impl Default for Crs {
    /// WGS84, the reference assumed for geometry text without an SRID.
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Errors raised while decoding or reprojecting geometries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The geometry text could not be parsed as a WKT point.
    #[error("malformed geometry text {text:?}: {message}")]
    MalformedWkt {
        /// The offending geometry text.
        text: String,
        /// Parser diagnostic from the `wkt` crate.
        message: String,
    },
    /// An EWKT `SRID=` prefix or authority string could not be parsed.
    #[error("malformed spatial reference in {text:?}")]
    MalformedSrid {
        /// The offending spatial-reference text.
        text: String,
    },
    /// Two geometry collections were expressed in different references when
    /// one shared reference was required.
    #[error("coordinate reference mismatch: {left} vs {right}")]
    CrsMismatch {
        /// Reference of the first collection.
        left: Crs,
        /// Reference of the second collection.
        right: Crs,
    },
    /// No closed-form transform exists between the two references.
    #[error("no supported transform from {from} to {to}")]
    UnsupportedReprojection {
        /// Source reference.
        from: Crs,
        /// Target reference.
        to: Crs,
    },
}

/// Decode a WKT or EWKT point.
///
/// An EWKT `SRID=nnnn;` prefix selects the reference; plain WKT falls back
/// to `default_crs`. Malformed text is a data-integrity failure, never a
/// silently skipped row.
///
/// # Examples
///
/// ```
/// use curbside_core::{Crs, decode_point};
///
/// let (point, crs) = decode_point("SRID=3857;POINT(1113194.9 0)", Crs::WGS84)?;
/// assert_eq!(crs, Crs::WEB_MERCATOR);
/// assert!((point.x() - 1_113_194.9).abs() < 1e-9);
/// # Ok::<(), curbside_core::GeometryError>(())
/// ```
///
/// # Errors
/// Returns [`GeometryError::MalformedSrid`] for an unparsable prefix and
/// [`GeometryError::MalformedWkt`] when the body is not a 2D point.
pub fn decode_point(text: &str, default_crs: Crs) -> Result<(Point<f64>, Crs), GeometryError> {
    let (crs, body) = split_srid(text, default_crs)?;
    let point = Point::try_from_wkt_str(body.trim()).map_err(|e| GeometryError::MalformedWkt {
        text: text.to_owned(),
        message: e.to_string(),
    })?;
    Ok((point, crs))
}

/// Split an optional EWKT `SRID=nnnn;` prefix from the WKT body.
fn split_srid(text: &str, default_crs: Crs) -> Result<(Crs, &str), GeometryError> {
    let Some((prefix, body)) = text.split_once(';') else {
        return Ok((default_crs, text));
    };
    let srid = prefix
        .trim()
        .strip_prefix("SRID=")
        .and_then(|code| code.parse::<u32>().ok())
        .ok_or_else(|| GeometryError::MalformedSrid {
            text: text.to_owned(),
        })?;
    Ok((Crs::from_epsg(srid), body))
}

/// WGS84 semi-major axis in metres, the sphere radius used by EPSG:3857.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Transform a point between supported coordinate references.
///
/// Identity transforms are free. EPSG:4326 and EPSG:3857 are converted with
/// the closed-form spherical-mercator equations; every other pair is
/// rejected so the caller never computes distances in mixed units.
///
/// # Errors
/// Returns [`GeometryError::UnsupportedReprojection`] for any pair other
/// than 4326/3857.
pub fn project_point(point: Point<f64>, from: Crs, to: Crs) -> Result<Point<f64>, GeometryError> {
    if from == to {
        return Ok(point);
    }
    match (from, to) {
        (Crs::WGS84, Crs::WEB_MERCATOR) => Ok(wgs84_to_mercator(point)),
        (Crs::WEB_MERCATOR, Crs::WGS84) => Ok(mercator_to_wgs84(point)),
        _ => Err(GeometryError::UnsupportedReprojection { from, to }),
    }
}

fn wgs84_to_mercator(point: Point<f64>) -> Point<f64> {
    let x = EARTH_RADIUS_M * point.x().to_radians();
    let y = EARTH_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + point.y().to_radians() / 2.0)
            .tan()
            .ln();
    Point::new(x, y)
}

fn mercator_to_wgs84(point: Point<f64>) -> Point<f64> {
    let lon = (point.x() / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (point.y() / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2)
        .to_degrees();
    Point::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_plain_wkt_with_default_crs() {
        let (point, crs) = decode_point("POINT(1.5 -2.5)", Crs::WGS84).expect("valid wkt");
        assert_eq!(point, Point::new(1.5, -2.5));
        assert_eq!(crs, Crs::WGS84);
    }

    #[rstest]
    fn decodes_ewkt_srid_prefix() {
        let (point, crs) = decode_point("SRID=3857;POINT(10 20)", Crs::WGS84).expect("valid ewkt");
        assert_eq!(point, Point::new(10.0, 20.0));
        assert_eq!(crs, Crs::WEB_MERCATOR);
    }

    #[rstest]
    #[case("POINT(1)")]
    #[case("LINESTRING(0 0, 1 1)")]
    #[case("not geometry")]
    fn rejects_malformed_or_non_point_text(#[case] text: &str) {
        let err = decode_point(text, Crs::WGS84).expect_err("malformed text");
        assert!(matches!(err, GeometryError::MalformedWkt { .. }));
    }

    #[rstest]
    #[case("SRID=;POINT(0 0)")]
    #[case("SRID=abc;POINT(0 0)")]
    #[case("4326;POINT(0 0)")]
    fn rejects_malformed_srid_prefix(#[case] text: &str) {
        let err = decode_point(text, Crs::WGS84).expect_err("malformed srid");
        assert!(matches!(err, GeometryError::MalformedSrid { .. }));
    }

    #[rstest]
    fn parses_authority_strings() {
        assert_eq!(Crs::parse("EPSG:4326").expect("valid"), Crs::WGS84);
        assert!(Crs::parse("urn:ogc:def:crs:EPSG::4326").is_err());
    }

    #[rstest]
    fn projects_one_degree_of_longitude() {
        let projected = project_point(Point::new(1.0, 0.0), Crs::WGS84, Crs::WEB_MERCATOR)
            .expect("supported pair");
        assert!((projected.x() - 111_319.490_793_273_57).abs() < 1e-6);
        assert!(projected.y().abs() < 1e-6);
    }

    #[rstest]
    fn projection_round_trips() {
        let original = Point::new(13.405, 52.52);
        let there = project_point(original, Crs::WGS84, Crs::WEB_MERCATOR).expect("forward");
        let back = project_point(there, Crs::WEB_MERCATOR, Crs::WGS84).expect("inverse");
        assert!((back.x() - original.x()).abs() < 1e-9);
        assert!((back.y() - original.y()).abs() < 1e-9);
    }

    #[rstest]
    fn identity_projection_is_free_for_any_code() {
        let point = Point::new(3.0, 4.0);
        let unchanged =
            project_point(point, Crs::from_epsg(27700), Crs::from_epsg(27700)).expect("identity");
        assert_eq!(unchanged, point);
    }

    #[rstest]
    fn rejects_unsupported_pairs() {
        let err = project_point(Point::new(0.0, 0.0), Crs::from_epsg(27700), Crs::WGS84)
            .expect_err("unsupported");
        assert_eq!(
            err,
            GeometryError::UnsupportedReprojection {
                from: Crs::from_epsg(27700),
                to: Crs::WGS84,
            }
        );
    }
}
