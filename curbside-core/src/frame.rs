//! Columnar geometry frames.
//!
//! A [`GeometryFrame`] pairs a column of 2D points with a column of
//! per-entity attributes, all expressed in one shared [`Crs`]. Frames are
//! built with a uniform decode step applied to every source row, so call
//! sites never loop over rows converting geometry text by hand. The
//! columnar layout keeps the per-request interpolation and proximity loops
//! operating on plain point slices.

use geo::Point;

use crate::crs::{Crs, GeometryError, decode_point, project_point};

/// An ordered collection of point geometries with scalar attributes,
/// carried in a single coordinate reference.
///
/// Rows keep their insertion order; downstream ranking relies on it for
/// stable tie-breaks.
///
/// # Examples
///
/// ```
/// use curbside_core::{Crs, GeometryFrame};
///
/// let frame = GeometryFrame::decode(
///     Crs::WGS84,
///     vec![("POINT(0 0)".to_owned(), "city hall"), ("POINT(1 1)".to_owned(), "market")],
///     |(text, label)| (text, label),
/// )?;
/// assert_eq!(frame.len(), 2);
/// assert_eq!(frame.crs(), Crs::WGS84);
/// # Ok::<(), curbside_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFrame<A> {
    crs: Crs,
    points: Vec<Point<f64>>,
    attrs: Vec<A>,
}

impl<A> GeometryFrame<A> {
    /// Create an empty frame in the given reference.
    #[must_use]
    pub const fn new(crs: Crs) -> Self {
        Self {
            crs,
            points: Vec::new(),
            attrs: Vec::new(),
        }
    }

    /// Build a frame by decoding the geometry text of every row.
    ///
    /// `split` separates each row into its geometry text and attribute
    /// payload. The first decoded row fixes the frame's reference (falling
    /// back to `default_crs` for plain WKT or an empty input); any later row
    /// declaring a different reference is a data-integrity failure.
    ///
    /// # Errors
    /// Propagates [`GeometryError`] for malformed geometry text and returns
    /// [`GeometryError::CrsMismatch`] when rows disagree on their reference.
    pub fn decode<R, F>(
        default_crs: Crs,
        rows: impl IntoIterator<Item = R>,
        mut split: F,
    ) -> Result<Self, GeometryError>
    where
        F: FnMut(R) -> (String, A),
    {
        let rows = rows.into_iter();
        let mut points = Vec::with_capacity(rows.size_hint().0);
        let mut attrs = Vec::with_capacity(points.capacity());
        let mut crs: Option<Crs> = None;
        for row in rows {
            let (text, attr) = split(row);
            let (point, row_crs) = decode_point(&text, default_crs)?;
            match crs {
                None => crs = Some(row_crs),
                Some(frame_crs) if frame_crs != row_crs => {
                    return Err(GeometryError::CrsMismatch {
                        left: frame_crs,
                        right: row_crs,
                    });
                }
                Some(_) => {}
            }
            points.push(point);
            attrs.push(attr);
        }
        Ok(Self {
            crs: crs.unwrap_or(default_crs),
            points,
            attrs,
        })
    }

    /// Append a row in the frame's own reference.
    pub fn push(&mut self, point: Point<f64>, attrs: A) {
        self.points.push(point);
        self.attrs.push(attrs);
    }

    /// The shared coordinate reference of every row.
    #[must_use]
    pub const fn crs(&self) -> Crs {
        self.crs
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the frame holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The geometry column.
    #[must_use]
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    /// The attribute column.
    #[must_use]
    pub fn attrs(&self) -> &[A] {
        &self.attrs
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point<f64>, &A)> {
        self.points.iter().zip(self.attrs.iter())
    }

    /// Consume the frame, yielding its columns.
    #[must_use]
    pub fn into_parts(self) -> (Crs, Vec<Point<f64>>, Vec<A>) {
        (self.crs, self.points, self.attrs)
    }

    /// Reproject every row into `to`, consuming the frame.
    ///
    /// # Errors
    /// Returns [`GeometryError::UnsupportedReprojection`] when no transform
    /// exists between the frame's reference and `to`.
    pub fn reproject(self, to: Crs) -> Result<Self, GeometryError> {
        if self.crs == to {
            return Ok(self);
        }
        let points = self
            .points
            .into_iter()
            .map(|p| project_point(p, self.crs, to))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            crs: to,
            points,
            attrs: self.attrs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn labelled_rows(texts: &[&str]) -> Vec<(String, usize)> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| ((*t).to_owned(), i))
            .collect()
    }

    #[rstest]
    fn preserves_insertion_order() {
        let frame = GeometryFrame::decode(
            Crs::WGS84,
            labelled_rows(&["POINT(0 0)", "POINT(2 2)", "POINT(1 1)"]),
            |row| row,
        )
        .expect("valid rows");
        assert_eq!(frame.attrs(), &[0, 1, 2]);
        assert_eq!(frame.points()[1], Point::new(2.0, 2.0));
    }

    #[rstest]
    fn first_row_fixes_the_reference() {
        let frame = GeometryFrame::decode(
            Crs::WGS84,
            labelled_rows(&["SRID=3857;POINT(0 0)", "SRID=3857;POINT(1 1)"]),
            |row| row,
        )
        .expect("uniform srid");
        assert_eq!(frame.crs(), Crs::WEB_MERCATOR);
    }

    #[rstest]
    fn rejects_mixed_references() {
        let err = GeometryFrame::decode(
            Crs::WGS84,
            labelled_rows(&["SRID=4326;POINT(0 0)", "SRID=3857;POINT(1 1)"]),
            |row| row,
        )
        .expect_err("mixed srid");
        assert_eq!(
            err,
            GeometryError::CrsMismatch {
                left: Crs::WGS84,
                right: Crs::WEB_MERCATOR,
            }
        );
    }

    #[rstest]
    fn empty_input_uses_the_default_reference() {
        let frame = GeometryFrame::<()>::decode(Crs::WEB_MERCATOR, Vec::<(String, ())>::new(), |r| r)
            .expect("empty rows");
        assert!(frame.is_empty());
        assert_eq!(frame.crs(), Crs::WEB_MERCATOR);
    }

    #[rstest]
    fn reprojects_points_and_updates_reference() {
        let frame =
            GeometryFrame::decode(Crs::WGS84, labelled_rows(&["POINT(1 0)"]), |row| row)
                .expect("valid rows");
        let projected = frame.reproject(Crs::WEB_MERCATOR).expect("supported pair");
        assert_eq!(projected.crs(), Crs::WEB_MERCATOR);
        assert!((projected.points()[0].x() - 111_319.490_793_273_57).abs() < 1e-6);
    }

    #[rstest]
    fn reprojection_to_same_reference_is_identity() {
        let frame =
            GeometryFrame::decode(Crs::WGS84, labelled_rows(&["POINT(1 0)"]), |row| row)
                .expect("valid rows");
        let same = frame.clone().reproject(Crs::WGS84).expect("identity");
        assert_eq!(same, frame);
    }
}
