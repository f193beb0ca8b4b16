//! Street records and the derived, scored shapes the engine emits.

use geo::Point;

/// A street candidate with its centroid and owning zone.
///
/// The interpolator deliberately ignores zone membership and weighs every
/// zone sample against every street; `zone_id` only filters which streets
/// are scored in a request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetRecord {
    /// Human-readable street address.
    pub address: String,
    /// Street centroid in the frame's coordinate reference.
    pub centroid: Point<f64>,
    /// Identifier of the zone grouping the street belongs to.
    pub zone_id: u32,
}

/// A street with its interpolated, normalized busyness score.
///
/// Scores lie within the engine's configured range; they are transient
/// request outputs, never persisted by the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredStreet {
    /// The underlying street.
    pub street: StreetRecord,
    /// Normalized busyness score.
    pub score: f64,
}

/// A scored street annotated with its distance to the nearest event.
///
/// The final recommendation shape: ordered by score, then by distance to
/// the nearest event (farther first, to avoid duplicating an event's
/// foot-traffic draw).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedStreet {
    /// The underlying street.
    pub street: StreetRecord,
    /// Normalized busyness score.
    pub score: f64,
    /// Planar distance to the nearest event, in the streets' reference units.
    pub min_distance_to_event: f64,
}
