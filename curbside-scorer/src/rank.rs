//! Two-key recommendation ordering.
//!
//! Busier streets rank first; among equally busy streets, the one farther
//! from every event ranks first, steering vendors away from locations whose
//! foot traffic an event already captures. The sort is stable, so ties
//! beyond both keys keep their source order.

use std::cmp::Ordering;

use curbside_core::RankedStreet;

/// Sort recommendations by `(score desc, min_distance_to_event desc)` and
/// optionally truncate.
///
/// `count` of `None` or `Some(0)` returns the full ranked sequence (zero
/// means "no truncation", matching the engine's falsy-count convention);
/// a count at or beyond the length returns everything.
#[must_use]
pub fn rank(mut streets: Vec<RankedStreet>, count: Option<usize>) -> Vec<RankedStreet> {
    streets.sort_by(compare);
    if let Some(limit) = count.filter(|&n| n > 0) {
        streets.truncate(limit);
    }
    streets
}

/// Descending by score, then descending by distance to the nearest event.
///
/// Scores and distances are finite by construction; non-finite values
/// compare as equal rather than poisoning the order.
fn compare(a: &RankedStreet, b: &RankedStreet) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.min_distance_to_event
                .partial_cmp(&a.min_distance_to_event)
                .unwrap_or(Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use curbside_core::StreetRecord;
    use geo::Point;
    use rstest::rstest;

    fn entry(address: &str, score: f64, distance: f64) -> RankedStreet {
        RankedStreet {
            street: StreetRecord {
                address: address.to_owned(),
                centroid: Point::new(0.0, 0.0),
                zone_id: 1,
            },
            score,
            min_distance_to_event: distance,
        }
    }

    fn addresses(ranked: &[RankedStreet]) -> Vec<&str> {
        ranked.iter().map(|r| r.street.address.as_str()).collect()
    }

    #[rstest]
    fn orders_by_score_descending() {
        let ranked = rank(
            vec![entry("low", 2.0, 1.0), entry("high", 9.0, 1.0), entry("mid", 5.0, 1.0)],
            None,
        );
        assert_eq!(addresses(&ranked), vec!["high", "mid", "low"]);
    }

    #[rstest]
    fn ties_prefer_streets_farther_from_events() {
        let ranked = rank(
            vec![entry("near", 5.0, 0.1), entry("far", 5.0, 3.0)],
            None,
        );
        assert_eq!(addresses(&ranked), vec!["far", "near"]);
    }

    #[rstest]
    fn adjacent_pairs_satisfy_the_ranking_invariant() {
        let ranked = rank(
            vec![
                entry("a", 1.0, 9.0),
                entry("b", 7.0, 0.5),
                entry("c", 7.0, 4.0),
                entry("d", 3.0, 2.0),
            ],
            None,
        );
        for pair in ranked.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            assert!(
                first.score > second.score
                    || (first.score == second.score
                        && first.min_distance_to_event >= second.min_distance_to_event)
            );
        }
    }

    #[rstest]
    fn truncates_to_the_top_entries() {
        let ranked = rank(
            vec![entry("a", 1.0, 0.0), entry("b", 3.0, 0.0), entry("c", 2.0, 0.0)],
            Some(2),
        );
        assert_eq!(addresses(&ranked), vec!["b", "c"]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    #[case(Some(3))]
    #[case(Some(99))]
    fn none_zero_or_oversized_counts_return_everything(#[case] count: Option<usize>) {
        let ranked = rank(
            vec![entry("a", 1.0, 0.0), entry("b", 3.0, 0.0), entry("c", 2.0, 0.0)],
            count,
        );
        assert_eq!(ranked.len(), 3);
    }
}
