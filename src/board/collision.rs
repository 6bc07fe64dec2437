//! Drop-target resolution.
//!
//! Stateless: the host hands in the probe rectangle and the candidate
//! rectangles for the current gesture, and the resolver picks the single best
//! target by corner distance. Identical inputs always produce identical
//! output, regardless of call order or prior sessions.

use ordered_float::NotNan;

use super::store::ColumnId;
use super::Options;
use crate::geometry::Rect;

/// What a candidate rectangle stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateKind<Id> {
    /// An item currently rendered on the board.
    Item(Id),
    /// The trailing sentinel region of a column.
    ///
    /// One per column, always present, so that an empty column and the space
    /// past a column's last item stay targetable.
    ColumnEnd(ColumnId),
}

/// A rectangle the probe may snap to.
///
/// The host supplies these in its stable scan order: columns left to right,
/// items top to bottom, each column's sentinel after its last item.
#[derive(Debug, Clone, PartialEq)]
pub struct DropCandidate<Id> {
    pub rect: Rect,
    pub kind: CandidateKind<Id>,
}

/// Which side of an item a drop lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEdge {
    /// Take the item's position, pushing it and everything below down.
    Before,
    /// Slot in just past the item.
    After,
}

/// A resolved drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget<Id> {
    /// Insert relative to an existing item, in that item's column.
    Item { id: Id, edge: InsertEdge },
    /// Append to the end of a column.
    ColumnEnd(ColumnId),
}

/// Resolves a probe against the candidate set.
///
/// Scores each candidate by summing, for every probe corner, the distance to
/// the nearest candidate corner. The lowest score wins; ties prefer a
/// candidate containing the probe's center, then the earliest candidate in
/// the host's scan order. Returns `None` when the winner is still farther
/// than [`Options::max_target_distance`] per corner on average, or when the
/// candidate set is empty.
pub fn resolve<Id: Clone>(
    probe: Rect,
    candidates: &[DropCandidate<Id>],
    options: &Options,
) -> Option<DropTarget<Id>> {
    let center = probe.center();

    let mut best: Option<(NotNan<f64>, bool, &DropCandidate<Id>)> = None;
    for candidate in candidates {
        let score = NotNan::new(corner_score(&probe, &candidate.rect)).unwrap();
        let contains_center = candidate.rect.contains(center);

        let better = match &best {
            None => true,
            Some((best_score, best_contains, _)) => {
                score < *best_score || (score == *best_score && contains_center && !best_contains)
            }
        };
        if better {
            best = Some((score, contains_center, candidate));
        }
    }

    let (score, _, candidate) = best?;
    if score.into_inner() > options.max_target_distance * 4. {
        return None;
    }

    Some(match &candidate.kind {
        CandidateKind::Item(id) => {
            // The vertical half of the item under the probe's center picks
            // the side; dead-center counts as the lower half.
            let edge = if center.y < candidate.rect.center().y {
                InsertEdge::Before
            } else {
                InsertEdge::After
            };
            DropTarget::Item {
                id: id.clone(),
                edge,
            }
        }
        CandidateKind::ColumnEnd(column) => DropTarget::ColumnEnd(*column),
    })
}

/// Sum over the probe's corners of the distance to the nearest candidate
/// corner. Zero for congruent rectangles.
fn corner_score(probe: &Rect, candidate: &Rect) -> f64 {
    let candidate_corners = candidate.corners();
    probe
        .corners()
        .iter()
        .map(|corner| {
            candidate_corners
                .iter()
                .map(|other| corner.distance(*other))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn item(id: usize, rect: Rect) -> DropCandidate<usize> {
        DropCandidate {
            rect,
            kind: CandidateKind::Item(id),
        }
    }

    fn column_end(column: u64, rect: Rect) -> DropCandidate<usize> {
        DropCandidate {
            rect,
            kind: CandidateKind::ColumnEnd(ColumnId::new(column)),
        }
    }

    #[test]
    fn congruent_rect_scores_zero() {
        let rect = Rect::new(40., 60., 100., 50.);
        assert_relative_eq!(corner_score(&rect, &rect), 0.);
    }

    #[test]
    fn overlapping_beats_distant() {
        let candidates = [
            item(1, Rect::new(0., 0., 100., 50.)),
            item(2, Rect::new(0., 300., 100., 50.)),
        ];
        let target = resolve(Rect::new(10., 5., 100., 50.), &candidates, &Options::default());
        assert!(matches!(target, Some(DropTarget::Item { id: 1, .. })));
    }

    #[test]
    fn empty_candidate_set_resolves_to_none() {
        let candidates: [DropCandidate<usize>; 0] = [];
        let target = resolve(Rect::new(0., 0., 100., 50.), &candidates, &Options::default());
        assert_eq!(target, None);
    }

    #[test]
    fn distant_probe_resolves_to_none() {
        let candidates = [item(1, Rect::new(0., 0., 100., 50.))];
        let target = resolve(
            Rect::new(10_000., 10_000., 100., 50.),
            &candidates,
            &Options::default(),
        );
        assert_eq!(target, None);
    }

    #[test]
    fn tie_prefers_candidate_containing_center() {
        // Both candidates share an edge with the probe and score equally; the
        // probe's center lies inside only the second.
        let probe = Rect::new(0., 0., 100., 50.);
        let candidates = [
            item(1, Rect::new(0., -50., 100., 50.)),
            item(2, Rect::new(0., 0., 100., 100.)),
        ];
        let target = resolve(probe, &candidates, &Options::default());
        assert!(matches!(target, Some(DropTarget::Item { id: 2, .. })));
    }

    #[test]
    fn tie_without_center_hit_prefers_scan_order() {
        // Equidistant above and below, center in neither.
        let probe = Rect::new(0., 0., 100., 50.);
        let candidates = [
            item(1, Rect::new(0., -50., 100., 50.)),
            item(2, Rect::new(0., 50., 100., 50.)),
        ];
        let target = resolve(probe, &candidates, &Options::default());
        assert!(matches!(target, Some(DropTarget::Item { id: 1, .. })));
    }

    #[test]
    fn probe_side_picks_the_edge() {
        let candidates = [item(7, Rect::new(0., 100., 100., 50.))];
        let options = Options::default();

        let above = resolve(Rect::new(0., 80., 100., 50.), &candidates, &options);
        assert_eq!(
            above,
            Some(DropTarget::Item {
                id: 7,
                edge: InsertEdge::Before
            })
        );

        let below = resolve(Rect::new(0., 120., 100., 50.), &candidates, &options);
        assert_eq!(
            below,
            Some(DropTarget::Item {
                id: 7,
                edge: InsertEdge::After
            })
        );
    }

    #[test]
    fn sentinel_of_an_empty_column_is_targetable() {
        let candidates = [
            item(1, Rect::new(0., 0., 100., 50.)),
            column_end(1, Rect::new(120., 0., 100., 50.)),
        ];
        let target = resolve(Rect::new(125., 10., 100., 50.), &candidates, &Options::default());
        assert_eq!(target, Some(DropTarget::ColumnEnd(ColumnId::new(1))));
    }

    #[test]
    fn identical_inputs_resolve_identically() {
        let candidates = [
            item(1, Rect::new(0., 0., 100., 50.)),
            item(2, Rect::new(0., 60., 100., 50.)),
            column_end(0, Rect::new(0., 120., 100., 50.)),
        ];
        let probe = Rect::new(10., 70., 100., 50.);
        let options = Options::default();

        let first = resolve(probe, &candidates, &options);
        for _ in 0..10 {
            assert_eq!(resolve(probe, &candidates, &options), first);
        }
    }
}
