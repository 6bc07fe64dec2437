//! Computation of the next arrangement for a resolved drop.
//!
//! Pure: reads the store, never writes it. The output arrangement is in the
//! store's canonical order and keeps every column contiguous by construction;
//! [`ItemStore::commit`] re-validates it regardless.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::collision::{DropTarget, InsertEdge};
use super::drag::DragSession;
use super::store::{Arrangement, ArrangementEntry, BoardItem, ColumnId, ItemStore};
use super::Error;

/// A committed cross-column transfer, as reported to the host's notification
/// sink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transition<Id> {
    /// The item that moved.
    pub item: Id,
    /// Column it left.
    pub from: ColumnId,
    /// Column it entered.
    pub to: ColumnId,
}

/// Computes the arrangement after dropping the session's item on `target`.
///
/// A same-column drop produces a permutation of that column's id set and no
/// transition; a cross-column drop removes the item from its origin column,
/// renumbers the remainder, inserts it at the resolved position in the
/// destination, and reports the populated [`Transition`]. The item itself is
/// never altered, only its placement.
///
/// Fails with [`Error::StaleTarget`] when the dragged item, the anchor item,
/// or the target column is no longer on the board.
pub fn compute<W: BoardItem>(
    store: &ItemStore<W>,
    session: &DragSession<W::Id>,
    target: &DropTarget<W::Id>,
) -> Result<(Arrangement<W::Id>, Option<Transition<W::Id>>), Error> {
    let item = session.item();
    let origin = store.placement_of(item).ok_or(Error::StaleTarget)?;

    // Resolve the destination column and the insertion index within it,
    // counted in the column as it looks after the item is removed.
    let (dest_column, dest_index) = match target {
        DropTarget::Item { id: anchor, edge } => {
            if anchor == item {
                // Dropped onto its own rectangle; stay put.
                (origin.column, origin.position)
            } else {
                let anchor_placement = store.placement_of(anchor).ok_or(Error::StaleTarget)?;

                let mut index = anchor_placement.position;
                if anchor_placement.column == origin.column && origin.position < index {
                    // Removing the item shifts the anchor up by one.
                    index -= 1;
                }
                if let InsertEdge::After = *edge {
                    index += 1;
                }
                (anchor_placement.column, index)
            }
        }
        DropTarget::ColumnEnd(column) => {
            if !store.columns().contains(column) {
                return Err(Error::StaleTarget);
            }
            let len = store
                .ids_in_column(*column)
                .iter()
                .filter(|id| *id != item)
                .count();
            (*column, len)
        }
    };

    let mut entries = Vec::with_capacity(store.len());
    for &column in store.columns() {
        let mut ids: Vec<W::Id> = store
            .ids_in_column(column)
            .into_iter()
            .filter(|id| id != item)
            .collect();
        if column == dest_column {
            let index = dest_index.min(ids.len());
            ids.insert(index, item.clone());
        }
        for (position, id) in ids.into_iter().enumerate() {
            entries.push(ArrangementEntry {
                id,
                column,
                position,
            });
        }
    }

    let transition = (origin.column != dest_column).then(|| Transition {
        item: item.clone(),
        from: origin.column,
        to: dest_column,
    });

    Ok((Arrangement { entries }, transition))
}
