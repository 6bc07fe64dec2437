//! Canonical ordered collection of board items.
//!
//! Items live in a flat arena in insertion order; where each one sits on the
//! board is a parallel placement array, swapped wholesale on every commit.
//! Within a column, positions form a contiguous 0-based sequence with no gaps
//! or duplicates; ids are unique across the whole board.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Error;

/// An item that can live on a board.
///
/// Implementors are opaque payload to the engine: it reads the id and nothing
/// else, and never alters the item itself.
pub trait BoardItem {
    /// Type that can be used as a unique ID of this item.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// Unique ID of this item, stable for its whole lifetime on the board.
    fn id(&self) -> &Self::Id;
}

/// Identifier of a column in the board's fixed column set.
///
/// Columns are created and ordered by the caller at construction and live for
/// the lifetime of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnId(u64);

impl ColumnId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where an item sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Column the item is assigned to.
    pub column: ColumnId,
    /// 0-based position within that column.
    pub position: usize,
}

/// One entry of a candidate arrangement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrangementEntry<Id> {
    pub id: Id,
    pub column: ColumnId,
    pub position: usize,
}

/// A full candidate placement of every item on the board.
///
/// The only currency [`ItemStore::commit`] accepts; there are no partial
/// updates. [`ItemStore::arrangement`] produces the canonical form: entries
/// in column display order, positions ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arrangement<Id> {
    pub entries: Vec<ArrangementEntry<Id>>,
}

/// The canonical ordered collection.
///
/// The arena (`items`) is never reordered; only the parallel `placements`
/// array changes, and only through [`commit`](Self::commit). The id index
/// points at arena slots.
#[derive(Debug)]
pub struct ItemStore<W: BoardItem> {
    /// Caller items, in arena order.
    items: Vec<W>,
    /// Placement of each arena slot. Parallel to `items`.
    placements: Vec<Placement>,
    /// The fixed column set, in display order.
    columns: Vec<ColumnId>,
    /// Id-indexed lookup into the arena.
    index: HashMap<W::Id, usize>,
}

impl<W: BoardItem> ItemStore<W> {
    /// Creates a store over a fixed column set.
    ///
    /// Items are placed into their columns in the order supplied, giving them
    /// contiguous positions from 0. Fails on a duplicate column, a duplicate
    /// item id, or an item assigned to a column outside the set.
    pub fn new(
        columns: impl IntoIterator<Item = ColumnId>,
        items: impl IntoIterator<Item = (W, ColumnId)>,
    ) -> Result<Self, Error> {
        let columns: Vec<ColumnId> = columns.into_iter().collect();
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(Error::InvariantViolation {
                    reason: format!("duplicate column {column:?}"),
                });
            }
        }

        let mut store = Self {
            items: Vec::new(),
            placements: Vec::new(),
            columns,
            index: HashMap::new(),
        };

        let mut counts: HashMap<ColumnId, usize> = HashMap::new();
        for (item, column) in items {
            if !store.columns.contains(&column) {
                return Err(Error::UnknownColumn { column });
            }

            let id = item.id().clone();
            let slot = store.items.len();
            if store.index.insert(id.clone(), slot).is_some() {
                return Err(Error::InvariantViolation {
                    reason: format!("duplicate item id {id:?}"),
                });
            }

            let position = counts.entry(column).or_default();
            store.placements.push(Placement {
                column,
                position: *position,
            });
            *position += 1;
            store.items.push(item);
        }

        Ok(store)
    }

    /// The fixed column set, in display order.
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Number of items on the whole board.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &W::Id) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the item with this id, if it is on the board.
    pub fn item(&self, id: &W::Id) -> Option<&W> {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    /// Returns where this item currently sits.
    pub fn placement_of(&self, id: &W::Id) -> Option<Placement> {
        self.index.get(id).map(|&slot| self.placements[slot])
    }

    /// Items of one column, position ascending.
    pub fn items_in_column(&self, column: ColumnId) -> impl Iterator<Item = &W> + '_ {
        let mut slots: Vec<(usize, usize)> = self
            .placements
            .iter()
            .enumerate()
            .filter(|(_, placement)| placement.column == column)
            .map(|(slot, placement)| (placement.position, slot))
            .collect();
        slots.sort_unstable_by_key(|&(position, _)| position);
        slots.into_iter().map(|(_, slot)| &self.items[slot])
    }

    /// Item ids of one column, position ascending.
    pub fn ids_in_column(&self, column: ColumnId) -> Vec<W::Id> {
        self.items_in_column(column)
            .map(|item| item.id().clone())
            .collect()
    }

    /// The current placement of every item, in canonical order.
    ///
    /// Committing this back unchanged is a no-op by construction.
    pub fn arrangement(&self) -> Arrangement<W::Id> {
        let mut entries = Vec::with_capacity(self.items.len());
        for &column in &self.columns {
            for (position, item) in self.items_in_column(column).enumerate() {
                entries.push(ArrangementEntry {
                    id: item.id().clone(),
                    column,
                    position,
                });
            }
        }
        Arrangement { entries }
    }

    /// Atomically replaces every placement with a validated candidate.
    ///
    /// The arrangement must cover exactly the current id set and give every
    /// column a contiguous 0-based position sequence. On rejection the
    /// previous placements are retained untouched; a partially applied
    /// arrangement is never observable.
    pub fn commit(&mut self, arrangement: &Arrangement<W::Id>) -> Result<(), Error> {
        let next = match self.validate(arrangement) {
            Ok(next) => next,
            Err(err) => {
                warn!("rejecting commit: {err}");
                return Err(err);
            }
        };

        self.placements = next;
        trace!("committed arrangement of {} items", self.placements.len());
        Ok(())
    }

    fn validate(&self, arrangement: &Arrangement<W::Id>) -> Result<Vec<Placement>, Error> {
        if arrangement.entries.len() != self.items.len() {
            return Err(Error::InvariantViolation {
                reason: format!(
                    "arrangement has {} entries for {} items",
                    arrangement.entries.len(),
                    self.items.len()
                ),
            });
        }

        let mut next: Vec<Option<Placement>> = vec![None; self.items.len()];
        let mut per_column: HashMap<ColumnId, Vec<usize>> = HashMap::new();

        for entry in &arrangement.entries {
            if !self.columns.contains(&entry.column) {
                return Err(Error::UnknownColumn {
                    column: entry.column,
                });
            }

            let Some(&slot) = self.index.get(&entry.id) else {
                return Err(Error::InvariantViolation {
                    reason: format!("unknown item id {:?}", entry.id),
                });
            };
            if next[slot].is_some() {
                return Err(Error::InvariantViolation {
                    reason: format!("item id {:?} appears twice", entry.id),
                });
            }

            next[slot] = Some(Placement {
                column: entry.column,
                position: entry.position,
            });
            per_column
                .entry(entry.column)
                .or_default()
                .push(entry.position);
        }

        for (column, mut positions) in per_column {
            positions.sort_unstable();
            if positions.iter().enumerate().any(|(i, &position)| position != i) {
                return Err(Error::InvariantViolation {
                    reason: format!("positions in column {column:?} are not contiguous from 0"),
                });
            }
        }

        // The entry count matches the arena and duplicates were rejected, so
        // every slot is filled.
        Ok(next.into_iter().map(|placement| placement.unwrap()).collect())
    }

    /// Panics if the store violates its structural invariants.
    ///
    /// The test harness calls this after every operation.
    pub fn verify_invariants(&self) {
        assert_eq!(self.items.len(), self.placements.len());
        assert_eq!(self.items.len(), self.index.len());

        for (slot, item) in self.items.iter().enumerate() {
            assert_eq!(
                self.index.get(item.id()),
                Some(&slot),
                "index must point at the item's arena slot"
            );
            assert!(
                self.columns.contains(&self.placements[slot].column),
                "placement must reference a known column"
            );
        }

        for &column in &self.columns {
            let mut positions: Vec<usize> = self
                .placements
                .iter()
                .filter(|placement| placement.column == column)
                .map(|placement| placement.position)
                .collect();
            positions.sort_unstable();
            for (expected, position) in positions.into_iter().enumerate() {
                assert_eq!(
                    position, expected,
                    "positions in column {column:?} must be contiguous from 0"
                );
            }
        }
    }
}
