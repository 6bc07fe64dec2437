//! Interactive status-board reordering engine.
//!
//! Kanri implements the drag-and-drop core of a status board: a collection of
//! opaque work items grouped into ordered columns, rearranged through
//! direct-manipulation gestures. The engine is deliberately small and
//! synchronous. The host translates its input events into [`DragController`]
//! calls, supplies the current geometry of rendered items on every probe, and
//! re-renders from the [`ItemStore`] snapshot after each committed gesture.
//!
//! The engine does not decide what an item *is*. Anything implementing
//! [`BoardItem`] can live on a board; the engine only ever rewrites placement
//! (column and position), never the items themselves.
//!
//! Three rules shape the design:
//!
//! 1. There is at most one live drag session. This is enforced by the
//!    controller's state machine rather than a lock, since all calls are
//!    serialized by the host's event loop anyway.
//! 2. The store is only ever replaced wholesale. A commit validates the full
//!    candidate arrangement and swaps it in atomically, so a reader never
//!    observes a half-applied move.
//! 3. Cancellation is available at any point before the gesture ends, and is
//!    guaranteed to leave the store untouched.

#[macro_use]
extern crate tracing;

pub mod board;
pub mod geometry;

pub use board::collision::{CandidateKind, DropCandidate, DropTarget, InsertEdge};
pub use board::drag::{DragController, DragPhase, DragSession, GestureHandler};
pub use board::reorder::Transition;
pub use board::store::{Arrangement, ArrangementEntry, BoardItem, ColumnId, ItemStore, Placement};
pub use board::{Error, Options};
