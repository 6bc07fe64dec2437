//! Status-board reordering.
//!
//! A board is a fixed set of columns holding ordered items. Items move within
//! and between columns through one interactive drag gesture at a time. The
//! pieces:
//!
//! - [`store::ItemStore`] is the canonical collection: a flat arena of
//!   caller-owned items plus their placements, replaced wholesale on every
//!   commit so readers never see a half-applied move.
//! - [`collision`] resolves a probe rectangle against the geometry the host
//!   supplies, picking a single drop target by corner distance. Stateless.
//! - [`drag::DragController`] owns the gesture lifecycle: a pointer deadzone
//!   (or explicit keyboard step) gates activation, probes resolve targets,
//!   and release either commits a reorder or falls back to a cancel.
//! - [`reorder`] computes the next arrangement for a resolved drop and the
//!   transition descriptor the host's notification sink consumes.
//!
//! The host wires them together per input event; nothing here blocks,
//! suspends, or retains callbacks between calls.

use thiserror::Error;

use store::ColumnId;

pub mod collision;
pub mod drag;
pub mod reorder;
pub mod store;


/// Pointer needs to travel this far to turn a pending gesture into a drag.
const DRAG_ACTIVATION_DISTANCE: f64 = 8.;

/// Average per-corner distance beyond which a candidate is too far to be a
/// drop target.
const MAX_TARGET_DISTANCE: f64 = 160.;

/// Tunables for gesture activation and target resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Minimum pointer travel, in logical units, before a pointer gesture
    /// activates. Keeps an ordinary click from turning into a drag.
    pub drag_activation_distance: f64,
    /// Maximum average corner distance for a candidate to count as a drop
    /// target. Probes farther than this from every candidate resolve to
    /// nothing and the release is treated as a cancel.
    pub max_target_distance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            drag_activation_distance: DRAG_ACTIVATION_DISTANCE,
            max_target_distance: MAX_TARGET_DISTANCE,
        }
    }
}

/// Errors surfaced by board operations.
///
/// All of them are local and non-fatal: a rejected operation leaves the store
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A gesture start was attempted while a session is already live.
    #[error("a drag session is already active")]
    SessionActive,
    /// A resolved drop target referenced an item or column that is no longer
    /// on the board. Treated the same as an unresolved drop.
    #[error("drop target no longer exists on the board")]
    StaleTarget,
    /// A candidate arrangement did not preserve the id set or broke the
    /// contiguous-position invariant.
    #[error("arrangement violates board invariants: {reason}")]
    InvariantViolation {
        /// Which invariant was broken.
        reason: String,
    },
    /// A reference to a column outside the board's fixed column set.
    #[error("unknown column {column:?}")]
    UnknownColumn {
        /// The offending column id.
        column: ColumnId,
    },
}
