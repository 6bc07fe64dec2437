//! The drag-gesture state machine.
//!
//! At most one session exists at a time. A pointer gesture starts out
//! *pending*: until the pointer has travelled the activation distance the
//! gesture may still turn out to be an ordinary click, and the host is not
//! told about it. Crossing the deadzone, or an explicit keyboard step,
//! activates the session; from then on every probe resolves a drop target and
//! release either commits a reorder or falls back to a cancel. The store is
//! never mutated before `end`.

use super::collision::{self, DropCandidate, DropTarget};
use super::reorder::{self, Transition};
use super::store::{BoardItem, ColumnId, ItemStore};
use super::{Error, Options};
use crate::geometry::{Point, Rect};

/// Callbacks invoked synchronously at gesture milestones.
///
/// All methods default to no-ops; hosts implement the ones they render.
pub trait GestureHandler<W: BoardItem> {
    /// A session crossed the activation threshold and is now live.
    fn on_session_start(&mut self, _item: &W::Id) {}

    /// The resolved drop target changed since the previous probe.
    fn on_target_changed(&mut self, _target: Option<&DropTarget<W::Id>>) {}

    /// A release committed. The transition is `Some` only for a cross-column
    /// transfer.
    fn on_committed(&mut self, _transition: Option<&Transition<W::Id>>) {}

    /// A live session ended without touching the store.
    fn on_cancelled(&mut self) {}
}

/// Phase of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No session.
    Idle,
    /// A session exists but hasn't crossed the activation deadzone.
    Pending,
    /// A live drag; probes resolve targets.
    Dragging,
}

/// The one live gesture.
///
/// Ephemeral: created on `start`, consumed on `end` or `cancel`; it never
/// outlives the gesture. Read-only to the host, which derives in-flight
/// visuals from it plus the store snapshot.
#[derive(Debug)]
pub struct DragSession<Id> {
    item: Id,
    origin_column: ColumnId,
    origin_position: usize,
    target: Option<DropTarget<Id>>,
}

impl<Id> DragSession<Id> {
    /// The item being dragged.
    pub fn item(&self) -> &Id {
        &self.item
    }

    /// Column the item was in when the gesture started.
    pub fn origin_column(&self) -> ColumnId {
        self.origin_column
    }

    /// Position the item was at when the gesture started.
    pub fn origin_position(&self) -> usize {
        self.origin_position
    }

    /// The currently resolved drop target, if any.
    pub fn target(&self) -> Option<&DropTarget<Id>> {
        self.target.as_ref()
    }
}

#[derive(Debug)]
enum DragState<Id> {
    /// Deadzone phase; the session is not yet visible to the host.
    Pending {
        session: DragSession<Id>,
        pointer_delta: Point,
    },
    /// Live drag.
    Dragging(DragSession<Id>),
}

/// Owner of the gesture lifecycle.
///
/// The controller holds no reference to the store or the handler; the host
/// passes them into the calls that need them, keeping every borrow scoped to
/// a single event.
#[derive(Debug)]
pub struct DragController<W: BoardItem> {
    state: Option<DragState<W::Id>>,
    options: Options,
}

impl<W: BoardItem> Default for DragController<W> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<W: BoardItem> DragController<W> {
    pub fn new(options: Options) -> Self {
        Self {
            state: None,
            options,
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> DragPhase {
        match &self.state {
            None => DragPhase::Idle,
            Some(DragState::Pending { .. }) => DragPhase::Pending,
            Some(DragState::Dragging(_)) => DragPhase::Dragging,
        }
    }

    /// The session, pending or live.
    pub fn session(&self) -> Option<&DragSession<W::Id>> {
        match &self.state {
            None => None,
            Some(DragState::Pending { session, .. }) | Some(DragState::Dragging(session)) => {
                Some(session)
            }
        }
    }

    /// Begins a pending session on this item.
    ///
    /// Fails with [`Error::SessionActive`] if any session exists, leaving
    /// that session untouched, and with [`Error::StaleTarget`] if the item is
    /// not on the board.
    pub fn start(&mut self, item: W::Id, store: &ItemStore<W>) -> Result<(), Error> {
        if self.state.is_some() {
            warn!("rejecting gesture start for {item:?}: a session is already active");
            return Err(Error::SessionActive);
        }

        let placement = store.placement_of(&item).ok_or(Error::StaleTarget)?;

        trace!("pending session on {item:?}");
        self.state = Some(DragState::Pending {
            session: DragSession {
                item,
                origin_column: placement.column,
                origin_position: placement.position,
                target: None,
            },
            pointer_delta: Point::default(),
        });
        Ok(())
    }

    /// Accumulates pointer travel for a pending session.
    ///
    /// Once total travel exceeds the activation distance the session goes
    /// live and `on_session_start` fires. Motion in any other phase is
    /// ignored.
    pub fn motion(&mut self, delta: Point, handler: &mut impl GestureHandler<W>) {
        let Some(DragState::Pending { pointer_delta, .. }) = &mut self.state else {
            return;
        };

        *pointer_delta += delta;

        let threshold = self.options.drag_activation_distance;
        if pointer_delta.length_sq() < threshold * threshold {
            return;
        }

        self.activate(handler);
    }

    /// Explicit activation for keyboard-driven gestures.
    ///
    /// A discrete step command skips the pointer deadzone entirely.
    pub fn step(&mut self, handler: &mut impl GestureHandler<W>) {
        if matches!(self.state, Some(DragState::Pending { .. })) {
            self.activate(handler);
        }
    }

    fn activate(&mut self, handler: &mut impl GestureHandler<W>) {
        let Some(DragState::Pending { session, .. }) = self.state.take() else {
            unreachable!()
        };

        trace!("session on {:?} activated", session.item);
        let item = session.item.clone();
        self.state = Some(DragState::Dragging(session));
        handler.on_session_start(&item);
    }

    /// Resolves the probe against the candidate set and records the result
    /// on the live session.
    ///
    /// Fires `on_target_changed` only when the target actually changed, so
    /// probing a stationary pointer any number of times is idempotent. Valid
    /// only while dragging; otherwise a no-op. Never touches the store.
    pub fn probe(
        &mut self,
        probe: Rect,
        candidates: &[DropCandidate<W::Id>],
        handler: &mut impl GestureHandler<W>,
    ) {
        let Some(DragState::Dragging(session)) = &mut self.state else {
            return;
        };

        let target = collision::resolve(probe, candidates, &self.options);
        if target != session.target {
            trace!("target changed to {target:?}");
            session.target = target;
            handler.on_target_changed(session.target.as_ref());
        }
    }

    /// Ends the gesture.
    ///
    /// A pending session is discarded quietly: the gesture was a click, and
    /// the host never saw a session. A live session commits through the
    /// reorder engine, unless the drop is unresolved, lands back on its
    /// origin, or went stale, in which case the store stays untouched and
    /// `on_cancelled` fires. Returns the transition of a committed
    /// cross-column transfer.
    pub fn end(
        &mut self,
        store: &mut ItemStore<W>,
        handler: &mut impl GestureHandler<W>,
    ) -> Option<Transition<W::Id>> {
        let session = match self.state.take()? {
            DragState::Pending { .. } => return None,
            DragState::Dragging(session) => session,
        };

        let Some(target) = &session.target else {
            trace!("releasing {:?} with no target", session.item);
            handler.on_cancelled();
            return None;
        };

        let (arrangement, transition) = match reorder::compute(store, &session, target) {
            Ok(next) => next,
            Err(err) => {
                warn!("drop of {:?} went stale: {err}", session.item);
                handler.on_cancelled();
                return None;
            }
        };

        // A drop back onto the origin position leaves the store untouched.
        if arrangement == store.arrangement() {
            trace!("drop of {:?} is a no-op", session.item);
            handler.on_cancelled();
            return None;
        }

        if let Err(err) = store.commit(&arrangement) {
            warn!("commit rejected: {err}");
            handler.on_cancelled();
            return None;
        }

        trace!("committed move of {:?}", session.item);
        handler.on_committed(transition.as_ref());
        transition
    }

    /// Discards the session without touching the store.
    ///
    /// Always available until `end`. Fires `on_cancelled` only if the
    /// session had activated; a pending session vanishes silently.
    pub fn cancel(&mut self, handler: &mut impl GestureHandler<W>) {
        match self.state.take() {
            None | Some(DragState::Pending { .. }) => {}
            Some(DragState::Dragging(session)) => {
                trace!("cancelled drag of {:?}", session.item);
                handler.on_cancelled();
            }
        }
    }
}
