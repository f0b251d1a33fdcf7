//! Pick-up / drop state machine sitting between pointer input and the placement tracker.
//!
//! `Idle -> Dragging -> {placed, returned, cancelled} -> Idle`. Only the placement mutation and
//! the id of the object in flight are observable; cursor and animation concerns belong to the
//! renderer.

use crate::object::ObjectId;
use crate::placement::{PlaceOutcome, PlacementTracker};
use crate::zone::ZoneId;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
  #[error("Object {0} is already placed")]
  Unavailable(ObjectId),
  #[error("Object {0} is already being dragged")]
  AlreadyDragging(ObjectId),
  #[error("Object {0} is not part of this scenario")]
  NotInScenario(ObjectId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
  #[default]
  Idle,
  Dragging {
    object: ObjectId,
  },
}

/// Why a dropped object went back to where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnReason {
  OffZone,
  ZoneOccupied { occupant: ObjectId },
}

/// How a drag gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
  Placed { object: ObjectId, zone: ZoneId },
  Returned { object: ObjectId, reason: ReturnReason },
  Cancelled { object: ObjectId },
}

impl DropOutcome {
  pub fn object(&self) -> ObjectId {
    match *self {
      DropOutcome::Placed { object, .. }
      | DropOutcome::Returned { object, .. }
      | DropOutcome::Cancelled { object } => object,
    }
  }

  pub fn is_placed(&self) -> bool {
    matches!(self, DropOutcome::Placed { .. })
  }
}

/// Explicit drag state for one session
#[derive(Debug, Clone, Default)]
pub struct DragInteraction {
  state: DragState,
}

impl DragInteraction {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> DragState {
    self.state
  }

  /// Object currently in flight, used to highlight drop targets
  pub fn dragging(&self) -> Option<ObjectId> {
    match self.state {
      DragState::Dragging { object } => Some(object),
      DragState::Idle => None,
    }
  }

  pub fn is_idle(&self) -> bool {
    self.state == DragState::Idle
  }

  /// Pick up an object. Only objects that are not placed yet may be dragged.
  pub fn begin(&mut self, object: ObjectId, tracker: &PlacementTracker) -> Result<(), DragError> {
    if let DragState::Dragging { object: current } = self.state {
      return Err(DragError::AlreadyDragging(current));
    }
    if tracker.is_object_placed(object) {
      return Err(DragError::Unavailable(object));
    }
    debug!(%object, "drag started");
    self.state = DragState::Dragging { object };
    Ok(())
  }

  /// Release the pointer over `zone` (or over no zone). Returns `None` when nothing was being
  /// dragged. A drop onto an occupied zone leaves the tracker unchanged and resolves the same
  /// way as a drop outside every zone.
  pub fn drop_on(&mut self, zone: Option<ZoneId>, tracker: &mut PlacementTracker) -> Option<DropOutcome> {
    let object = self.take()?;

    let outcome = match zone {
      None => DropOutcome::Returned {
        object,
        reason: ReturnReason::OffZone,
      },
      Some(zone) => match tracker.place(object, zone) {
        PlaceOutcome::Placed { .. } | PlaceOutcome::Unchanged => DropOutcome::Placed { object, zone },
        PlaceOutcome::Rejected { occupant } => DropOutcome::Returned {
          object,
          reason: ReturnReason::ZoneOccupied { occupant },
        },
      },
    };

    debug!(?outcome, "drag finished");
    Some(outcome)
  }

  /// Abort the gesture (e.g. escape). Never touches the tracker.
  pub fn cancel(&mut self) -> Option<DropOutcome> {
    let object = self.take()?;
    debug!(%object, "drag cancelled");
    Some(DropOutcome::Cancelled { object })
  }

  /// Explicit removal gesture for a placed object, making it draggable again.
  /// Returns the zone it was taken out of.
  pub fn remove(&mut self, object: ObjectId, tracker: &mut PlacementTracker) -> Result<Option<ZoneId>, DragError> {
    if self.dragging() == Some(object) {
      return Err(DragError::AlreadyDragging(object));
    }
    let zone = tracker.remove(object);
    if let Some(zone) = zone {
      debug!(%object, %zone, "object removed from zone");
    }
    Ok(zone)
  }

  fn take(&mut self) -> Option<ObjectId> {
    match std::mem::take(&mut self.state) {
      DragState::Dragging { object } => Some(object),
      DragState::Idle => None,
    }
  }
}
