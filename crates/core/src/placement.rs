//! Object-to-zone bookkeeping for one scenario session.
//!
//! The tracker keeps a forward map (object -> zone) and a reverse index (zone -> object) in
//! lockstep, so both "is this object placed" and "is this zone occupied" are single lookups and
//! neither side can ever hold two entries for the same key.

use crate::object::ObjectId;
use crate::zone::ZoneId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An assertion that an object has been put into a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
  pub object_id: ObjectId,
  pub zone_id: ZoneId,
}

impl Placement {
  pub fn new(object_id: ObjectId, zone_id: ZoneId) -> Self {
    Self { object_id, zone_id }
  }
}

/// Result of [`PlacementTracker::place`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
  /// The mapping was committed. `previous` is the zone the object was moved out of, if any.
  Placed { previous: Option<ZoneId> },
  /// The object already sat in that zone
  Unchanged,
  /// The zone holds a different object; nothing changed
  Rejected { occupant: ObjectId },
}

impl PlaceOutcome {
  /// Whether the object ends up in the requested zone
  pub fn is_accepted(&self) -> bool {
    !matches!(self, PlaceOutcome::Rejected { .. })
  }
}

/// In-memory placement state, owned by exactly one session
#[derive(Debug, Clone, Default)]
pub struct PlacementTracker {
  by_object: HashMap<ObjectId, ZoneId>,
  by_zone: HashMap<ZoneId, ObjectId>,
}

impl PlacementTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Put `object` into `zone`.
  ///
  /// An occupied zone is never taken over: if another object is there the call is rejected and
  /// the tracker is left as it was. Moving an already placed object releases its old zone.
  pub fn place(&mut self, object: ObjectId, zone: ZoneId) -> PlaceOutcome {
    match self.by_zone.get(&zone) {
      Some(&occupant) if occupant == object => return PlaceOutcome::Unchanged,
      Some(&occupant) => return PlaceOutcome::Rejected { occupant },
      None => {}
    }

    let previous = self.by_object.insert(object, zone);
    if let Some(old_zone) = previous {
      self.by_zone.remove(&old_zone);
    }
    self.by_zone.insert(zone, object);

    PlaceOutcome::Placed { previous }
  }

  /// Take `object` out of whatever zone it occupies. Returns that zone, or `None` if the object
  /// was not placed.
  pub fn remove(&mut self, object: ObjectId) -> Option<ZoneId> {
    let zone = self.by_object.remove(&object)?;
    self.by_zone.remove(&zone);
    Some(zone)
  }

  /// All current placements, in no particular order. Each call starts a fresh pass.
  pub fn current_placements(&self) -> impl Iterator<Item = Placement> + '_ {
    self
      .by_object
      .iter()
      .map(|(&object_id, &zone_id)| Placement { object_id, zone_id })
  }

  /// Snapshot of the placements, ready to submit for scoring
  pub fn to_placements(&self) -> Vec<Placement> {
    self.current_placements().collect()
  }

  pub fn is_object_placed(&self, object: ObjectId) -> bool {
    self.by_object.contains_key(&object)
  }

  pub fn is_zone_occupied(&self, zone: ZoneId) -> bool {
    self.by_zone.contains_key(&zone)
  }

  pub fn zone_of(&self, object: ObjectId) -> Option<ZoneId> {
    self.by_object.get(&object).copied()
  }

  pub fn occupant_of(&self, zone: ZoneId) -> Option<ObjectId> {
    self.by_zone.get(&zone).copied()
  }

  pub fn len(&self) -> usize {
    self.by_object.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_object.is_empty()
  }

  pub fn clear(&mut self) {
    self.by_object.clear();
    self.by_zone.clear();
  }
}
