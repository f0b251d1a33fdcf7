//! Catalog integrity checks
//!
//! Centralised field and reference checks with consistent error messages. Used when a catalog is
//! loaded so that the scoring and session code can assume well-formed data.

use crate::object::{GameObject, ObjectId};
use crate::scenario::Scenario;
use crate::zone::{MIN_ZONE_SIZE, Zone, ZoneId};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A check failure with field information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CheckError {
  pub field: String,
  pub message: String,
}

impl fmt::Display for CheckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

impl CheckError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }

  /// Create error for an empty required string
  pub fn missing(field: impl Into<String>) -> Self {
    Self::new(field, "is required")
  }

  /// Create error for a value below its minimum
  pub fn too_small(field: impl Into<String>, min: impl fmt::Display) -> Self {
    Self {
      field: field.into(),
      message: format!("must be at least {}", min),
    }
  }

  /// Create error for an empty list
  pub fn empty_list(field: impl Into<String>, what: &str) -> Self {
    Self {
      field: field.into(),
      message: format!("at least one {} must be selected", what),
    }
  }

  /// Create error for a reference to something that does not exist
  pub fn dangling(field: impl Into<String>, what: &str, id: impl fmt::Display) -> Self {
    Self {
      field: field.into(),
      message: format!("references unknown {} {}", what, id),
    }
  }

  /// Create error for an id used twice
  pub fn duplicate(field: impl Into<String>, id: impl fmt::Display) -> Self {
    Self {
      field: field.into(),
      message: format!("duplicate id {}", id),
    }
  }
}

/// Result type for checks
pub type CheckResult<T> = Result<T, CheckError>;

/// Require a string with at least one non-whitespace character
pub fn require_text(value: &str, field: &str) -> CheckResult<()> {
  if value.trim().is_empty() {
    return Err(CheckError::missing(field));
  }
  Ok(())
}

/// Check a zone's own fields
pub fn check_zone(zone: &Zone) -> CheckResult<()> {
  let prefix = format!("zones[{}]", zone.id);
  require_text(&zone.name, &format!("{}.name", prefix))?;
  if zone.width < MIN_ZONE_SIZE {
    return Err(CheckError::too_small(format!("{}.width", prefix), MIN_ZONE_SIZE));
  }
  if zone.height < MIN_ZONE_SIZE {
    return Err(CheckError::too_small(format!("{}.height", prefix), MIN_ZONE_SIZE));
  }
  Ok(())
}

/// Check an object's fields and that its answer points at a known zone
pub fn check_object(object: &GameObject, zones: &HashSet<ZoneId>) -> CheckResult<()> {
  let prefix = format!("objects[{}]", object.id);
  require_text(&object.name, &format!("{}.name", prefix))?;
  require_text(&object.error_message, &format!("{}.errorMessage", prefix))?;
  require_text(&object.success_message, &format!("{}.successMessage", prefix))?;
  if !zones.contains(&object.correct_zone_id) {
    return Err(CheckError::dangling(
      format!("{}.correctZoneId", prefix),
      "zone",
      object.correct_zone_id,
    ));
  }
  Ok(())
}

/// Check a scenario's fields and that everything it bundles exists
pub fn check_scenario(scenario: &Scenario, zones: &HashSet<ZoneId>, objects: &HashSet<ObjectId>) -> CheckResult<()> {
  let prefix = format!("scenarios[{}]", scenario.id);
  require_text(&scenario.name, &format!("{}.name", prefix))?;
  require_text(&scenario.customer_name, &format!("{}.customerName", prefix))?;
  if scenario.zone_ids.is_empty() {
    return Err(CheckError::empty_list(format!("{}.zoneIds", prefix), "zone"));
  }
  if scenario.object_ids.is_empty() {
    return Err(CheckError::empty_list(format!("{}.objectIds", prefix), "object"));
  }
  if let Some(missing) = scenario.zone_ids.iter().find(|id| !zones.contains(*id)) {
    return Err(CheckError::dangling(format!("{}.zoneIds", prefix), "zone", missing));
  }
  if let Some(missing) = scenario.object_ids.iter().find(|id| !objects.contains(*id)) {
    return Err(CheckError::dangling(format!("{}.objectIds", prefix), "object", missing));
  }
  Ok(())
}

/// Collect ids into a set, failing on the first repeat
pub fn unique_ids<T, I>(ids: I, field: &str) -> CheckResult<HashSet<T>>
where
  T: std::hash::Hash + Eq + Copy + fmt::Display,
  I: IntoIterator<Item = T>,
{
  let mut set = HashSet::new();
  for id in ids {
    if !set.insert(id) {
      return Err(CheckError::duplicate(field, id));
    }
  }
  Ok(set)
}
