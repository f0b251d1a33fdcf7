use crate::object::{GameObject, ObjectId};
use crate::zone::{Zone, ZoneId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub i64);

impl std::fmt::Display for ScenarioId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for ScenarioId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.trim().parse()?))
  }
}

/// A named bundle of zones and objects for one customer's training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
  pub id: ScenarioId,
  pub name: String,
  pub customer_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub zone_ids: Vec<ZoneId>,
  pub object_ids: Vec<ObjectId>,
}

impl Scenario {
  pub fn includes_zone(&self, zone: ZoneId) -> bool {
    self.zone_ids.contains(&zone)
  }

  pub fn includes_object(&self, object: ObjectId) -> bool {
    self.object_ids.contains(&object)
  }
}

/// Everything a learner needs to play one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBundle {
  pub scenario: Scenario,
  pub zones: Vec<Zone>,
  pub objects: Vec<GameObject>,
}

impl ScenarioBundle {
  pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
    self.zones.iter().find(|z| z.id == id)
  }

  pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
    self.objects.iter().find(|o| o.id == id)
  }

  /// First zone, in bundle order, whose rectangle contains the point
  pub fn zone_at(&self, x: f64, y: f64) -> Option<&Zone> {
    self.zones.iter().find(|z| z.contains(x, y))
  }

  /// Highest score reachable in this scenario
  pub fn max_score(&self) -> u64 {
    self.objects.iter().map(|o| u64::from(o.points)).sum()
  }
}
