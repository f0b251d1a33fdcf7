//! Read-only store of zones, objects and scenarios.
//!
//! The catalog is loaded once at startup from a JSON seed (or the built-in demo set), checked
//! for referential integrity, and then shared immutably between request handlers.

use dropcheck_core::{
  AnswerKey, CheckError, GameObject, ObjectId, ObjectType, Scenario, ScenarioBundle, ScenarioId, Zone, ZoneId,
  check_object, check_scenario, check_zone, unique_ids,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CatalogError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Invalid catalog: {0}")]
  Invalid(#[from] CheckError),
}

/// On-disk catalog format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSeed {
  pub zones: Vec<Zone>,
  pub objects: Vec<GameObject>,
  pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  zones: BTreeMap<ZoneId, Zone>,
  objects: BTreeMap<ObjectId, GameObject>,
  scenarios: BTreeMap<ScenarioId, Scenario>,
}

impl Catalog {
  /// Build a catalog, rejecting duplicate ids, malformed entries and dangling references
  pub fn from_seed(seed: CatalogSeed) -> Result<Self, CatalogError> {
    let zone_ids = unique_ids(seed.zones.iter().map(|z| z.id), "zones")?;
    let object_ids = unique_ids(seed.objects.iter().map(|o| o.id), "objects")?;
    unique_ids(seed.scenarios.iter().map(|s| s.id), "scenarios")?;

    for zone in &seed.zones {
      check_zone(zone)?;
    }
    for object in &seed.objects {
      check_object(object, &zone_ids)?;
    }
    for scenario in &seed.scenarios {
      check_scenario(scenario, &zone_ids, &object_ids)?;
    }

    Ok(Self {
      zones: seed.zones.into_iter().map(|z| (z.id, z)).collect(),
      objects: seed.objects.into_iter().map(|o| (o.id, o)).collect(),
      scenarios: seed.scenarios.into_iter().map(|s| (s.id, s)).collect(),
    })
  }

  pub fn load(path: &Path) -> Result<Self, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let seed: CatalogSeed = serde_json::from_str(&content)?;
    let catalog = Self::from_seed(seed)?;
    info!(
      "Loaded catalog from {:?}: {} zones, {} objects, {} scenarios",
      path,
      catalog.zones.len(),
      catalog.objects.len(),
      catalog.scenarios.len()
    );
    Ok(catalog)
  }

  pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
    self.zones.get(&id)
  }

  pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
    self.objects.get(&id)
  }

  pub fn scenario(&self, id: ScenarioId) -> Option<&Scenario> {
    self.scenarios.get(&id)
  }

  /// Scenario with its zones and objects, in the scenario's listed order. `from_seed` rejects
  /// dangling references, so every listed id resolves.
  pub fn bundle(&self, id: ScenarioId) -> Option<ScenarioBundle> {
    let scenario = self.scenario(id)?;
    let zones = scenario.zone_ids.iter().filter_map(|z| self.zone(*z).cloned()).collect();
    let objects = scenario.object_ids.iter().filter_map(|o| self.object(*o).cloned()).collect();

    Some(ScenarioBundle {
      scenario: scenario.clone(),
      zones,
      objects,
    })
  }

  pub fn scenarios_for_customer(&self, customer: &str) -> Vec<Scenario> {
    self
      .scenarios
      .values()
      .filter(|s| s.customer_name == customer)
      .cloned()
      .collect()
  }

  pub fn zone_count(&self) -> usize {
    self.zones.len()
  }

  pub fn object_count(&self) -> usize {
    self.objects.len()
  }

  pub fn scenario_count(&self) -> usize {
    self.scenarios.len()
  }

  /// Small built-in catalog so a fresh install has something to play
  pub fn demo() -> Self {
    Self::from_seed(demo_seed()).unwrap_or_else(|e| {
      error!("Built-in demo catalog is invalid, serving an empty catalog: {}", e);
      Self::default()
    })
  }
}

impl AnswerKey for Catalog {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    self.object(object)
  }
}

fn demo_object(
  id: i64,
  name: &str,
  object_type: ObjectType,
  zone: i64,
  points: u32,
  success: &str,
  error: &str,
) -> GameObject {
  GameObject {
    id: ObjectId(id),
    name: name.to_string(),
    object_type,
    correct_zone_id: ZoneId(zone),
    error_message: error.to_string(),
    success_message: success.to_string(),
    points,
  }
}

pub fn demo_seed() -> CatalogSeed {
  let zones = vec![
    Zone::new(1, "DMZ", 40, 80, 320, 240).with_description("Internet-facing segment"),
    Zone::new(2, "Application Tier", 440, 80, 320, 240),
    Zone::new(3, "Data Tier", 840, 80, 320, 240),
    Zone::new(4, "Management Network", 440, 420, 320, 240),
  ];
  let objects = vec![
    demo_object(
      1,
      "Web Server",
      ObjectType::Server,
      1,
      10,
      "Correct: public web servers live in the DMZ.",
      "Web servers take public traffic and belong in the DMZ.",
    ),
    demo_object(
      2,
      "Customer Database",
      ObjectType::Database,
      3,
      10,
      "Correct: customer data stays in the data tier.",
      "Databases should never be reachable from the edge; use the data tier.",
    ),
    demo_object(
      3,
      "Domain Controller",
      ObjectType::ActiveDirectory,
      4,
      15,
      "Correct: directory services sit on the management network.",
      "Domain controllers belong on the isolated management network.",
    ),
    demo_object(
      4,
      "Edge Firewall",
      ObjectType::NetworkDevice,
      1,
      5,
      "Correct: the firewall guards the DMZ boundary.",
      "The edge firewall belongs at the DMZ boundary.",
    ),
    demo_object(
      5,
      "API Server",
      ObjectType::Server,
      2,
      10,
      "Correct: business logic runs in the application tier.",
      "API servers belong in the application tier.",
    ),
  ];
  let scenarios = vec![
    Scenario {
      id: ScenarioId(1),
      name: "Three-tier web application".to_string(),
      customer_name: "demo".to_string(),
      description: Some("Place each component in its network segment".to_string()),
      zone_ids: vec![ZoneId(1), ZoneId(2), ZoneId(3), ZoneId(4)],
      object_ids: vec![ObjectId(1), ObjectId(2), ObjectId(3), ObjectId(5)],
    },
    Scenario {
      id: ScenarioId(2),
      name: "Perimeter basics".to_string(),
      customer_name: "demo".to_string(),
      description: None,
      zone_ids: vec![ZoneId(1), ZoneId(2)],
      object_ids: vec![ObjectId(4), ObjectId(5)],
    },
  ];

  CatalogSeed {
    zones,
    objects,
    scenarios,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use dropcheck_core::{Placement, validate};
  use tempfile::TempDir;

  #[test]
  fn test_demo_catalog_is_valid() {
    assert!(Catalog::from_seed(demo_seed()).is_ok());
    let catalog = Catalog::demo();
    assert_eq!(catalog.scenario_count(), 2);
    assert_eq!(catalog.zone_count(), 4);
    assert_eq!(catalog.object_count(), 5);
  }

  #[test]
  fn test_bundle_follows_scenario_order() {
    let catalog = Catalog::demo();
    let bundle = catalog.bundle(ScenarioId(2)).unwrap();
    let zones: Vec<_> = bundle.zones.iter().map(|z| z.id.0).collect();
    let objects: Vec<_> = bundle.objects.iter().map(|o| o.id.0).collect();
    assert_eq!(zones, vec![1, 2]);
    assert_eq!(objects, vec![4, 5]);
    assert!(catalog.bundle(ScenarioId(42)).is_none());
  }

  #[test]
  fn test_bundles_resolve_every_listed_id() {
    let catalog = Catalog::demo();
    for scenario in catalog.scenarios_for_customer("demo") {
      let bundle = catalog.bundle(scenario.id).unwrap();
      assert_eq!(bundle.zones.len(), scenario.zone_ids.len());
      assert_eq!(bundle.objects.len(), scenario.object_ids.len());
    }
  }

  #[test]
  fn test_scenarios_for_customer() {
    let catalog = Catalog::demo();
    assert_eq!(catalog.scenarios_for_customer("demo").len(), 2);
    assert!(catalog.scenarios_for_customer("globex").is_empty());
  }

  #[test]
  fn test_rejects_dangling_answer() {
    let mut seed = demo_seed();
    seed.objects[0].correct_zone_id = ZoneId(77);
    let err = Catalog::from_seed(seed).unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(ref e) if e.field == "objects[1].correctZoneId"));
  }

  #[test]
  fn test_rejects_duplicate_ids() {
    let mut seed = demo_seed();
    let copy = seed.zones[0].clone();
    seed.zones.push(copy);
    let err = Catalog::from_seed(seed).unwrap_err();
    assert!(err.to_string().contains("duplicate id 1"));
  }

  #[test]
  fn test_rejects_small_zone() {
    let mut seed = demo_seed();
    seed.zones[1].height = 20;
    assert!(Catalog::from_seed(seed).is_err());
  }

  #[test]
  fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&demo_seed()).unwrap()).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.scenario_count(), 2);

    std::fs::write(&path, "{\"zones\": [").unwrap();
    assert!(matches!(Catalog::load(&path), Err(CatalogError::Json(_))));
  }

  #[test]
  fn test_catalog_is_an_answer_key() {
    let catalog = Catalog::demo();
    let report = validate(
      &catalog,
      [
        Placement::new(ObjectId(1), ZoneId(1)),
        Placement::new(ObjectId(3), ZoneId(1)),
      ],
    );
    assert_eq!(report.score, 10);
    assert_eq!(report.correct_count(), 1);
  }
}
