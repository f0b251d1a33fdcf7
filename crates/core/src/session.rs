//! One learner's interaction with one scenario.
//!
//! A session is created from a freshly fetched [`ScenarioBundle`] and owns the placement tracker
//! and drag state for as long as that scenario is on screen. Loading another scenario means
//! building a new session; nothing carries over.

use crate::drag::{DragError, DragInteraction, DropOutcome};
use crate::object::{GameObject, ObjectId};
use crate::placement::{Placement, PlacementTracker};
use crate::scenario::ScenarioBundle;
use crate::scoring::{AnswerKey, ValidationReport, validate};
use crate::zone::{Zone, ZoneId};
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, warn};

/// Something that can score placements, usually the remote validate endpoint
#[async_trait]
pub trait Scorer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  async fn score(&self, placements: &[Placement]) -> Result<ValidationReport, Self::Error>;
}

/// Scores in-process against a local answer key
#[derive(Debug, Clone)]
pub struct LocalScorer<K> {
  key: K,
}

impl<K> LocalScorer<K> {
  pub fn new(key: K) -> Self {
    Self { key }
  }
}

#[async_trait]
impl<K> Scorer for LocalScorer<K>
where
  K: AnswerKey + Send + Sync,
{
  type Error = Infallible;

  async fn score(&self, placements: &[Placement]) -> Result<ValidationReport, Self::Error> {
    Ok(validate(&self.key, placements.iter().copied()))
  }
}

pub struct ScenarioSession {
  bundle: ScenarioBundle,
  tracker: PlacementTracker,
  drag: DragInteraction,
  last_report: Option<ValidationReport>,
}

impl ScenarioSession {
  pub fn new(bundle: ScenarioBundle) -> Self {
    debug!(
      scenario = %bundle.scenario.id,
      zones = bundle.zones.len(),
      objects = bundle.objects.len(),
      "session started"
    );
    Self {
      bundle,
      tracker: PlacementTracker::new(),
      drag: DragInteraction::new(),
      last_report: None,
    }
  }

  pub fn bundle(&self) -> &ScenarioBundle {
    &self.bundle
  }

  pub fn tracker(&self) -> &PlacementTracker {
    &self.tracker
  }

  pub fn drag(&self) -> &DragInteraction {
    &self.drag
  }

  /// Objects still waiting in the panel
  pub fn available_objects(&self) -> impl Iterator<Item = &GameObject> + '_ {
    self
      .bundle
      .objects
      .iter()
      .filter(|o| !self.tracker.is_object_placed(o.id))
  }

  /// Placed objects with the zone each one sits in
  pub fn placed_objects(&self) -> impl Iterator<Item = (&GameObject, &Zone)> + '_ {
    self.bundle.objects.iter().filter_map(|o| {
      let zone = self.tracker.zone_of(o.id)?;
      Some((o, self.bundle.zone(zone)?))
    })
  }

  pub fn begin_drag(&mut self, object: ObjectId) -> Result<(), DragError> {
    if self.bundle.object(object).is_none() {
      return Err(DragError::NotInScenario(object));
    }
    self.drag.begin(object, &self.tracker)
  }

  /// Release the pointer at canvas coordinates
  pub fn drop_at(&mut self, x: f64, y: f64) -> Option<DropOutcome> {
    let zone = self.bundle.zone_at(x, y).map(|z| z.id);
    self.drag.drop_on(zone, &mut self.tracker)
  }

  /// Release over a zone identified by id. Zones outside the scenario count as empty canvas.
  pub fn drop_on_zone(&mut self, zone: ZoneId) -> Option<DropOutcome> {
    let target = self.bundle.zone(zone).map(|z| z.id);
    if target.is_none() {
      warn!(%zone, "drop on zone outside scenario");
    }
    self.drag.drop_on(target, &mut self.tracker)
  }

  pub fn cancel_drag(&mut self) -> Option<DropOutcome> {
    self.drag.cancel()
  }

  /// Full pick-up and drop in one call
  pub fn move_to_zone(&mut self, object: ObjectId, zone: ZoneId) -> Result<DropOutcome, DragError> {
    self.begin_drag(object)?;
    // begin succeeded, so a drop always resolves
    Ok(
      self
        .drop_on_zone(zone)
        .unwrap_or(DropOutcome::Cancelled { object }),
    )
  }

  /// Explicit removal gesture. Returns the zone the object was taken from.
  pub fn remove(&mut self, object: ObjectId) -> Result<Option<ZoneId>, DragError> {
    self.drag.remove(object, &mut self.tracker)
  }

  /// Free zones to highlight while something is being dragged
  pub fn highlighted_zones(&self) -> Vec<&Zone> {
    if self.drag.dragging().is_none() {
      return Vec::new();
    }
    self
      .bundle
      .zones
      .iter()
      .filter(|z| !self.tracker.is_zone_occupied(z.id))
      .collect()
  }

  pub fn placements(&self) -> Vec<Placement> {
    self.tracker.to_placements()
  }

  pub fn last_report(&self) -> Option<&ValidationReport> {
    self.last_report.as_ref()
  }

  /// Send the current placements for scoring. A failed call leaves every placement in place so
  /// the learner can simply try again.
  pub async fn submit<S: Scorer>(&mut self, scorer: &S) -> Result<ValidationReport, S::Error> {
    let placements = self.placements();
    debug!(count = placements.len(), "submitting placements");
    match scorer.score(&placements).await {
      Ok(report) => {
        self.last_report = Some(report.clone());
        Ok(report)
      }
      Err(e) => {
        warn!("validation failed: {}", e);
        Err(e)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::drag::ReturnReason;
  use crate::object::ObjectType;
  use crate::scenario::{Scenario, ScenarioId};
  use std::sync::atomic::{AtomicBool, Ordering};

  fn bundle() -> ScenarioBundle {
    let zones = vec![Zone::new(10, "DMZ", 0, 0, 200, 150), Zone::new(20, "Core", 300, 0, 200, 150)];
    let objects = vec![
      GameObject {
        id: ObjectId(1),
        name: "Web".to_string(),
        object_type: ObjectType::Server,
        correct_zone_id: ZoneId(10),
        error_message: "Web servers face the internet".to_string(),
        success_message: "Right, the DMZ".to_string(),
        points: 10,
      },
      GameObject {
        id: ObjectId(2),
        name: "Ledger".to_string(),
        object_type: ObjectType::Database,
        correct_zone_id: ZoneId(20),
        error_message: "Keep data away from the edge".to_string(),
        success_message: "Right, the core".to_string(),
        points: 5,
      },
    ];
    ScenarioBundle {
      scenario: Scenario {
        id: ScenarioId(1),
        name: "Three tier".to_string(),
        customer_name: "acme".to_string(),
        description: None,
        zone_ids: vec![ZoneId(10), ZoneId(20)],
        object_ids: vec![ObjectId(1), ObjectId(2)],
      },
      zones,
      objects,
    }
  }

  #[test]
  fn test_drop_at_point_hits_zone() {
    let mut session = ScenarioSession::new(bundle());
    session.begin_drag(ObjectId(1)).unwrap();
    assert_eq!(session.highlighted_zones().len(), 2);

    let outcome = session.drop_at(50.0, 50.0).unwrap();
    assert!(outcome.is_placed());
    assert_eq!(session.tracker().zone_of(ObjectId(1)), Some(ZoneId(10)));
    assert!(session.highlighted_zones().is_empty());

    let available: Vec<_> = session.available_objects().map(|o| o.id).collect();
    assert_eq!(available, vec![ObjectId(2)]);
    let placed: Vec<_> = session.placed_objects().map(|(o, z)| (o.id, z.id)).collect();
    assert_eq!(placed, vec![(ObjectId(1), ZoneId(10))]);
  }

  #[test]
  fn test_drop_between_zones_returns_object() {
    let mut session = ScenarioSession::new(bundle());
    session.begin_drag(ObjectId(1)).unwrap();
    let outcome = session.drop_at(250.0, 50.0).unwrap();
    assert_eq!(
      outcome,
      DropOutcome::Returned {
        object: ObjectId(1),
        reason: ReturnReason::OffZone
      }
    );
    assert!(session.placements().is_empty());
  }

  #[test]
  fn test_unknown_object_and_zone() {
    let mut session = ScenarioSession::new(bundle());
    assert_eq!(session.begin_drag(ObjectId(9)), Err(DragError::NotInScenario(ObjectId(9))));

    let outcome = session.move_to_zone(ObjectId(1), ZoneId(99)).unwrap();
    assert!(!outcome.is_placed());
    assert!(session.placements().is_empty());
  }

  #[test]
  fn test_highlight_skips_occupied_zones() {
    let mut session = ScenarioSession::new(bundle());
    session.move_to_zone(ObjectId(1), ZoneId(10)).unwrap();
    session.begin_drag(ObjectId(2)).unwrap();
    let ids: Vec<_> = session.highlighted_zones().iter().map(|z| z.id).collect();
    assert_eq!(ids, vec![ZoneId(20)]);
  }

  #[tokio::test]
  async fn test_submit_scores_current_placements() {
    let mut session = ScenarioSession::new(bundle());
    session.move_to_zone(ObjectId(1), ZoneId(10)).unwrap();
    session.move_to_zone(ObjectId(2), ZoneId(10)).unwrap(); // rejected, zone taken

    let scorer = LocalScorer::new(session.bundle().objects.clone());
    let report = session.submit(&scorer).await.unwrap();
    assert_eq!(report.score, 10);
    assert_eq!(report.results.len(), 1);
    assert_eq!(session.last_report(), Some(&report));
  }

  #[derive(Debug, thiserror::Error)]
  #[error("connection refused")]
  struct Offline;

  struct FailingScorer {
    called: AtomicBool,
  }

  #[async_trait]
  impl Scorer for FailingScorer {
    type Error = Offline;

    async fn score(&self, _placements: &[Placement]) -> Result<ValidationReport, Self::Error> {
      self.called.store(true, Ordering::SeqCst);
      Err(Offline)
    }
  }

  #[tokio::test]
  async fn test_failed_submit_preserves_placements() {
    let mut session = ScenarioSession::new(bundle());
    session.move_to_zone(ObjectId(1), ZoneId(20)).unwrap();
    let before = session.placements();

    let scorer = FailingScorer {
      called: AtomicBool::new(false),
    };
    assert!(session.submit(&scorer).await.is_err());
    assert!(scorer.called.load(Ordering::SeqCst));
    assert_eq!(session.placements(), before);
    assert!(session.last_report().is_none());

    // retry against a working scorer
    let report = session
      .submit(&LocalScorer::new(session.bundle().objects.clone()))
      .await
      .unwrap();
    assert_eq!(report.score, 0);
    assert_eq!(report.results[0].message, "Web servers face the internet");
  }
}
