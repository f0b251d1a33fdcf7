//! Play command: drive a scenario session from the command line and submit it

use crate::client::ApiClient;
use crate::format::{format_board, format_outcome, format_report};
use anyhow::{Context, Result, anyhow};
use daemon::Catalog;
use dropcheck_core::{LocalScorer, ObjectId, Placement, ScenarioBundle, ScenarioId, ScenarioSession, Scorer};
use std::path::Path;
use tracing::debug;

/// Drop an object at canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPoint {
  pub object: ObjectId,
  pub x: f64,
  pub y: f64,
}

/// One replayed learner gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
  /// Drag an object onto a zone by id
  Move(Placement),
  /// Drag an object and release it at canvas coordinates
  Drop(DropPoint),
  /// Take a placed object back out of its zone
  Remove(ObjectId),
}

/// Play a scenario. With a local catalog the session is scored in-process; otherwise the
/// scenario is fetched from and scored by the server.
pub async fn cmd_play(
  client: &ApiClient,
  catalog: Option<&Path>,
  id: ScenarioId,
  gestures: &[Gesture],
  json: bool,
) -> Result<()> {
  match catalog {
    Some(path) => {
      let catalog = Catalog::load(path).with_context(|| format!("Failed to load catalog {:?}", path))?;
      let bundle = catalog
        .bundle(id)
        .ok_or_else(|| anyhow!("Scenario {} not found in {:?}", id, path))?;
      play(bundle, &LocalScorer::new(catalog), gestures, json).await
    }
    None => {
      let bundle = client
        .scenario(id)
        .await
        .with_context(|| format!("Failed to fetch scenario {}", id))?;
      play(bundle, client, gestures, json).await
    }
  }
}

async fn play<S: Scorer>(bundle: ScenarioBundle, scorer: &S, gestures: &[Gesture], json: bool) -> Result<()> {
  let mut session = ScenarioSession::new(bundle);
  let log = apply(&mut session, gestures);

  let report = session.submit(scorer).await.context("Validation failed")?;

  if json {
    let output = serde_json::json!({
      "placements": session.placements(),
      "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  for line in &log {
    println!("{}", line);
  }
  println!("\n{}\n", format_board(&session));
  let bundle = session.bundle();
  println!(
    "{}",
    format_report(&report, |id| bundle.object(id).map(|o| o.name.clone()))
  );
  Ok(())
}

/// Replay gestures against the session in order, one log line per gesture. Refused gestures
/// are reported and skipped, the way the board would simply not pick the object up.
fn apply(session: &mut ScenarioSession, gestures: &[Gesture]) -> Vec<String> {
  gestures.iter().map(|gesture| apply_one(session, gesture)).collect()
}

fn apply_one(session: &mut ScenarioSession, gesture: &Gesture) -> String {
  match *gesture {
    Gesture::Move(placement) => match session.move_to_zone(placement.object_id, placement.zone_id) {
      Ok(outcome) => format_outcome(session, &outcome),
      Err(e) => format!("refused: {}", e),
    },
    Gesture::Drop(drop) => {
      if let Err(e) = session.begin_drag(drop.object) {
        return format!("refused: {}", e);
      }
      debug!("highlighting {} free zones", session.highlighted_zones().len());
      match session.drop_at(drop.x, drop.y) {
        Some(outcome) => format_outcome(session, &outcome),
        None => format!("refused: object {} was not being dragged", drop.object),
      }
    }
    Gesture::Remove(object) => match session.remove(object) {
      Ok(Some(zone)) => format!("removed object {} from zone {}", object, zone),
      Ok(None) => format!("object {} was not placed", object),
      Err(e) => format!("refused: {}", e),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use dropcheck_core::ZoneId;
  use pretty_assertions::assert_eq;

  fn demo_session() -> ScenarioSession {
    ScenarioSession::new(Catalog::demo().bundle(ScenarioId(1)).unwrap())
  }

  fn place(object: i64, zone: i64) -> Gesture {
    Gesture::Move(Placement::new(ObjectId(object), ZoneId(zone)))
  }

  #[test]
  fn test_apply_gestures() {
    let mut session = demo_session();
    let gestures = [
      place(1, 1),
      place(5, 1),
      place(4, 2),
      // Inside the Data Tier zone at (840, 80)
      Gesture::Drop(DropPoint {
        object: ObjectId(2),
        x: 900.0,
        y: 100.0,
      }),
      Gesture::Remove(ObjectId(1)),
      Gesture::Remove(ObjectId(3)),
    ];

    let log = apply(&mut session, &gestures);
    assert_eq!(
      log,
      vec![
        "placed Web Server in DMZ".to_string(),
        "API Server returned: zone already holds Web Server".to_string(),
        "refused: Object 4 is not part of this scenario".to_string(),
        "placed Customer Database in Data Tier".to_string(),
        "removed object 1 from zone 1".to_string(),
        "object 3 was not placed".to_string(),
      ]
    );
    assert_eq!(session.placements(), vec![Placement::new(ObjectId(2), ZoneId(3))]);
    assert!(session.drag().is_idle());
  }

  #[test]
  fn test_remove_then_drag_again() {
    let mut session = demo_session();
    let gestures = [place(1, 2), Gesture::Remove(ObjectId(1)), place(1, 1), place(5, 2)];

    let log = apply(&mut session, &gestures);
    assert_eq!(
      log,
      vec![
        "placed Web Server in Application Tier".to_string(),
        "removed object 1 from zone 2".to_string(),
        "placed Web Server in DMZ".to_string(),
        "placed API Server in Application Tier".to_string(),
      ]
    );
    assert_eq!(session.placements().len(), 2);
    assert_eq!(session.tracker().zone_of(ObjectId(1)), Some(ZoneId(1)));
  }

  #[test]
  fn test_drop_off_canvas_returns_object() {
    let mut session = demo_session();
    let gestures = [Gesture::Drop(DropPoint {
      object: ObjectId(1),
      x: 5.0,
      y: 5.0,
    })];
    let log = apply(&mut session, &gestures);
    assert_eq!(log, vec!["Web Server returned: not over a zone".to_string()]);
    assert!(session.placements().is_empty());
  }

  #[tokio::test]
  async fn test_play_against_local_catalog() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string(&daemon::demo_seed()).unwrap()).unwrap();

    let client = ApiClient::new(&dropcheck_core::ClientConfig::default()).unwrap();
    let gestures = [place(4, 1), place(5, 2)];
    cmd_play(&client, Some(&path), ScenarioId(2), &gestures, true).await.unwrap();

    let err = cmd_play(&client, Some(&path), ScenarioId(9), &gestures, true).await.unwrap_err();
    assert!(err.to_string().contains("Scenario 9 not found"));
  }
}
