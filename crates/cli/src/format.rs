//! Plain-text rendering for terminal output

use dropcheck_core::{DropOutcome, ObjectId, ReturnReason, Scenario, ScenarioBundle, ScenarioSession, ValidationReport};
use std::fmt::Write;

/// Scenario header followed by its zones and objects
pub fn format_bundle(bundle: &ScenarioBundle) -> String {
  let mut out = String::new();
  let scenario = &bundle.scenario;
  let _ = writeln!(out, "Scenario {}: {} ({})", scenario.id, scenario.name, scenario.customer_name);
  if let Some(ref description) = scenario.description {
    let _ = writeln!(out, "  {}", description);
  }

  let _ = writeln!(out, "\nZones:");
  for zone in &bundle.zones {
    let _ = writeln!(
      out,
      "  [{}] {:<24} at ({}, {}) {}x{}",
      zone.id, zone.name, zone.x, zone.y, zone.width, zone.height
    );
  }

  let _ = writeln!(out, "\nObjects:");
  for object in &bundle.objects {
    let _ = writeln!(
      out,
      "  [{}] {:<24} {:<16} {} pts",
      object.id, object.name, object.object_type, object.points
    );
  }
  let _ = write!(out, "\nMaximum score: {}", bundle.max_score());
  out
}

pub fn format_scenario_list(customer: &str, scenarios: &[Scenario]) -> String {
  if scenarios.is_empty() {
    return format!("No scenarios for {}", customer);
  }

  let mut out = format!("Scenarios for {}:", customer);
  for scenario in scenarios {
    let _ = write!(
      out,
      "\n  [{}] {} ({} zones, {} objects)",
      scenario.id,
      scenario.name,
      scenario.zone_ids.len(),
      scenario.object_ids.len()
    );
  }
  out
}

/// One line per gesture, naming objects and zones where the session knows them
pub fn format_outcome(session: &ScenarioSession, outcome: &DropOutcome) -> String {
  let bundle = session.bundle();
  let object_name = |id: ObjectId| bundle.object(id).map(|o| o.name.clone()).unwrap_or_else(|| id.to_string());

  match *outcome {
    DropOutcome::Placed { object, zone } => {
      let zone_name = bundle.zone(zone).map(|z| z.name.as_str()).unwrap_or("?");
      format!("placed {} in {}", object_name(object), zone_name)
    }
    DropOutcome::Returned {
      object,
      reason: ReturnReason::OffZone,
    } => format!("{} returned: not over a zone", object_name(object)),
    DropOutcome::Returned {
      object,
      reason: ReturnReason::ZoneOccupied { occupant },
    } => format!("{} returned: zone already holds {}", object_name(object), object_name(occupant)),
    DropOutcome::Cancelled { object } => format!("{} drag cancelled", object_name(object)),
  }
}

/// Current board: what sits in each zone and what is still unplaced
pub fn format_board(session: &ScenarioSession) -> String {
  let mut out = String::from("Board:");
  let placed: Vec<_> = session.placed_objects().collect();
  for zone in &session.bundle().zones {
    let occupant = placed
      .iter()
      .find(|(_, z)| z.id == zone.id)
      .map(|(o, _)| o.name.as_str())
      .unwrap_or("-");
    let _ = write!(out, "\n  {:<24} {}", zone.name, occupant);
  }

  let waiting: Vec<_> = session.available_objects().map(|o| o.name.as_str()).collect();
  if !waiting.is_empty() {
    let _ = write!(out, "\nUnplaced: {}", waiting.join(", "));
  }
  out
}

/// Verdict, score and per-object feedback
pub fn format_report(report: &ValidationReport, names: impl Fn(ObjectId) -> Option<String>) -> String {
  let mut out = format!(
    "{} Score: {} ({}/{} correct)",
    report.verdict().title(),
    report.score,
    report.correct_count(),
    report.results.len()
  );
  for result in &report.results {
    let mark = if result.correct { "+" } else { "x" };
    let name = names(result.object_id).unwrap_or_else(|| format!("Object {}", result.object_id));
    let _ = write!(out, "\n  {} {}: {}", mark, name, result.message);
  }
  out
}
