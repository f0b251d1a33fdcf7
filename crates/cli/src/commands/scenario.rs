//! Read-only commands against a running server

use crate::client::ApiClient;
use crate::format::{format_bundle, format_report, format_scenario_list};
use anyhow::{Context, Result};
use dropcheck_core::{Placement, ScenarioId};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Show one scenario with its zones and objects
pub async fn cmd_scenario(client: &ApiClient, id: ScenarioId, json: bool) -> Result<()> {
  let bundle = client
    .scenario(id)
    .await
    .with_context(|| format!("Failed to fetch scenario {}", id))?;

  if json {
    return print_json(&bundle);
  }
  println!("{}", format_bundle(&bundle));
  Ok(())
}

/// List a customer's scenarios
pub async fn cmd_scenarios(client: &ApiClient, customer: &str, json: bool) -> Result<()> {
  let scenarios = client
    .scenarios(customer)
    .await
    .with_context(|| format!("Failed to list scenarios for {}", customer))?;

  if json {
    return print_json(&scenarios);
  }
  println!("{}", format_scenario_list(customer, &scenarios));
  Ok(())
}

/// Score raw placements without a session
pub async fn cmd_validate(client: &ApiClient, placements: &[Placement], json: bool) -> Result<()> {
  let report = client.validate(placements).await.context("Validation failed")?;

  if json {
    return print_json(&report);
  }
  println!("{}", format_report(&report, |_| None));
  Ok(())
}

pub async fn cmd_status(client: &ApiClient, json: bool) -> Result<()> {
  let status = client
    .status()
    .await
    .with_context(|| format!("Server not reachable at {}", client.base_url()))?;

  if json {
    return print_json(&status);
  }
  println!("Server:     {} ({})", client.base_url(), status.status);
  println!("Version:    {}", status.version);
  println!("Scenarios:  {}", status.scenarios);
  println!("Zones:      {}", status.zones);
  println!("Objects:    {}", status.objects);
  Ok(())
}
