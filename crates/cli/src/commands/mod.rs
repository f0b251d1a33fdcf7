//! CLI command implementations

mod config;
mod play;
mod scenario;
mod serve;

pub use config::{cmd_config_init, cmd_config_show};
pub use play::{DropPoint, Gesture, cmd_play};
pub use scenario::{cmd_scenario, cmd_scenarios, cmd_status, cmd_validate};
pub use serve::cmd_serve;

use dropcheck_core::{ObjectId, Placement, ZoneId};

/// Parse `OBJ:ZONE` into a placement
pub fn parse_placement(s: &str) -> Result<Placement, String> {
  let (object, zone) = s
    .split_once(':')
    .ok_or_else(|| format!("expected OBJECT:ZONE, got '{}'", s))?;
  let object: ObjectId = object.parse().map_err(|_| format!("invalid object id '{}'", object))?;
  let zone: ZoneId = zone.parse().map_err(|_| format!("invalid zone id '{}'", zone))?;
  Ok(Placement::new(object, zone))
}

/// Parse `OBJ@X,Y` into a drop at canvas coordinates
pub fn parse_drop_point(s: &str) -> Result<DropPoint, String> {
  let (object, point) = s
    .split_once('@')
    .ok_or_else(|| format!("expected OBJECT@X,Y, got '{}'", s))?;
  let (x, y) = point
    .split_once(',')
    .ok_or_else(|| format!("expected X,Y after '@', got '{}'", point))?;
  Ok(DropPoint {
    object: object.parse().map_err(|_| format!("invalid object id '{}'", object))?,
    x: x.trim().parse().map_err(|_| format!("invalid x coordinate '{}'", x))?,
    y: y.trim().parse().map_err(|_| format!("invalid y coordinate '{}'", y))?,
  })
}
