use serde::{Deserialize, Serialize};

/// Smallest width or height a zone may have, in canvas pixels
pub const MIN_ZONE_SIZE: u32 = 50;

/// Unique identifier for a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub i64);

impl std::fmt::Display for ZoneId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for ZoneId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.trim().parse()?))
  }
}

/// A named rectangular target region on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
  pub id: ZoneId,
  pub name: String,
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Zone {
  pub fn new(id: i64, name: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
    Self {
      id: ZoneId(id),
      name: name.into(),
      x,
      y,
      width,
      height,
      description: None,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Hit test. The top and left edges belong to the zone, the bottom and right edges do not,
  /// so two zones sharing an edge never both claim a point.
  pub fn contains(&self, x: f64, y: f64) -> bool {
    let left = f64::from(self.x);
    let top = f64::from(self.y);
    x >= left && x < left + f64::from(self.width) && y >= top && y < top + f64::from(self.height)
  }

  /// Top-left position that centres an item of the given size inside this zone
  pub fn anchor_for(&self, item_width: u32, item_height: u32) -> (f64, f64) {
    let x = f64::from(self.x) + (f64::from(self.width) - f64::from(item_width)) / 2.0;
    let y = f64::from(self.y) + (f64::from(self.height) - f64::from(item_height)) / 2.0;
    (x, y)
  }

  pub fn is_usable_size(&self) -> bool {
    self.width >= MIN_ZONE_SIZE && self.height >= MIN_ZONE_SIZE
  }
}
