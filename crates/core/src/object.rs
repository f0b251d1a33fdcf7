use crate::zone::ZoneId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a draggable object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub i64);

impl std::fmt::Display for ObjectId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for ObjectId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.trim().parse()?))
  }
}

/// Kind of infrastructure an object represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
  Server,
  Database,
  #[serde(rename = "Active Directory")]
  ActiveDirectory,
  #[serde(rename = "Network Device")]
  NetworkDevice,
}

impl ObjectType {
  pub const ALL: [ObjectType; 4] = [
    ObjectType::Server,
    ObjectType::Database,
    ObjectType::ActiveDirectory,
    ObjectType::NetworkDevice,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ObjectType::Server => "Server",
      ObjectType::Database => "Database",
      ObjectType::ActiveDirectory => "Active Directory",
      ObjectType::NetworkDevice => "Network Device",
    }
  }
}

impl std::fmt::Display for ObjectType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.pad(self.as_str())
  }
}

impl std::str::FromStr for ObjectType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
      "server" => Ok(ObjectType::Server),
      "database" => Ok(ObjectType::Database),
      "active directory" => Ok(ObjectType::ActiveDirectory),
      "network device" => Ok(ObjectType::NetworkDevice),
      _ => Err(format!("Unknown object type: {}", s)),
    }
  }
}

/// A draggable item together with its answer key entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
  pub id: ObjectId,
  pub name: String,
  pub object_type: ObjectType,
  pub correct_zone_id: ZoneId,
  pub error_message: String,
  pub success_message: String,
  pub points: u32,
}

impl GameObject {
  pub fn is_correct_zone(&self, zone: ZoneId) -> bool {
    self.correct_zone_id == zone
  }

  /// Feedback text for a placement with the given correctness
  pub fn message_for(&self, correct: bool) -> &str {
    if correct {
      &self.success_message
    } else {
      &self.error_message
    }
  }
}
