pub mod check;
pub mod config;
pub mod drag;
pub mod error;
pub mod object;
pub mod placement;
pub mod scenario;
pub mod scoring;
pub mod session;
pub mod zone;

pub use check::{CheckError, CheckResult, check_object, check_scenario, check_zone, require_text, unique_ids};
pub use config::{ClientConfig, Config, PROJECT_CONFIG_FILE, ServerConfig, default_data_dir, default_port};
pub use drag::{DragError, DragInteraction, DragState, DropOutcome, ReturnReason};
pub use error::{Error, Result};
pub use object::{GameObject, ObjectId, ObjectType};
pub use placement::{PlaceOutcome, Placement, PlacementTracker};
pub use scenario::{Scenario, ScenarioBundle, ScenarioId};
pub use scoring::{AnswerKey, ValidateRequest, ValidationReport, ValidationResult, Verdict, validate};
pub use session::{LocalScorer, ScenarioSession, Scorer};
pub use zone::{MIN_ZONE_SIZE, Zone, ZoneId};
