use crate::catalog::Catalog;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dropcheck_core::{Scenario, ScenarioBundle, ScenarioId, ValidateRequest, ValidationReport, validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
  catalog: Arc<Catalog>,
}

impl AppState {
  pub fn new(catalog: Catalog) -> Self {
    Self {
      catalog: Arc::new(catalog),
    }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }
}

/// JSON error body: `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  BadRequest(String),
  #[error("{message}")]
  Rejected { status: StatusCode, message: String },
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Rejected { status, .. } => *status,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Rejected {
      status: rejection.status(),
      message: rejection.body_text(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorBody {
      message: self.to_string(),
    };
    (status, Json(body)).into_response()
  }
}

/// Status summary for `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
  pub status: String,
  pub version: String,
  pub scenarios: usize,
  pub zones: usize,
  pub objects: usize,
}

/// Build the HTTP routes
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/status", get(status))
    .route("/api/scenario/{scenario_id}", get(get_scenario))
    .route("/api/scenarios/{customer}", get(list_customer_scenarios))
    .route("/api/validate", post(validate_placements))
    .with_state(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health() -> &'static str {
  "ok"
}

async fn status(State(state): State<AppState>) -> Json<StatusInfo> {
  let catalog = state.catalog();
  Json(StatusInfo {
    status: "running".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    scenarios: catalog.scenario_count(),
    zones: catalog.zone_count(),
    objects: catalog.object_count(),
  })
}

async fn get_scenario(
  State(state): State<AppState>,
  Path(scenario_id): Path<String>,
) -> Result<Json<ScenarioBundle>, ApiError> {
  let id: ScenarioId = scenario_id
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("Invalid scenario id: {}", scenario_id)))?;

  let bundle = state
    .catalog()
    .bundle(id)
    .ok_or_else(|| ApiError::NotFound("Scenario not found".to_string()))?;

  debug!(
    "Scenario {}: {} zones, {} objects",
    id,
    bundle.zones.len(),
    bundle.objects.len()
  );
  Ok(Json(bundle))
}

async fn list_customer_scenarios(State(state): State<AppState>, Path(customer): Path<String>) -> Json<Vec<Scenario>> {
  Json(state.catalog().scenarios_for_customer(&customer))
}

async fn validate_placements(
  State(state): State<AppState>,
  body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
  let Json(request) = body.inspect_err(|e| warn!("Rejected validate body: {}", e))?;

  let submitted = request.placements.len();
  let report = validate(state.catalog(), request.placements);
  info!(
    "Validated {} placements: score {}, {}/{} correct",
    submitted,
    report.score,
    report.correct_count(),
    report.results.len()
  );
  Ok(Json(report))
}
