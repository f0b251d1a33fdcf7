//! HTTP client for a running dropcheck server

use async_trait::async_trait;
use daemon::{ErrorBody, StatusInfo};
use dropcheck_core::{ClientConfig, Placement, Scenario, ScenarioBundle, ScenarioId, Scorer, ValidationReport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
  #[error("Request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("Invalid server URL: {0}")]
  InvalidUrl(String),
  #[error("Server returned {status}: {message}")]
  Status { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
  client: reqwest::Client,
  base_url: reqwest::Url,
}

impl ApiClient {
  pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
    let base_url = reqwest::Url::parse(config.base_url.trim_end_matches('/'))
      .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(ClientError::InvalidUrl(config.base_url.clone()));
    }

    let client = reqwest::Client::builder()
      .user_agent(concat!("dropcheck/", env!("CARGO_PKG_VERSION")))
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &str {
    self.base_url.as_str().trim_end_matches('/')
  }

  /// Append path segments to the base URL, percent-encoding each one
  fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
    let mut url = self.base_url.clone();
    // `new` rejects cannot-be-a-base URLs, so the path is always editable
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  pub async fn scenario(&self, id: ScenarioId) -> Result<ScenarioBundle, ClientError> {
    self.get(self.endpoint(&["api", "scenario", &id.to_string()])).await
  }

  pub async fn scenarios(&self, customer: &str) -> Result<Vec<Scenario>, ClientError> {
    self.get(self.endpoint(&["api", "scenarios", customer])).await
  }

  pub async fn status(&self) -> Result<StatusInfo, ClientError> {
    self.get(self.endpoint(&["api", "status"])).await
  }

  pub async fn validate(&self, placements: &[Placement]) -> Result<ValidationReport, ClientError> {
    #[derive(Serialize)]
    struct Body<'a> {
      placements: &'a [Placement],
    }

    debug!("POST /api/validate with {} placements", placements.len());
    let response = self
      .client
      .post(self.endpoint(&["api", "validate"]))
      .json(&Body { placements })
      .send()
      .await?;
    Self::decode(response).await
  }

  async fn get<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, ClientError> {
    debug!("GET {}", url.path());
    let response = self.client.get(url).send().await?;
    Self::decode(response).await
  }

  async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
      warn!("Server returned {}: {}", status, message);
      return Err(ClientError::Status {
        status: status.as_u16(),
        message,
      });
    }
    Ok(response.json().await?)
  }
}

#[async_trait]
impl Scorer for ApiClient {
  type Error = ClientError;

  async fn score(&self, placements: &[Placement]) -> Result<ValidationReport, Self::Error> {
    self.validate(placements).await
  }
}
