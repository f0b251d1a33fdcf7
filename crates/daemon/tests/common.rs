//! Common test utilities for daemon integration tests

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use daemon::{AppState, Catalog, CatalogSeed, build_router};
use dropcheck_core::{GameObject, ObjectId, ObjectType, Scenario, ScenarioId, Zone, ZoneId};
use tower::ServiceExt;

/// Small answer key: object 1 belongs in zone 10 and is worth 5 points
#[allow(dead_code)]
pub fn test_seed() -> CatalogSeed {
  let object = |id: i64, zone: i64, points: u32| GameObject {
    id: ObjectId(id),
    name: format!("Object {}", id),
    object_type: ObjectType::Server,
    correct_zone_id: ZoneId(zone),
    error_message: "E".to_string(),
    success_message: "S".to_string(),
    points,
  };

  CatalogSeed {
    zones: vec![Zone::new(10, "Zone A", 0, 0, 100, 100), Zone::new(20, "Zone B", 200, 0, 100, 100)],
    objects: vec![object(1, 10, 5), object(2, 20, 3)],
    scenarios: vec![Scenario {
      id: ScenarioId(1),
      name: "Basics".to_string(),
      customer_name: "acme".to_string(),
      description: None,
      zone_ids: vec![ZoneId(20), ZoneId(10)],
      object_ids: vec![ObjectId(1), ObjectId(2)],
    }],
  }
}

#[allow(dead_code)]
pub fn create_test_router() -> Router {
  let catalog = Catalog::from_seed(test_seed()).expect("test seed should be valid");
  build_router(AppState::new(catalog))
}

/// Send a request through the router and decode the JSON body
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
  let response = router.oneshot(request).await.expect("router is infallible");
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("Failed to read body");
  let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
  (status, json)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).expect("valid request")
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .expect("valid request")
}
