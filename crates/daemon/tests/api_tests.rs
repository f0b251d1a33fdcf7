//! Integration tests for the HTTP API, driven through the router without a socket.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_router, get, post_json, send};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_health() {
  let response = tower::ServiceExt::oneshot(create_test_router(), get("/health"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_status_counts_catalog() {
  let (status, body) = send(create_test_router(), get("/api/status")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "running");
  assert_eq!(body["scenarios"], 1);
  assert_eq!(body["zones"], 2);
  assert_eq!(body["objects"], 2);
}

#[tokio::test]
async fn test_get_scenario_bundle() {
  let (status, body) = send(create_test_router(), get("/api/scenario/1")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["scenario"]["name"], "Basics");
  assert_eq!(body["scenario"]["customerName"], "acme");

  // Zones come back in the scenario's listed order, not id order
  let zone_ids: Vec<i64> = body["zones"]
    .as_array()
    .unwrap()
    .iter()
    .map(|z| z["id"].as_i64().unwrap())
    .collect();
  assert_eq!(zone_ids, vec![20, 10]);

  let first_object = &body["objects"][0];
  assert_eq!(first_object["correctZoneId"], 10);
  assert_eq!(first_object["objectType"], "Server");
  assert_eq!(first_object["points"], 5);
}

#[tokio::test]
async fn test_unknown_scenario_is_404() {
  let (status, body) = send(create_test_router(), get("/api/scenario/99")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"message": "Scenario not found"}));
}

#[tokio::test]
async fn test_non_numeric_scenario_id_is_400() {
  let (status, body) = send(create_test_router(), get("/api/scenario/abc")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_customer_scenarios() {
  let (status, body) = send(create_test_router(), get("/api/scenarios/acme")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["id"], 1);

  let (status, body) = send(create_test_router(), get("/api/scenarios/globex")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_validate_correct_placement() {
  let request = post_json("/api/validate", json!({"placements": [{"objectId": 1, "zoneId": 10}]}));
  let (status, body) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({"score": 5, "results": [{"objectId": 1, "correct": true, "message": "S"}]})
  );
}

#[tokio::test]
async fn test_validate_wrong_and_unknown() {
  let request = post_json(
    "/api/validate",
    json!({"placements": [
      {"objectId": 1, "zoneId": 20},
      {"objectId": 999, "zoneId": 10},
      {"objectId": 2, "zoneId": 20}
    ]}),
  );
  let (status, body) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({"score": 3, "results": [
      {"objectId": 1, "correct": false, "message": "E"},
      {"objectId": 2, "correct": true, "message": "S"}
    ]})
  );
}

#[tokio::test]
async fn test_validate_empty_submission() {
  let request = post_json("/api/validate", json!({"placements": []}));
  let (status, body) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"score": 0, "results": []}));
}

#[tokio::test]
async fn test_validate_duplicate_object_scored_once() {
  let request = post_json(
    "/api/validate",
    json!({"placements": [
      {"objectId": 1, "zoneId": 10},
      {"objectId": 1, "zoneId": 10}
    ]}),
  );
  let (_, body) = send(create_test_router(), request).await;
  assert_eq!(body["score"], 5);
  assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validate_malformed_body_is_rejected() {
  let request = Request::builder()
    .method("POST")
    .uri("/api/validate")
    .header("content-type", "application/json")
    .body(Body::from("{\"placements\": ["))
    .unwrap();
  let (status, body) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].is_string());

  // Well-formed JSON with the wrong shape fails deserialization instead
  let request = post_json("/api/validate", json!({"placements": [{"objectId": "one"}]}));
  let (status, body) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_validate_requires_json_content_type() {
  let request = Request::builder()
    .method("POST")
    .uri("/api/validate")
    .body(Body::from("{\"placements\": []}"))
    .unwrap();
  let (status, _) = send(create_test_router(), request).await;
  assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
