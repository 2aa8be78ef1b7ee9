//! Integration tests for the HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sai::core::create_router;

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_session(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(post("/session/new", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_create_session() {
    let app = create_router();

    let response = app
        .oneshot(post(
            "/session/new",
            json!({"profile": {"plain_language": true}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["session_id"].is_string());
    assert!(body["websocket_url"].as_str().unwrap().starts_with("/ws/"));
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/session/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_message_to_unknown_session_404() {
    let app = create_router();

    let response = app
        .oneshot(post("/session/nonexistent/message", json!({"text": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_neutral_message_flow() {
    let app = create_router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            &format!("/session/{}/message", id),
            json!({"text": "I repotted the fern and tidied the desk this afternoon"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["distress"], "low");
    assert_eq!(body["stress_level"], "calm");
    assert_eq!(body["action"], "monitor");
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn test_crisis_message_flow() {
    let app = create_router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            &format!("/session/{}/message", id),
            json!({"text": "I can't go on, it's all too much, the flashbacks keep coming back"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["path"], "gentle");
    assert_eq!(body["distress"], "high");
    assert_eq!(body["action"], "crisis-protocol");
    assert!(body["guidance"]["grounding_prompt"].is_string());

    // Status reflects the escalation
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/session/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["distress"], "high");
    assert_eq!(body["message_count"], 1);
}

#[tokio::test]
async fn test_path_preference_round_trip() {
    let app = create_router();
    let id = create_session(&app).await;

    // Set a preference
    let response = app
        .clone()
        .oneshot(put(&format!("/session/{}/path", id), json!({"path": "direct"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["path_preference"], "direct");

    // Neutral message now routes on the preference
    let response = app
        .clone()
        .oneshot(post(
            &format!("/session/{}/message", id),
            json!({"text": "walked to the market and back, legs are tired"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["path"], "direct");

    // Clear it again
    let response = app
        .clone()
        .oneshot(put(&format!("/session/{}/path", id), json!({"path": null})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["path_preference"].is_null());
}

#[tokio::test]
async fn test_preference_does_not_survive_crisis() {
    let app = create_router();
    let id = create_session(&app).await;

    app.clone()
        .oneshot(put(&format!("/session/{}/path", id), json!({"path": "direct"})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post(
            &format!("/session/{}/message", id),
            json!({"text": "honestly I just want to end it all"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["path"], "gentle");
}

#[tokio::test]
async fn test_voice_metrics_accepted() {
    let app = create_router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            &format!("/session/{}/message", id),
            json!({
                "text": "I feel a bit overwhelmed today",
                "voice": {"pitch": 290.0, "pace": 240.0, "volume": 0.95}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let score = body["stress_score"].as_f64().unwrap();
    assert!(score > 15.0, "voice deviation should add points, got {}", score);
}

#[tokio::test]
async fn test_ws_route_requires_known_session() {
    let app = create_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ws/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // 404 from the handler (or 400 for the missing upgrade headers), never 200
    assert_ne!(response.status(), StatusCode::OK);
}
