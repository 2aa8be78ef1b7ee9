//! HTTP + WebSocket API for the SAI engine
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/message - Process a message
//! - PUT /session/{id}/path - Set/clear manual path preference
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message as WsMessage, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::core::{EmotionalStateTracker, GuidanceBuilder, PathRouter, StressDetector};
use crate::types::{
    BehaviorWindow, CheckInKind, CommunicationProfile, DistressLevel, Message,
    RecommendedAction, ResponseGuidance, ResponsePath, RouteReason, StressLevel, VoiceMetrics,
};

/// Session state
pub struct Session {
    pub id: String,
    pub router: PathRouter,
    pub detector: StressDetector,
    pub tracker: EmotionalStateTracker,
    pub window: BehaviorWindow,
    pub guidance: GuidanceBuilder,
    pub profile: CommunicationProfile,
    pub manual_path: Option<ResponsePath>,
    pub message_count: u64,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub distress: DistressLevel,
    pub score: f64,
    pub path: ResponsePath,
    pub message_count: u64,
    pub check_in: Option<CheckInKind>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub profile: Option<CommunicationProfile>,
    pub path_preference: Option<ResponsePath>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub distress: DistressLevel,
    pub score: f64,
    pub path_preference: Option<ResponsePath>,
    pub message_count: u64,
    pub profile_adjusted: bool,
}

/// Process message request
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
    pub voice: Option<VoiceMetrics>,
}

/// Process message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub path: ResponsePath,
    pub reason: RouteReason,
    pub reason_text: String,
    pub confidence: f64,
    pub stress_level: StressLevel,
    pub stress_score: f64,
    pub action: RecommendedAction,
    pub distress: DistressLevel,
    pub check_in: Option<CheckInKind>,
    pub guidance: ResponseGuidance,
}

/// Set path preference request
#[derive(Debug, Deserialize)]
pub struct SetPathRequest {
    /// New preference; null clears it
    pub path: Option<ResponsePath>,
}

/// Set path preference response
#[derive(Debug, Serialize)]
pub struct SetPathResponse {
    pub path_preference: Option<ResponsePath>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/message", post(post_message))
        .route("/session/:id/path", put(set_path))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        id: session_id.clone(),
        router: PathRouter::new(),
        detector: StressDetector::new(),
        tracker: EmotionalStateTracker::new(),
        window: BehaviorWindow::new(),
        guidance: GuidanceBuilder::new(),
        profile: req.profile.unwrap_or_default(),
        manual_path: req.path_preference,
        message_count: 0,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session_id = %session_id, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SessionStatusResponse {
        session_id: id,
        distress: session.tracker.level(),
        score: session.tracker.last_score(),
        path_preference: session.manual_path,
        message_count: session.message_count,
        profile_adjusted: session.profile.is_adjusted(),
    }))
}

/// Process one message through the full pipeline
async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let message = Message::new(req.text);
    session.detector.observe(&message, &mut session.window);
    let analysis = session
        .detector
        .analyze(&message, &session.window, req.voice.as_ref());

    let tracked = session.tracker.update(&analysis);

    // Route with the post-update distress level so a crisis message is
    // already gated by the level it just produced
    let config = session
        .router
        .detect(&message.text, Some(tracked.level), session.manual_path);

    session.message_count += 1;
    let guidance = session.guidance.guidance(
        &config,
        &analysis,
        &session.profile,
        tracked.check_in,
        session.message_count,
    );

    debug!(
        session_id = %id,
        path = %config.path,
        stress = analysis.score,
        distress = %tracked.level,
        "message processed"
    );

    let update = SessionUpdate {
        distress: tracked.level,
        score: analysis.score,
        path: config.path,
        message_count: session.message_count,
        check_in: tracked.check_in,
    };
    let _ = session.update_tx.send(update);

    Ok(Json(MessageResponse {
        path: config.path,
        reason: config.reason,
        reason_text: config.reason.description().to_string(),
        confidence: config.confidence,
        stress_level: analysis.level,
        stress_score: analysis.score,
        action: analysis.action,
        distress: tracked.level,
        check_in: tracked.check_in,
        guidance,
    }))
}

/// Set or clear the manual path preference
async fn set_path(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetPathRequest>,
) -> Result<Json<SetPathResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.manual_path = req.path;
    Ok(Json(SetPathResponse {
        path_preference: session.manual_path,
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Pump broadcast updates to the socket until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            update = rx.recv() => {
                let Ok(update) = update else { break };
                let json = serde_json::to_string(&update).unwrap_or_default();
                if sink.send(WsMessage::Text(json)).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, version = crate::VERSION, "SAI engine API listening");
    info!("POST /session/new | GET /session/:id | POST /session/:id/message | PUT /session/:id/path | WS /ws/:id | GET /health");
    axum::serve(listener, router).await?;
    Ok(())
}
