use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

use crate::decision::labels_match;
use crate::history::HandHistory;
use crate::stats::{StatsSnapshot, StatsTracker};
use crate::store::ScenarioStore;

#[derive(Clone)]
struct AppState {
    store: Arc<ScenarioStore>,
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<WebSession>>>>>,
}

/// Server-side state for one training session: the score and, between a
/// served hand and its answer, the pending ground truth.
struct WebSession {
    stats: StatsTracker,
    pending: Option<PendingDecision>,
    rng: StdRng,
}

struct PendingDecision {
    correct_decision: String,
}

impl AppState {
    fn new(store: Arc<ScenarioStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn create_session(&self) -> (Uuid, Arc<Mutex<WebSession>>) {
        let id = Uuid::new_v4();
        let entry = Arc::new(Mutex::new(WebSession {
            stats: StatsTracker::new(),
            pending: None,
            rng: StdRng::from_entropy(),
        }));
        self.sessions.write().insert(id, entry.clone());
        (id, entry)
    }

    fn get_session(&self, id: &Uuid) -> Option<Arc<Mutex<WebSession>>> {
        self.sessions.read().get(id).cloned()
    }
}

#[derive(Debug, Serialize)]
struct SessionCreated {
    session_id: Uuid,
    stats: StatsSnapshot,
}

#[derive(Debug, Deserialize)]
struct DecisionRequest {
    chosen: String,
}

#[derive(Debug, Serialize)]
struct DecisionResponse {
    correct: bool,
    correct_decision: String,
    stats: StatsSnapshot,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("session not found")]
    NotFound,
    #[error("no hand awaiting a decision; request a new hand first")]
    NoPendingDecision,
    #[error("no hand histories available")]
    NoHands,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::NoPendingDecision => StatusCode::CONFLICT,
            ApiError::NoHands => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn serve(addr: SocketAddr, store: Arc<ScenarioStore>) -> Result<()> {
    let state = AppState::new(store);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/:id/hand", get(fetch_hand))
        .route("/sessions/:id/decision", post(grade_decision))
        .route("/sessions/:id/stats", get(fetch_stats));

    Router::new()
        .route("/healthz", get(health))
        .nest("/api", api)
        .nest_service("/", ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn router(store: Arc<ScenarioStore>) -> Router {
    build_router(AppState::new(store))
}

async fn health() -> &'static str {
    "ok"
}

async fn start_session(State(state): State<AppState>) -> Json<SessionCreated> {
    let (id, session) = state.create_session();
    let stats = session.lock().stats.snapshot();
    Json(SessionCreated {
        session_id: id,
        stats,
    })
}

/// Serves one random hand. The attempt is counted here, when the hand is
/// requested, and any unanswered previous hand is superseded.
async fn fetch_hand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HandHistory>, ApiError> {
    let session = state.get_session(&id).ok_or(ApiError::NotFound)?;
    let mut guard = session.lock();
    let hand = {
        let rng = &mut guard.rng;
        state.store.random_hand(rng).cloned()
    }
    .ok_or(ApiError::NoHands)?;

    guard.stats.record_hand_played();
    if guard.pending.is_some() {
        debug!(session = %id, "superseding unanswered hand");
    }
    guard.pending = Some(PendingDecision {
        correct_decision: hand.correct_decision.clone(),
    });
    Ok(Json(hand))
}

/// Grades the chosen move against the pending hand. Answering disarms the
/// pending decision, so a repeat submission conflicts instead of double
/// counting.
async fn grade_decision(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let session = state.get_session(&id).ok_or(ApiError::NotFound)?;
    let mut guard = session.lock();
    let pending = guard.pending.take().ok_or(ApiError::NoPendingDecision)?;

    let correct = labels_match(&req.chosen, &pending.correct_decision);
    if correct {
        guard.stats.record_correct();
    }
    Ok(Json(DecisionResponse {
        correct,
        correct_decision: pending.correct_decision,
        stats: guard.stats.snapshot(),
    }))
}

async fn fetch_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatsSnapshot>, ApiError> {
    let session = state.get_session(&id).ok_or(ApiError::NotFound)?;
    let stats = session.lock().stats.snapshot();
    Ok(Json(stats))
}
