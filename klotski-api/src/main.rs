//! Klotski Web API
//!
//! Serves the board engine to a browser client: the client renders the
//! piece list it gets back and forwards drag gestures as move requests.
//! Completed games' move counts are kept in a small SQLite history so
//! the client can show best scores across sessions. The engine itself
//! never depends on that store; a missing or failing database only
//! costs the history feature.

use std::path::Path as FilePath;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use klotski_core::{GameSession, MoveOutcome, Piece, PieceKind, Pos};

/// Completed games kept in the best-scores list.
const MAX_HISTORY: usize = 5;

// =============================================================================
// History Store
// =============================================================================

/// SQLite-backed history of completed games' move counts
struct HistoryStore {
    conn: Mutex<Connection>,
}

impl HistoryStore {
    /// Open (or create) the history database
    fn open(path: &FilePath) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                move_count INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(HistoryStore {
            conn: Mutex::new(conn),
        })
    }

    /// Record a completed game and prune to the most recent entries
    fn record(&self, move_count: u32) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO history (move_count) VALUES (?1)",
            [move_count as i64],
        )?;
        conn.execute(
            "DELETE FROM history WHERE id NOT IN
                (SELECT id FROM history ORDER BY id DESC LIMIT ?1)",
            [MAX_HISTORY as i64],
        )?;
        Ok(())
    }

    /// Most recent completed games' move counts, newest first
    fn recent(&self) -> Result<Vec<u32>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT move_count FROM history ORDER BY id DESC LIMIT ?1")?;
        let rows = stmt.query_map([MAX_HISTORY as i64], |row| row.get::<_, i64>(0))?;
        let mut counts = Vec::with_capacity(MAX_HISTORY);
        for row in rows {
            counts.push(row? as u32);
        }
        Ok(counts)
    }
}

/// Shared application state
struct AppStateInner {
    session: Mutex<GameSession>,
    history: Option<HistoryStore>,
}

type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize)]
struct PieceModel {
    id: String,
    kind: PieceKind,
    label: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Serialize)]
struct GameStateModel {
    pieces: Vec<PieceModel>,
    move_count: u32,
    is_won: bool,
}

#[derive(Deserialize)]
struct MoveRequest {
    piece_id: String,
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct HistoryModel {
    /// Final move counts of completed games, newest first
    scores: Vec<u32>,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

#[derive(Serialize)]
struct ErrorModel {
    detail: String,
}

/// Convert the engine's piece list to the JSON model
fn session_to_model(session: &GameSession) -> GameStateModel {
    let pieces = session
        .pieces()
        .iter()
        .map(|p: &Piece| PieceModel {
            id: p.id.clone(),
            kind: p.kind,
            label: p.label.clone(),
            x: p.pos.x,
            y: p.pos.y,
            width: p.width,
            height: p.height,
        })
        .collect();

    GameStateModel {
        pieces,
        move_count: session.move_count(),
        is_won: session.is_won(),
    }
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let session = state.session.lock().unwrap();
    Json(session_to_model(&session))
}

async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameStateModel>, (StatusCode, Json<ErrorModel>)> {
    let mut session = state.session.lock().unwrap();
    let was_won = session.is_won();

    match session.try_move(&req.piece_id, Pos::new(req.x, req.y)) {
        MoveOutcome::Accepted { move_count, won } => {
            // First transition into the won state completes the game:
            // hand the final move count to the history store.
            if won && !was_won {
                if let Some(ref history) = state.history {
                    if let Err(e) = history.record(move_count) {
                        eprintln!("Failed to record game history: {}", e);
                    }
                }
            }
            Ok(Json(session_to_model(&session)))
        }
        MoveOutcome::Rejected { reason } => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorModel {
                detail: reason.to_string(),
            }),
        )),
    }
}

async fn reset_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let mut session = state.session.lock().unwrap();
    session.reset();
    Json(session_to_model(&session))
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryModel> {
    let scores = match state.history {
        Some(ref history) => history.recent().unwrap_or_else(|e| {
            eprintln!("Failed to read game history: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    Json(HistoryModel { scores })
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    let history = match HistoryStore::open(FilePath::new("history.db")) {
        Ok(store) => {
            println!("Opened game history at history.db");
            Some(store)
        }
        Err(e) => {
            eprintln!("Failed to open game history: {} - best scores disabled", e);
            None
        }
    };

    let state: AppState = Arc::new(AppStateInner {
        session: Mutex::new(GameSession::new()),
        history,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/game", get(get_game))
        .route("/move", post(make_move))
        .route("/reset", post(reset_game))
        .route("/history", get(get_history))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
    println!("Klotski API running on http://localhost:8000");
    axum::serve(listener, app).await.unwrap();
}
