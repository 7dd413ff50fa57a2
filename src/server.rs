//! Reference HTTP server for the Blockworld API
//!
//! Serves the same endpoints the client calls, backed by an in-memory
//! [`GameState`]. Bodies in both directions are plain text.

use axum::{
    extract::{Path, Request, State},
    http::{self, header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::lines::join_lines;
use crate::routes::API_PREFIX;
use crate::world::{
    all_blocks_by_line, Block, CursorDirection, GameState, UnknownBlock, UnknownDirection,
};

// ============================================================================
// API Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    PlayerNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PlayerNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Player not found: {}", id))
            }
        };

        (status, message).into_response()
    }
}

impl From<UnknownBlock> for ApiError {
    fn from(err: UnknownBlock) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<UnknownDirection> for ApiError {
    fn from(err: UnknownDirection) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

fn text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn list_players(State(state): State<Arc<GameState>>) -> Response {
    text(join_lines(state.players()))
}

async fn create_player(
    State(state): State<Arc<GameState>>,
    Path(player): Path<String>,
) -> StatusCode {
    if !state.add_player(&player) {
        tracing::debug!(player = %player, "player.exists");
    }
    StatusCode::OK
}

async fn delete_player(
    State(state): State<Arc<GameState>>,
    Path(player): Path<String>,
) -> StatusCode {
    state.remove_player(&player);
    StatusCode::OK
}

async fn move_player(
    State(state): State<Arc<GameState>>,
    Path(player): Path<String>,
    body: String,
) -> Result<StatusCode, ApiError> {
    let direction: CursorDirection = body.parse()?;

    state
        .with_player(&player, |p| p.move_cursor(direction))
        .ok_or(ApiError::PlayerNotFound(player))?;
    Ok(StatusCode::OK)
}

async fn place_block(
    State(state): State<Arc<GameState>>,
    Path(player): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.place_block(&player) {
        return Err(ApiError::PlayerNotFound(player));
    }
    Ok(StatusCode::OK)
}

async fn set_player_block(
    State(state): State<Arc<GameState>>,
    Path(player): Path<String>,
    body: String,
) -> Result<StatusCode, ApiError> {
    let block: Block = body.parse()?;

    state
        .with_player(&player, |p| p.set_selected_block(block))
        .ok_or(ApiError::PlayerNotFound(player))?;
    Ok(StatusCode::OK)
}

async fn generate_world(State(state): State<Arc<GameState>>, seed: String) -> StatusCode {
    state.regenerate(&seed);
    StatusCode::OK
}

async fn list_blocks() -> Response {
    text(all_blocks_by_line())
}

async fn block_color(
    State(state): State<Arc<GameState>>,
    Path(block): Path<String>,
) -> Result<Response, ApiError> {
    let block: Block = block.parse()?;
    Ok(text(state.color_profile().color(block).hex()))
}

async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "api.request"
    );

    response
}

// ============================================================================
// API Server
// ============================================================================

/// Router with every Blockworld endpoint, relative to [`API_PREFIX`].
pub fn build_api_router(state: Arc<GameState>) -> Router {
    Router::new()
        .route("/players", get(list_players))
        .route("/players/:player", put(create_player).delete(delete_player))
        .route("/players/:player/move", post(move_player))
        .route("/players/:player/place_block", post(place_block))
        .route("/players/:player/block", put(set_player_block))
        .route("/world/generate", put(generate_world))
        .route("/blocks", get(list_blocks))
        .route("/blocks/:block/color", get(block_color))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Full application: the API under [`API_PREFIX`], optional static files under
/// `/static`, and a CORS layer so pages from other origins can drive the game.
pub fn build_app(state: Arc<GameState>, static_dir: Option<&FsPath>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(vec![
            http::Method::GET,
            http::Method::PUT,
            http::Method::POST,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers(vec![http::header::CONTENT_TYPE]);

    let mut app = Router::new().nest(API_PREFIX, build_api_router(state));
    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }
    app.layer(cors)
}

/// Serve until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let state = Arc::new(GameState::new(config.rows, config.cols));
    let app = build_app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        rows = config.rows,
        cols = config.cols,
        "server.listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "server.signal");
            }
        })
        .await?;

    tracing::info!("server.stopped");
    Ok(())
}
