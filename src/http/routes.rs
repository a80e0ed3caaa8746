//! HTTP route definitions

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    extract::{Extension, Query, State},
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error};

use crate::app::AppState;
use crate::game::{GameCode, Language};
use crate::http::middleware::attach_request_context;
use crate::listing::{
    find_listings, Criteria, DisconnectReason, GameListing, HostServer, MatchmakerResult,
    RequestContext,
};
use crate::session::{issue_token, TokenRequest};
use crate::util::time::uptime_secs;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/games",
            get(list_games_handler)
                .post(find_game_handler)
                .put(host_server_handler),
        )
        .route("/api/user", post(token_handler));

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_routes)
        .layer(middleware::from_fn(attach_request_context))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // CORS configuration - only when browser origins are configured
    let allowed_origins: Vec<header::HeaderValue> = state
        .config
        .client_origins
        .iter()
        .filter_map(|s| s.parse::<header::HeaderValue>().ok())
        .collect();

    if !allowed_origins.is_empty() {
        let cors = CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router.with_state(state)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    active_rooms: usize,
    active_players: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        active_rooms: state.rooms.len(),
        active_players: state.rooms.total_players(),
    })
}

// ============================================================================
// Game endpoints
// ============================================================================

/// Query string with case-insensitive keys; the first occurrence of a key wins
struct QueryParams(HashMap<String, String>);

impl QueryParams {
    fn new(pairs: Vec<(String, String)>) -> Self {
        let mut params = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            params.entry(key.to_ascii_lowercase()).or_insert(value);
        }
        Self(params)
    }

    /// Parse a parameter; absent or empty values yield `None`
    fn get<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, AppError> {
        match self.0.get(key).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::InvalidQuery(key)),
        }
    }
}

struct ListGamesQuery {
    /// Bitmask of acceptable maps
    map_id: u32,
    lang: Language,
    /// 0 accepts any impostor count
    num_impostors: i32,
    limit: Option<i64>,
}

impl ListGamesQuery {
    fn from_params(params: &QueryParams) -> Result<Self, AppError> {
        Ok(Self {
            map_id: params.get("mapid")?.unwrap_or(0),
            lang: Language(params.get("lang")?.unwrap_or(0)),
            num_impostors: params.get("numimpostors")?.unwrap_or(0),
            limit: params.get("limit")?,
        })
    }
}

async fn list_games_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GameListing>>, AppError> {
    if !state.listing_limiter.check(ctx.client_addr.map(|addr| addr.ip())) {
        return Err(AppError::TooManyRequests);
    }

    let query = ListGamesQuery::from_params(&QueryParams::new(pairs))?;

    let criteria = Criteria::new(query.map_id, query.lang, query.num_impostors);
    let cap = match query.limit {
        Some(limit) => usize::try_from(limit).unwrap_or(0),
        None => state.config.max_listings,
    };

    let listings: Vec<GameListing> = find_listings(&state.rooms, &state.filters, &ctx, &criteria, cap)
        .iter()
        .map(|room| GameListing::new(room))
        .collect();

    Ok(Json(listings))
}

/// Resolve the address a game is hosted at
async fn find_game_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<HostServer>, AppError> {
    let code = GameCode(QueryParams::new(pairs).get("gameid")?.unwrap_or(0));

    match state.rooms.find(code) {
        Some(room) => Ok(Json(HostServer::new(room.public_addr))),
        None => {
            debug!(game_code = %code, "Lookup for unknown game");
            Err(AppError::GameMissing(code))
        }
    }
}

/// Address to host a new game on: this server
async fn host_server_handler(State(state): State<AppState>) -> Json<HostServer> {
    Json(HostServer::new(state.config.public_addr()))
}

// ============================================================================
// Session endpoint
// ============================================================================

async fn token_handler(Json(req): Json<TokenRequest>) -> Result<String, AppError> {
    issue_token(&req).map_err(|e| AppError::Internal(e.to_string()))
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Game not found: {0}")]
    GameMissing(GameCode),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::GameMissing(_) => (
                StatusCode::NOT_FOUND,
                Json(MatchmakerResult::error(DisconnectReason::GameMissing)),
            )
                .into_response(),
            AppError::TooManyRequests => {
                let body = serde_json::json!({ "error": "Too many requests" });
                (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
            }
            AppError::InvalidQuery(key) => {
                let body = serde_json::json!({ "error": format!("Invalid query parameter: {}", key) });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                let body = serde_json::json!({ "error": msg });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
