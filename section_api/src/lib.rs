// Section Lookup HTTP API
//
// GET /section/:input   property map of the matching section
// GET /healthz          liveness plus table sizes

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use section_core::{SectionError, SectionLookup, SectionType};

// ============================================================================
// Application State
// ============================================================================

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub lookup: SectionLookup,
}

impl AppState {
    pub fn new(lookup: SectionLookup) -> Self {
        Self { lookup }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

pub const DEFAULT_PORT: u16 = 8000;

/// Bind address, from `HOST` and `PORT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, SectionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(var: F) -> Result<Self, SectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = var("HOST") {
            config.host = host
                .parse()
                .map_err(|_| SectionError::invalid_config("HOST", &host, "expected an IP address"))?;
        }
        if let Some(port) = var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| SectionError::invalid_config("PORT", &port, "expected a port number"))?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        // Path segments arrive URL-unescaped ("uc%20356x406" -> "uc 356x406")
        .route("/section/:input", get(get_section))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.lookup.database();
    Json(serde_json::json!({
        "status": "ok",
        "uc_sections": db.table(SectionType::UC).len(),
        "ub_sections": db.table(SectionType::UB).len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn get_section(
    State(state): State<AppState>,
    Path(input): Path<String>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    match state.lookup.lookup(&input) {
        Ok(outcome) => {
            tracing::debug!(input = %input, kind = %outcome.kind, section = %outcome.section, "section lookup");
            Ok(Json(outcome.properties))
        }
        Err(e) if e.is_client_error() => {
            tracing::info!(input = %input, code = e.error_code(), "section lookup rejected: {}", e);
            Err(e.into())
        }
        Err(e) => {
            tracing::error!(input = %input, code = e.error_code(), "section lookup failed: {}", e);
            Err(e.into())
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error body: `{"detail": "...", "code": "PARSE_ERROR"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: &'static str,
}

/// Maps a lookup error to an HTTP response
#[derive(Debug)]
pub struct ApiError(pub SectionError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            SectionError::Parse { .. } => StatusCode::BAD_REQUEST,
            SectionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SectionError::Load { .. } | SectionError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SectionError> for ApiError {
    fn from(e: SectionError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.0.to_string(),
            code: self.0.error_code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
