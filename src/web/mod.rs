//! Web API for the live design session.
//!
//! The server owns the one editing session. Frontends mutate it through the
//! endpoints below; the agent bridge reads it back. Every mutation schedules a
//! debounced snapshot write so the bridge still has data after the server
//! stops.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/config` - Assembled design configuration
//! - `GET /api/state` - Raw selections, overrides and type scale
//! - `GET /api/catalog` - Catalog entries per category, type scales, formats
//! - `PUT|DELETE /api/selections/{category}` - Select or clear a catalog entry
//! - `PUT|DELETE /api/overrides/{scheme}/{key}` - Set or clear a color override
//! - `PUT /api/type-scale` - Switch the type scale
//! - `POST /api/import` - Apply a previously exported JSON document
//! - `GET /api/export/{format}` - One bridge-visible export format
//! - `GET /api/export-bundle?formats=a,b` - Zip of any registered formats

use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::export::bundle::BUNDLE_FILE_NAME;
use crate::export::{ExportError, ExporterRegistry};
use crate::models::{
    Catalog, CatalogItemSummary, ColorKey, DesignConfig, RgbColor, Scheme, Session, SessionState,
};
use crate::services::{parse_import, DebouncedPersister, Snapshot};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// The live session
    session: Arc<RwLock<Session>>,
    /// Catalog (immutable after load)
    catalog: Arc<Catalog>,
    /// Format backends
    exporters: Arc<ExporterRegistry>,
    /// Snapshot writer, absent when persistence is off
    persister: Option<Arc<DebouncedPersister>>,
}

impl AppState {
    /// Creates a state around `session` without persistence.
    #[must_use]
    pub fn new(session: Session, catalog: Catalog) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            catalog: Arc::new(catalog),
            exporters: Arc::new(ExporterRegistry::new()),
            persister: None,
        }
    }

    /// Persists every mutation through `persister`.
    #[must_use]
    pub fn with_persister(mut self, persister: DebouncedPersister) -> Self {
        self.persister = Some(Arc::new(persister));
        self
    }

    /// Copy of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Assembled config of the current session.
    #[must_use]
    pub fn config(&self) -> DesignConfig {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .assemble(&self.catalog)
    }

    /// Schedules a snapshot of the current session.
    pub fn persist(&self) {
        if let Some(persister) = &self.persister {
            let session = self.session();
            let config = session.assemble(&self.catalog);
            persister.schedule(Snapshot::capture(&session, Some(config)));
        }
    }

    /// Applies `change` under the write lock, persists, and returns the new
    /// state along with the closure's result.
    fn mutate<R>(&self, change: impl FnOnce(&mut Session) -> R) -> (R, SessionState) {
        let (result, state) = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            let result = change(&mut session);
            (result, session.state())
        };
        self.persist();
        (result, state)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn reject(status: StatusCode, error: ApiError) -> (StatusCode, Json<ApiError>) {
    (status, Json(error))
}

/// Body of `PUT /api/selections/{category}` and `PUT /api/type-scale`.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Catalog ID
    pub id: String,
}

/// Body of `PUT /api/overrides/{scheme}/{key}`.
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    /// Hex color
    pub value: String,
}

/// One export format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    /// Format ID
    pub id: String,
    /// Display label
    pub label: String,
    /// File name in bundles
    pub file_name: String,
    /// Whether `/api/export/{format}` serves it
    pub bridge_visible: bool,
}

/// Catalog summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// Entries per selection category
    pub categories: IndexMap<String, Vec<CatalogItemSummary>>,
    /// Available type scales
    pub type_scales: Vec<CatalogItemSummary>,
    /// Export formats
    pub formats: Vec<FormatInfo>,
}

/// Query of `GET /api/export-bundle`.
#[derive(Debug, Deserialize)]
pub struct BundleQuery {
    /// Comma-separated format IDs
    #[serde(default)]
    pub formats: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/config
async fn get_config(State(state): State<AppState>) -> Json<DesignConfig> {
    Json(state.config())
}

/// GET /api/state
async fn get_state(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.session().state())
}

/// GET /api/catalog
async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let categories = Catalog::categories()
        .into_iter()
        .map(|category| (category.to_string(), state.catalog.items(category)))
        .collect();

    let type_scales = state
        .catalog
        .type_scales
        .iter()
        .map(|scale| CatalogItemSummary {
            id: scale.id.clone(),
            name: scale.name.clone(),
        })
        .collect();

    let formats = state
        .exporters
        .iter()
        .map(|exporter| FormatInfo {
            id: exporter.id().to_string(),
            label: exporter.label().to_string(),
            file_name: exporter.file_name().to_string(),
            bridge_visible: exporter.bridge_visible(),
        })
        .collect();

    Json(CatalogResponse {
        categories,
        type_scales,
        formats,
    })
}

fn known_category(category: &str) -> ApiResult<()> {
    if Catalog::categories().iter().any(|known| *known == category) {
        Ok(())
    } else {
        Err(reject(
            StatusCode::NOT_FOUND,
            ApiError::with_details(
                format!("Unknown category: {category}"),
                format!("Expected one of: {}", Catalog::categories().join(", ")),
            ),
        ))
    }
}

/// PUT /api/selections/{category}
async fn put_selection(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<Json<SessionState>> {
    known_category(&category)?;
    if !state.catalog.contains(&category, &request.id) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ApiError::new(format!("Unknown {category} id: {}", request.id)),
        ));
    }

    debug!("Select {category} = {}", request.id);
    let ((), session) = state.mutate(|session| session.select(category, request.id));
    Ok(Json(session))
}

/// DELETE /api/selections/{category}
async fn delete_selection(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<SessionState>> {
    known_category(&category)?;
    let (_, session) = state.mutate(|session| session.deselect(&category));
    Ok(Json(session))
}

fn override_target(scheme: &str, key: &str) -> ApiResult<(Scheme, ColorKey)> {
    let scheme = scheme
        .parse::<Scheme>()
        .map_err(|e| reject(StatusCode::BAD_REQUEST, ApiError::new(e)))?;
    let key = ColorKey::from_key(key).ok_or_else(|| {
        reject(
            StatusCode::BAD_REQUEST,
            ApiError::with_details(
                format!("Unknown color key: {key}"),
                "Expected a role such as primary, or semantic.<success|warning|error|info>",
            ),
        )
    })?;
    Ok((scheme, key))
}

/// PUT /api/overrides/{scheme}/{key}
async fn put_override(
    State(state): State<AppState>,
    Path((scheme, key)): Path<(String, String)>,
    Json(request): Json<OverrideRequest>,
) -> ApiResult<Json<SessionState>> {
    let (scheme, key) = override_target(&scheme, &key)?;
    let color = RgbColor::from_hex(&request.value).map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            ApiError::with_details("Invalid hex color", e.to_string()),
        )
    })?;

    let ((), session) = state.mutate(|session| session.set_override(scheme, key, color.to_hex()));
    Ok(Json(session))
}

/// DELETE /api/overrides/{scheme}/{key}
async fn delete_override(
    State(state): State<AppState>,
    Path((scheme, key)): Path<(String, String)>,
) -> ApiResult<Json<SessionState>> {
    let (scheme, key) = override_target(&scheme, &key)?;
    let (_, session) = state.mutate(|session| session.clear_override(scheme, key));
    Ok(Json(session))
}

/// PUT /api/type-scale
async fn put_type_scale(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<Json<SessionState>> {
    if state.catalog.type_scale(&request.id).is_none() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ApiError::new(format!("Unknown type scale: {}", request.id)),
        ));
    }

    let ((), session) = state.mutate(|session| session.set_type_scale(request.id));
    Ok(Json(session))
}

/// POST /api/import
///
/// The body is the raw text of a JSON export.
async fn post_import(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<SessionState>> {
    let text = String::from_utf8_lossy(&body);
    let imported = parse_import(&text).map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            ApiError::with_details("Import failed", e.to_string()),
        )
    })?;
    let ((), session) = state.mutate(|session| session.apply_import(imported));

    info!("Imported {} selections", session.selections.len());
    Ok(Json(session))
}

/// GET /api/export/{format}
async fn get_export(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> ApiResult<Response> {
    let exporter = state.exporters.get_bridge(&format).ok_or_else(|| {
        reject(
            StatusCode::NOT_FOUND,
            ApiError::with_details(
                format!("Unknown export format: {format}"),
                format!("Available formats: {}", state.exporters.bridge_ids().join(", ")),
            ),
        )
    })?;

    let body = exporter.run(&state.config());
    Ok(([(header::CONTENT_TYPE, exporter.content_type())], body).into_response())
}

/// GET /api/export-bundle?formats=a,b
async fn get_export_bundle(
    State(state): State<AppState>,
    Query(query): Query<BundleQuery>,
) -> ApiResult<Response> {
    let ids: Vec<&str> = query
        .formats
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    if let Err(e) = state.exporters.select(&ids) {
        let status = match e {
            ExportError::NoFormats => StatusCode::BAD_REQUEST,
            ExportError::UnknownFormat(..) => StatusCode::NOT_FOUND,
        };
        return Err(reject(status, ApiError::new(e.to_string())));
    }

    let archive = state
        .exporters
        .bundle_zip(&state.config(), &ids)
        .map_err(|e| {
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("Failed to build bundle", format!("{e:#}")),
            )
        })?;

    let disposition = format!("attachment; filename=\"{BUNDLE_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive,
    )
        .into_response())
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Local-only server, any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Session
        .route("/api/config", get(get_config))
        .route("/api/state", get(get_state))
        .route("/api/catalog", get(get_catalog))
        .route(
            "/api/selections/{category}",
            put(put_selection).delete(delete_selection),
        )
        .route(
            "/api/overrides/{scheme}/{key}",
            put(put_override).delete(delete_override),
        )
        .route("/api/type-scale", put(put_type_scale))
        .route("/api/import", post(post_import))
        // Export
        .route("/api/export/{format}", get(get_export))
        .route("/api/export-bundle", get(get_export_bundle))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting Tokensmith web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
