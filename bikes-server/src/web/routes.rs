//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Station, StationHistoryEntry, StationStatus};
use crate::feed::FeedError;
use crate::query::QueryError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(all_stations))
        .route("/station/:terminal_id", get(station_status))
        .route("/history/:terminal_id", get(station_history))
        .route("/terminals", get(terminals))
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint. Reports whether the store session is degraded.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.sessions.is_degraded() {
        "degraded"
    } else {
        "ok"
    };
    Json(HealthResponse { status })
}

/// Every station in the live feed.
async fn all_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, AppError> {
    let stations = state.feed.fetch_all_stations().await?;
    Ok(Json(stations))
}

/// Latest status for one station.
async fn station_status(
    State(state): State<AppState>,
    Path(terminal_id): Path<String>,
) -> Result<Json<StationStatus>, AppError> {
    let queries = state.queries.clone();
    let status = blocking(move || queries.get_status(&terminal_id)).await?;
    Ok(Json(status))
}

/// Last seven days of observations for one station.
async fn station_history(
    State(state): State<AppState>,
    Path(terminal_id): Path<String>,
) -> Result<Json<Vec<StationHistoryEntry>>, AppError> {
    let queries = state.queries.clone();
    let history = blocking(move || queries.get_history(&terminal_id)).await?;
    Ok(Json(history))
}

/// Terminal names known to the store.
async fn terminals(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let queries = state.queries.clone();
    let names = blocking(move || queries.list_terminals()).await?;
    Ok(Json(names))
}

/// Run a store query on the blocking pool.
async fn blocking<T, F>(query: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(query).await.map_err(|e| {
        error!(error = %e, "query task failed");
        AppError::Internal {
            message: "Internal server error".to_string(),
        }
    })?;
    Ok(result?)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidIdentifier(_) => AppError::BadRequest {
                message: "Invalid station identifier".to_string(),
            },
            QueryError::NotFound { .. } => AppError::NotFound {
                message: "Station not found".to_string(),
            },
            // Details were logged where the query failed; keep SQL out of the body
            QueryError::StoreUnavailable { .. } | QueryError::Store { .. } => AppError::Internal {
                message: "Database query failed".to_string(),
            },
        }
    }
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        error!(error = %e, "station feed request failed");
        let message = if e.is_parse() {
            "Failed to parse station data"
        } else {
            "Failed to fetch station data"
        };
        AppError::Internal {
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
