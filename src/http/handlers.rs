//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint; ingestion writes through
//! the repository, query handlers read a consistent snapshot and delegate
//! to the aggregation engine.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::BTreeMap;

use super::auth::AuthUser;
use super::dto::{
    HealthResponse, IngestMeasurementRequest, IngestResponse, LoginRequest, LoginResponse,
    RegisterRequest, StatusResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ComparisonData, TrayDashboardData, TrayId};
use crate::db::models::NewMeasurement;
use crate::db::password::{hash_password, verify_password};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Authentication
// =============================================================================

/// POST /register
///
/// Create a new dashboard account.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password must be non-empty".to_string(),
        ));
    }

    if state.repository.find_user(&request.username).await?.is_some() {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    state
        .repository
        .create_user(&request.username, &hash_password(&request.password))
        .await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::success())))
}

/// POST /login
///
/// Authenticate and obtain a bearer token for the query endpoints.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<LoginResponse> {
    let user = state
        .repository
        .find_user(&request.username)
        .await?
        .filter(|user| verify_password(&request.password, &user.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let token = state.sessions.create(user.id, &user.username);

    Ok(Json(LoginResponse {
        status: "success".to_string(),
        token,
        username: user.username,
    }))
}

/// POST /logout
///
/// Invalidate the current session token.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> HandlerResult<StatusResponse> {
    state.sessions.revoke(&auth.token);
    Ok(Json(StatusResponse::success()))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /api/data
///
/// Store one measurement. Returns `201` on success, `400` on a malformed
/// payload or commit failure (the write is rolled back, nothing partial is
/// ever visible).
pub async fn ingest_measurement(
    State(state): State<AppState>,
    Json(request): Json<IngestMeasurementRequest>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    request.validate().map_err(AppError::BadRequest)?;

    let stored = state
        .repository
        .insert_measurement(&NewMeasurement {
            tray: TrayId::new(request.tray_number),
            length: request.length,
            width: request.width,
            area: request.area,
            weight: request.weight,
            count: request.count,
            captured_at: None,
        })
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            status: "success".to_string(),
            id: stored.id,
        }),
    ))
}

// =============================================================================
// Dashboard Queries
// =============================================================================

/// GET /get_tray_data/{tray_number}
///
/// Full dashboard view for one tray: latest metrics, last-wins growth
/// series and weight histogram. `404` when the tray has no records.
pub async fn get_tray_data(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tray_number): Path<i64>,
) -> HandlerResult<TrayDashboardData> {
    let tray = TrayId::new(tray_number);
    let records = state.repository.records_for_tray(tray).await?;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No data found for tray {}",
            tray_number
        )));
    }

    Ok(Json(services::tray_dashboard(&records)))
}

/// GET /get_combined_tray_data
///
/// Aggregate view over all trays: mean-of-latest metrics, per-day-mean
/// growth series and a histogram over every stored record. `404` when the
/// store is empty.
pub async fn get_combined_tray_data(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> HandlerResult<TrayDashboardData> {
    let tray_ids = state.repository.list_tray_ids().await?;
    if tray_ids.is_empty() {
        return Err(AppError::NotFound("No tray data available".to_string()));
    }

    let all_records = state.repository.all_records().await?;
    if all_records.is_empty() {
        return Err(AppError::NotFound("No data available".to_string()));
    }

    let mut per_tray_latest = Vec::with_capacity(tray_ids.len());
    for tray in tray_ids {
        if let Some(latest) = state.repository.latest_for_tray(tray).await? {
            per_tray_latest.push(latest);
        }
    }

    Ok(Json(services::combined_dashboard(
        &per_tray_latest,
        &all_records,
    )))
}

/// GET /get_comparison_data
///
/// Side-by-side comparison entry for every known tray. An empty store
/// yields an empty map, not an error.
pub async fn get_comparison_data(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> HandlerResult<ComparisonData> {
    let tray_ids = state.repository.list_tray_ids().await?;

    let mut records_by_tray = BTreeMap::new();
    for tray in tray_ids {
        let records = state.repository.records_for_tray(tray).await?;
        records_by_tray.insert(tray, records);
    }

    Ok(Json(services::comparison(&records_by_tray)))
}
