// Handlers for the trip history endpoints

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::error::TripError;
use crate::history::{HistoryError, monthly_aggregates};
use crate::models::{ApiError, HistoryEntry, MonthlyAggregate, TripResult};
use crate::{AppState, trip_error_to_api_error};

/// GET /api/history - Saved trips in insertion order
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, (StatusCode, Json<ApiError>)> {
    state
        .history
        .load()
        .await
        .map(Json)
        .map_err(history_error_to_api_error)
}

/// POST /api/history - Commit a planned trip to history
pub async fn save_trip(
    State(state): State<AppState>,
    Json(trip): Json<TripResult>,
) -> Result<(StatusCode, Json<HistoryEntry>), (StatusCode, Json<ApiError>)> {
    check_non_negative("estimated cost", trip.estimated_cost)
        .and_then(|_| check_non_negative("distance", trip.distance_km))
        .map_err(trip_error_to_api_error)?;

    let entry = HistoryEntry::from_trip(&trip, Utc::now());
    state
        .history
        .append(entry)
        .await
        .map(|stored| (StatusCode::CREATED, Json(stored)))
        .map_err(history_error_to_api_error)
}

/// DELETE /api/history - Drop every saved trip
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state
        .history
        .clear()
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(history_error_to_api_error)
}

/// GET /api/history/monthly - Cost per month, oldest first
pub async fn monthly_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyAggregate>>, (StatusCode, Json<ApiError>)> {
    let entries = state
        .history
        .load()
        .await
        .map_err(history_error_to_api_error)?;
    Ok(Json(monthly_aggregates(&entries)))
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), TripError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TripError::invalid(
            field,
            format!("expected a non-negative number, got {value}"),
        ))
    }
}

fn history_error_to_api_error(err: HistoryError) -> (StatusCode, Json<ApiError>) {
    trip_error_to_api_error(err.into())
}
