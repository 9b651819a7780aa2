//! Student join: seat claim plus the follow-up roster broadcast.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde::Deserialize;

use classswift_core::error::AppError;
use classswift_core::events;
use classswift_entity::seat::roster::RosterSummary;
use classswift_service::join::service::JoinOutcome;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Placeholder name for anonymous joins.
const GUEST_NAME: &str = "Guest";

/// Query parameters for the join endpoint.
#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    /// Requested seat number.
    pub seat: Option<String>,
}

/// GET /api/v1/classes/{class_id}/join?seat=N
///
/// The student name comes from the `X-Student-Name` header; anonymous
/// joins get the guest placeholder.
pub async fn join_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Query(query): Query<JoinQuery>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<RosterSummary>>, ApiError> {
    let class = state.class_service.get_class(&class_id).await?;

    if !class.is_active {
        return Err(AppError::forbidden("Class is not accepting students").into());
    }

    let seat_number = query
        .seat
        .as_deref()
        .ok_or_else(|| AppError::validation("Missing 'seat' query parameter"))?
        .parse::<i32>()
        .map_err(|_| AppError::validation("Seat number must be a positive integer"))?;

    let student_name = headers
        .get("X-Student-Name")
        .and_then(|value| value.to_str().ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(GUEST_NAME);

    match state
        .join_service
        .assign_seat(&class, student_name, seat_number)
        .await?
    {
        JoinOutcome::Assigned => {}
        JoinOutcome::SeatTaken => {
            return Err(AppError::conflict(format!(
                "Seat {seat_number} is already taken"
            ))
            .into());
        }
    }

    // Roster fan-out happens after commit; no lock is held across it.
    let roster = state.class_service.roster(&class).await?;
    state.hub.publish(
        class.public_id.as_str(),
        events::class::CLASS_UPDATED,
        serde_json::to_value(&roster)?,
    );

    Ok(Json(ApiResponse::with_message(
        roster,
        "Student joined successfully",
    )))
}
