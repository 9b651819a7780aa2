//! Class listing, details, roster, and bulk seat clearing.

use axum::Json;
use axum::extract::{Path, State};

use classswift_core::events;
use classswift_entity::class::model::Class;
use classswift_entity::seat::roster::RosterSummary;

use crate::dto::response::{ApiResponse, ClassResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/classes
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Class>>>, ApiError> {
    let classes = state.class_service.list_classes().await?;
    Ok(Json(ApiResponse::with_message(
        classes,
        "Classes retrieved successfully",
    )))
}

/// GET /api/v1/classes/{class_id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<ApiResponse<ClassResponse>>, ApiError> {
    let class = state.class_service.get_class(&class_id).await?;

    let join_link = format!(
        "{}/api/v1/classes/{}/join",
        state.config.server.base_url, class.public_id
    );

    Ok(Json(ApiResponse::with_message(
        ClassResponse { class, join_link },
        "Class information retrieved successfully",
    )))
}

/// GET /api/v1/classes/{class_id}/students
pub async fn get_class_students(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<ApiResponse<RosterSummary>>, ApiError> {
    let class = state.class_service.get_class(&class_id).await?;
    let roster = state.class_service.roster(&class).await?;

    Ok(Json(ApiResponse::with_message(
        roster,
        "Students retrieved successfully",
    )))
}

/// POST /api/v1/classes/{class_id}/clear-seats
pub async fn clear_seats(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<ApiResponse<Class>>, ApiError> {
    let class = state.join_service.clear_seats(&class_id).await?;

    // Roster fan-out happens after commit, outside the transaction.
    let roster = state.class_service.roster(&class).await?;
    state.hub.publish(
        class.public_id.as_str(),
        events::class::CLASS_UPDATED,
        serde_json::to_value(&roster)?,
    );

    Ok(Json(ApiResponse::with_message(
        class,
        "Seats cleared successfully",
    )))
}
