//! Slot REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{OccupancyStatsResponse, SlotRequest, SlotResponse};
use crate::application::{SlotDraft, SlotService};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct SlotState {
    pub service: Arc<SlotService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/slots",
    tag = "Slots",
    responses(
        (status = 200, description = "Slots, by code", body = ApiResponse<Vec<SlotResponse>>)
    )
)]
pub async fn list_slots(State(state): State<SlotState>) -> ApiResult<Vec<SlotResponse>> {
    let slots = state.service.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        slots.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(("id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot details", body = ApiResponse<SlotResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_slot(
    State(state): State<SlotState>,
    Path(id): Path<String>,
) -> ApiResult<SlotResponse> {
    let slot = state.service.get(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/slots",
    tag = "Slots",
    request_body = SlotRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<SlotResponse>),
        (status = 409, description = "Code already in use"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_slot(
    State(state): State<SlotState>,
    ValidatedJson(req): ValidatedJson<SlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SlotResponse>>), ApiError> {
    let draft = req.into_draft(SlotDraft::new(""));
    let slot = state.service.create(draft).await.map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(slot.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(("id" = String, Path, description = "Slot ID")),
    request_body = SlotRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<SlotResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Code already in use")
    )
)]
pub async fn update_slot(
    State(state): State<SlotState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SlotRequest>,
) -> ApiResult<SlotResponse> {
    let existing = state.service.get(&id).await.map_err(domain_error)?;
    let base = SlotDraft {
        code: existing.code,
        covered: existing.covered,
        truck_capable: existing.truck_capable,
        active: existing.active,
        reserved: existing.reserved,
    };
    let slot = state
        .service
        .update(&id, req.into_draft(base))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(("id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Slot is occupied")
    )
)]
pub async fn delete_slot(State(state): State<SlotState>, Path(id): Path<String>) -> ApiResult<()> {
    state.service.delete(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/api/v1/slots/occupancy",
    tag = "Slots",
    responses(
        (status = 200, description = "Share of active slots in use", body = ApiResponse<OccupancyStatsResponse>)
    )
)]
pub async fn get_occupancy_stats(State(state): State<SlotState>) -> ApiResult<OccupancyStatsResponse> {
    let stats = state
        .service
        .recalculate_occupancy()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(stats.into())))
}
