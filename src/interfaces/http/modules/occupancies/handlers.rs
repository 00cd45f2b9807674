//! Occupancy REST API handlers: park, release, revenue

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AvailabilityResponse, OccupancyResponse, ParkVehicleRequest, ReleaseResponse, RevenueResponse,
};
use crate::application::OccupancyService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct OccupancyState {
    pub service: Arc<OccupancyService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/occupancies",
    tag = "Occupancies",
    responses(
        (status = 200, description = "Open occupancy records, oldest first", body = ApiResponse<Vec<OccupancyResponse>>)
    )
)]
pub async fn list_open_occupancies(
    State(state): State<OccupancyState>,
) -> ApiResult<Vec<OccupancyResponse>> {
    let records = state.service.list_open().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        records.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/occupancies/available",
    tag = "Occupancies",
    responses(
        (status = 200, description = "Vehicles not parked and active free slots", body = ApiResponse<AvailabilityResponse>)
    )
)]
pub async fn get_availability(
    State(state): State<OccupancyState>,
) -> ApiResult<AvailabilityResponse> {
    let availability = state.service.availability().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(availability.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/occupancies/revenue",
    tag = "Occupancies",
    responses(
        (status = 200, description = "Running total of released records", body = ApiResponse<RevenueResponse>)
    )
)]
pub async fn get_revenue(State(state): State<OccupancyState>) -> Json<ApiResponse<RevenueResponse>> {
    Json(ApiResponse::success(state.service.revenue().into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/occupancies/{id}",
    tag = "Occupancies",
    params(("id" = i32, Path, description = "Occupancy ID")),
    responses(
        (status = 200, description = "Occupancy record", body = ApiResponse<OccupancyResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_occupancy(
    State(state): State<OccupancyState>,
    Path(id): Path<i32>,
) -> ApiResult<OccupancyResponse> {
    let record = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/occupancies",
    tag = "Occupancies",
    request_body = ParkVehicleRequest,
    responses(
        (status = 201, description = "Vehicle parked", body = ApiResponse<OccupancyResponse>),
        (status = 404, description = "Vehicle or slot not found"),
        (status = 409, description = "Vehicle already parked or slot occupied"),
        (status = 422, description = "Missing, conflicting or negative rate; inactive slot")
    )
)]
pub async fn park_vehicle(
    State(state): State<OccupancyState>,
    ValidatedJson(req): ValidatedJson<ParkVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OccupancyResponse>>), ApiError> {
    let record = state.service.park(req.into()).await.map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(record.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/occupancies/{id}/release",
    tag = "Occupancies",
    params(("id" = i32, Path, description = "Occupancy ID")),
    responses(
        (status = 200, description = "Slot released and billed", body = ApiResponse<ReleaseResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Release already in progress")
    )
)]
pub async fn release_slot(
    State(state): State<OccupancyState>,
    Path(id): Path<i32>,
) -> ApiResult<ReleaseResponse> {
    let receipt = state.service.release(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(receipt.into())))
}
