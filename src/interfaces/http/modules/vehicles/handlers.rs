//! Vehicle REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{VehicleRequest, VehicleResponse};
use crate::application::VehicleService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct VehicleState {
    pub service: Arc<VehicleService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Registered vehicles, by plate", body = ApiResponse<Vec<VehicleResponse>>)
    )
)]
pub async fn list_vehicles(State(state): State<VehicleState>) -> ApiResult<Vec<VehicleResponse>> {
    let vehicles = state.service.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
) -> ApiResult<VehicleResponse> {
    let vehicle = state.service.get(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Registered", body = ApiResponse<VehicleResponse>),
        (status = 409, description = "Plate already registered"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleState>,
    ValidatedJson(req): ValidatedJson<VehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), ApiError> {
    let vehicle = state
        .service
        .create(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Plate already registered")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<VehicleRequest>,
) -> ApiResult<VehicleResponse> {
    let vehicle = state
        .service
        .update(&id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle is parked")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.service.delete(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
