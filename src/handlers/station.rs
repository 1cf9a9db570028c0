// src/handlers/station.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        params::ListParams,
        policy::{Action, Resource, authorize},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::station::{
        AttachRanchPayload, StationIdFilter, StationInfo, StationPayload, StationReading,
        StationReadingPayload,
    },
};

#[utoipa::path(
    get,
    path = "/station",
    tag = "Station",
    params(ListParams),
    responses(
        (status = 200, description = "Estações dos ranchos visíveis", body = Vec<StationInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_stations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::Station, Action::List)?;

    let stations = app_state
        .station_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    let stations: Vec<StationInfo> = stations.into_iter().map(StationInfo::from).collect();
    Ok((StatusCode::OK, Json(stations)))
}

#[utoipa::path(
    get,
    path = "/station/{station_id}",
    tag = "Station",
    params(("station_id" = i32, Path, description = "ID da estação")),
    responses(
        (status = 200, description = "Estação encontrada", body = StationInfo),
        (status = 404, description = "Estação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_station(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(station_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Station, Action::List)?;

    let station = app_state
        .station_repo
        .find_by_id(station_id)
        .await?
        .ok_or(AppError::NotFound("Estação não encontrada."))?;

    Ok((StatusCode::OK, Json(StationInfo::from(station))))
}

#[utoipa::path(
    post,
    path = "/station",
    tag = "Station",
    request_body = StationPayload,
    responses(
        (status = 201, description = "Estação criada", body = StationInfo),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_station(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Station, Action::Create)?;

    let station = app_state.station_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(StationInfo::from(station))))
}

#[utoipa::path(
    put,
    path = "/station/{station_id}",
    tag = "Station",
    params(("station_id" = i32, Path, description = "ID da estação")),
    request_body = StationPayload,
    responses(
        (status = 204, description = "Estação atualizada"),
        (status = 404, description = "Estação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_station(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(station_id): Path<i32>,
    Json(payload): Json<StationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Station, Action::Update)?;

    app_state
        .station_repo
        .update(station_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Estação não encontrada."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/station/{station_id}",
    tag = "Station",
    params(("station_id" = i32, Path, description = "ID da estação")),
    responses(
        (status = 204, description = "Estação removida"),
        (status = 404, description = "Estação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_station(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(station_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Station, Action::Delete)?;

    let deleted = app_state.station_repo.delete(station_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Estação não encontrada."));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Uma estação pode servir vários ranchos; o vínculo é a ponte station_ranches
#[utoipa::path(
    post,
    path = "/station/{station_id}/ranch",
    tag = "Station",
    params(("station_id" = i32, Path, description = "ID da estação")),
    request_body = AttachRanchPayload,
    responses(
        (status = 201, description = "Vínculo criado"),
        (status = 404, description = "Estação ou rancho não encontrado"),
        (status = 409, description = "Vínculo já existente")
    ),
    security(("api_jwt" = []))
)]
pub async fn attach_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(station_id): Path<i32>,
    Json(payload): Json<AttachRanchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Station, Action::Update)?;

    app_state
        .station_repo
        .attach_ranch(station_id, payload.ranch_id)
        .await?;

    Ok(StatusCode::CREATED)
}

// ---
// Leituras meteorológicas (sub-recurso)
// ---

#[utoipa::path(
    get,
    path = "/station/data",
    tag = "Station",
    params(StationIdFilter, ListParams),
    responses(
        (status = 200, description = "Leituras da estação", body = Vec<StationReading>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_readings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<StationIdFilter>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::StationReading, Action::List)?;

    let readings = app_state
        .station_repo
        .readings(filter.station_id, &params)
        .await?;

    Ok((StatusCode::OK, Json(readings)))
}

#[utoipa::path(
    post,
    path = "/station/data",
    tag = "Station",
    request_body = StationReadingPayload,
    responses(
        (status = 201, description = "Leitura registrada", body = StationReading),
        (status = 404, description = "Estação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_reading(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StationReadingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::StationReading, Action::Create)?;

    let reading = app_state.station_repo.create_reading(&payload).await?;

    Ok((StatusCode::CREATED, Json(reading)))
}
