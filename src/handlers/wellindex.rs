// src/handlers/wellindex.rs

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
    models::wellindex::{WellIndex, WellIndexInfo, WellIndexPayload},
};

// O índice é calculado fora do sistema; aqui só armazenamos e servimos
#[utoipa::path(
    get,
    path = "/wellindex",
    tag = "WellIndex",
    params(ListParams),
    responses(
        (status = 200, description = "Índices de bem-estar visíveis", body = Vec<WellIndexInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_wellindex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::WellIndex, Action::List)?;

    let indexes = app_state
        .wellindex_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    Ok((StatusCode::OK, Json(indexes)))
}

#[utoipa::path(
    post,
    path = "/wellindex",
    tag = "WellIndex",
    request_body = WellIndexPayload,
    responses(
        (status = 201, description = "Índice registrado", body = WellIndex),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_wellindex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<WellIndexPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::WellIndex, Action::Create)?;

    let index = app_state.wellindex_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(index)))
}

#[utoipa::path(
    put,
    path = "/wellindex/{wellindex_id}",
    tag = "WellIndex",
    params(("wellindex_id" = i32, Path, description = "ID do índice")),
    request_body = WellIndexPayload,
    responses(
        (status = 204, description = "Índice atualizado"),
        (status = 404, description = "Índice não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_wellindex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(wellindex_id): Path<i32>,
    Json(payload): Json<WellIndexPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::WellIndex, Action::Update)?;

    app_state
        .wellindex_repo
        .update(wellindex_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Índice de bem-estar não encontrado."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/wellindex/{wellindex_id}",
    tag = "WellIndex",
    params(("wellindex_id" = i32, Path, description = "ID do índice")),
    responses(
        (status = 204, description = "Índice removido"),
        (status = 404, description = "Índice não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_wellindex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(wellindex_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::WellIndex, Action::Delete)?;

    let deleted = app_state.wellindex_repo.delete(wellindex_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Índice de bem-estar não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}
