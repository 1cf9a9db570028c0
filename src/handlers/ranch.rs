// src/handlers/ranch.rs

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
    models::ranch::{AssignRanchPayload, Ranch, RanchPayload, UserRanch},
};

#[utoipa::path(
    get,
    path = "/ranch",
    tag = "Ranch",
    params(ListParams),
    responses(
        (status = 200, description = "Ranchos visíveis para o papel", body = Vec<Ranch>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_ranches(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::Ranch, Action::List)?;

    let ranches = app_state
        .ranch_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    Ok((StatusCode::OK, Json(ranches)))
}

#[utoipa::path(
    get,
    path = "/ranch/{ranch_id}",
    tag = "Ranch",
    params(("ranch_id" = i32, Path, description = "ID do rancho")),
    responses(
        (status = 200, description = "Rancho encontrado", body = Ranch),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(ranch_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Ranch, Action::List)?;

    let ranch = app_state
        .ranch_repo
        .find_by_id(ranch_id)
        .await?
        .ok_or(AppError::NotFound("Rancho não encontrado."))?;

    Ok((StatusCode::OK, Json(ranch)))
}

#[utoipa::path(
    post,
    path = "/ranch",
    tag = "Ranch",
    request_body = RanchPayload,
    responses(
        (status = 201, description = "Rancho criado", body = Ranch),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RanchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Ranch, Action::Create)?;

    let ranch = app_state.ranch_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(ranch)))
}

#[utoipa::path(
    put,
    path = "/ranch/{ranch_id}",
    tag = "Ranch",
    params(("ranch_id" = i32, Path, description = "ID do rancho")),
    request_body = RanchPayload,
    responses(
        (status = 204, description = "Rancho atualizado"),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(ranch_id): Path<i32>,
    Json(payload): Json<RanchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Ranch, Action::Update)?;

    app_state
        .ranch_repo
        .update(ranch_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Rancho não encontrado."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/ranch/{ranch_id}",
    tag = "Ranch",
    params(("ranch_id" = i32, Path, description = "ID do rancho")),
    responses(
        (status = 204, description = "Rancho removido"),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(ranch_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Ranch, Action::Delete)?;

    let deleted = app_state.ranch_repo.delete(ranch_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Rancho não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Associa o usuário autenticado a um rancho existente. Na prática cada
// rancho tem no máximo um dono ativo: segundo pedido leva 409.
#[utoipa::path(
    post,
    path = "/ranch/assign",
    tag = "Ranch",
    request_body = AssignRanchPayload,
    responses(
        (status = 201, description = "Associação criada", body = UserRanch),
        (status = 404, description = "Rancho não encontrado"),
        (status = 409, description = "Rancho já associado")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_ranch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AssignRanchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Ranch, Action::Update)?;

    app_state
        .ranch_repo
        .find_by_id(payload.ranch_id)
        .await?
        .ok_or(AppError::NotFound("Rancho não encontrado."))?;

    if app_state.ranch_repo.ranch_has_owner(payload.ranch_id).await? {
        return Err(AppError::RanchAlreadyAssigned);
    }

    let association = app_state
        .ranch_repo
        .associate_user(user.0.user_id, payload.ranch_id)
        .await?;

    Ok((StatusCode::CREATED, Json(association)))
}
