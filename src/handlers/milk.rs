// src/handlers/milk.rs

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
    models::milk::{DairyMilk, DairyMilkInfo, DairyMilkPayload},
};

// Único recurso aberto também ao queijeiro, sempre no escopo dos ranchos
// associados a ele
#[utoipa::path(
    get,
    path = "/milk",
    tag = "DairyMilk",
    params(ListParams),
    responses(
        (status = 200, description = "Registros de leite visíveis", body = Vec<DairyMilkInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_dairy_milk(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::DairyMilk, Action::List)?;

    let records = app_state
        .milk_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    post,
    path = "/milk",
    tag = "DairyMilk",
    request_body = DairyMilkPayload,
    responses(
        (status = 201, description = "Registro de leite criado", body = DairyMilk),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dairy_milk(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<DairyMilkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::DairyMilk, Action::Create)?;

    let record = app_state.milk_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/milk/{dairy_milk_id}",
    tag = "DairyMilk",
    params(("dairy_milk_id" = i32, Path, description = "ID do registro")),
    request_body = DairyMilkPayload,
    responses(
        (status = 204, description = "Registro atualizado"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_dairy_milk(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(dairy_milk_id): Path<i32>,
    Json(payload): Json<DairyMilkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::DairyMilk, Action::Update)?;

    app_state
        .milk_repo
        .update(dairy_milk_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Registro de leite não encontrado."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/milk/{dairy_milk_id}",
    tag = "DairyMilk",
    params(("dairy_milk_id" = i32, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dairy_milk(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(dairy_milk_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::DairyMilk, Action::Delete)?;

    let deleted = app_state.milk_repo.delete(dairy_milk_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Registro de leite não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}
