// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        policy::{Action, Resource, authorize},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::ChangeRolePayload,
};

// Só admins removem usuários; demais papéis caem no 403 da política
#[utoipa::path(
    delete,
    path = "/admin/{user_id}",
    tag = "Admin",
    params(("user_id" = i32, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 403, description = "Papel sem permissão"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::User, Action::Delete)?;

    let deleted = app_state.user_repo.delete_user(user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Usuário não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}

// Elevação/troca de papel, chaveada pelo username
#[utoipa::path(
    put,
    path = "/admin/role/{username}",
    tag = "Admin",
    params(("username" = String, Path, description = "Nome do usuário")),
    request_body = ChangeRolePayload,
    responses(
        (status = 204, description = "Papel atualizado"),
        (status = 403, description = "Papel sem permissão"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_role(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(username): Path<String>,
    Json(payload): Json<ChangeRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::User, Action::Update)?;

    app_state.auth_service.change_role(&username, &payload.role).await?;

    Ok(StatusCode::NO_CONTENT)
}
