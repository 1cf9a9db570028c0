// src/handlers/auth.rs

use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, RegisterUserPayload, Token, User},
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Usuário ou e-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .register_user(
            &payload.username,
            &payload.email,
            &payload.password,
            payload.role.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// Handler de login (formulário username/password, resposta com bearer token)
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Auth",
    request_body(content = LoginPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token emitido", body = Token),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Form(payload): Form<LoginPayload>,
) -> Result<Json<Token>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let access_token = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    Ok(Json(Token { access_token, token_type: "bearer".to_string() }))
}
