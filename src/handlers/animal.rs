// src/handlers/animal.rs

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
    models::animal::{
        Animal, AnimalIdFilter, AnimalInfo, AnimalPayload, HealthRecord, HealthRecordPayload,
    },
};

#[utoipa::path(
    get,
    path = "/animal",
    tag = "Animal",
    params(ListParams),
    responses(
        (status = 200, description = "Animais dos ranchos visíveis", body = Vec<AnimalInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_animals(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::Animal, Action::List)?;

    let animals = app_state
        .animal_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    Ok((StatusCode::OK, Json(animals)))
}

#[utoipa::path(
    get,
    path = "/animal/{animal_id}",
    tag = "Animal",
    params(("animal_id" = i32, Path, description = "ID do animal")),
    responses(
        (status = 200, description = "Animal encontrado", body = Animal),
        (status = 404, description = "Animal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_animal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(animal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Animal, Action::List)?;

    let animal = app_state
        .animal_repo
        .find_by_id(animal_id)
        .await?
        .ok_or(AppError::NotFound("Animal não encontrado."))?;

    Ok((StatusCode::OK, Json(animal)))
}

#[utoipa::path(
    post,
    path = "/animal",
    tag = "Animal",
    request_body = AnimalPayload,
    responses(
        (status = 201, description = "Animal criado", body = Animal),
        (status = 404, description = "Rancho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_animal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AnimalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Animal, Action::Create)?;

    let animal = app_state.animal_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(animal)))
}

#[utoipa::path(
    put,
    path = "/animal/{animal_id}",
    tag = "Animal",
    params(("animal_id" = i32, Path, description = "ID do animal")),
    request_body = AnimalPayload,
    responses(
        (status = 204, description = "Animal atualizado"),
        (status = 404, description = "Animal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_animal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(animal_id): Path<i32>,
    Json(payload): Json<AnimalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Animal, Action::Update)?;

    app_state
        .animal_repo
        .update(animal_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Animal não encontrado."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/animal/{animal_id}",
    tag = "Animal",
    params(("animal_id" = i32, Path, description = "ID do animal")),
    responses(
        (status = 204, description = "Animal removido"),
        (status = 404, description = "Animal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_animal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(animal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Animal, Action::Delete)?;

    let deleted = app_state.animal_repo.delete(animal_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Animal não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Registros de saúde (sub-recurso)
// ---

#[utoipa::path(
    get,
    path = "/animal/healthrecord",
    tag = "Animal",
    params(AnimalIdFilter, ListParams),
    responses(
        (status = 200, description = "Registros de saúde do animal", body = Vec<HealthRecord>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_health_records(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<AnimalIdFilter>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::HealthRecord, Action::List)?;

    let records = app_state
        .animal_repo
        .health_records(filter.animal_id, &params)
        .await?;

    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    post,
    path = "/animal/healthrecord",
    tag = "Animal",
    request_body = HealthRecordPayload,
    responses(
        (status = 201, description = "Registro de saúde criado", body = HealthRecord),
        (status = 404, description = "Animal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_health_record(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<HealthRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::HealthRecord, Action::Create)?;

    let record = app_state.animal_repo.create_health_record(&payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/animal/healthrecord/{record_id}",
    tag = "Animal",
    params(("record_id" = i32, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_health_record(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(record_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::HealthRecord, Action::Delete)?;

    let deleted = app_state.animal_repo.delete_health_record(record_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Registro de saúde não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}
