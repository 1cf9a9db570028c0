// src/handlers/collar.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        geo::{self, GeoPoint},
        params::ListParams,
        policy::{Action, Resource, authorize},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::collar::{
        Collar, CollarIdFilter, CollarInfo, CollarPayload, CollarPingPayload, WithoutCollarInfo,
    },
};

#[utoipa::path(
    get,
    path = "/collar",
    tag = "Collar",
    params(ListParams),
    responses(
        (status = 200, description = "Colares dos ranchos visíveis", body = Vec<CollarInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_collars(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::Collar, Action::List)?;

    let collars = app_state
        .collar_repo
        .list(scope.filter_user(user.0.user_id), &params)
        .await?;

    Ok((StatusCode::OK, Json(collars)))
}

// Animais ainda sem colar: lista vazia é resposta normal, não 404
#[utoipa::path(
    get,
    path = "/collar/without_collar",
    tag = "Collar",
    responses(
        (status = 200, description = "Animais sem colar", body = Vec<WithoutCollarInfo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_animals_without_collar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = authorize(&user.0.role, Resource::Collar, Action::List)?;

    let animals = app_state
        .collar_repo
        .animals_without_collar(scope.filter_user(user.0.user_id))
        .await?;

    Ok((StatusCode::OK, Json(animals)))
}

#[utoipa::path(
    get,
    path = "/collar/{collar_id}",
    tag = "Collar",
    params(("collar_id" = i32, Path, description = "ID do colar")),
    responses(
        (status = 200, description = "Colar encontrado", body = Collar),
        (status = 404, description = "Colar não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_collar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(collar_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Collar, Action::List)?;

    let collar = app_state
        .collar_repo
        .find_by_id(collar_id)
        .await?
        .ok_or(AppError::NotFound("Colar não encontrado."))?;

    Ok((StatusCode::OK, Json(collar)))
}

#[utoipa::path(
    post,
    path = "/collar",
    tag = "Collar",
    request_body = CollarPayload,
    responses(
        (status = 201, description = "Colar criado", body = Collar),
        (status = 404, description = "Animal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_collar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CollarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Collar, Action::Create)?;

    let collar = app_state.collar_repo.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(collar)))
}

#[utoipa::path(
    put,
    path = "/collar/{collar_id}",
    tag = "Collar",
    params(("collar_id" = i32, Path, description = "ID do colar")),
    request_body = CollarPayload,
    responses(
        (status = 204, description = "Colar atualizado"),
        (status = 404, description = "Colar não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_collar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(collar_id): Path<i32>,
    Json(payload): Json<CollarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::Collar, Action::Update)?;

    app_state
        .collar_repo
        .update(collar_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Colar não encontrado."))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/collar/{collar_id}",
    tag = "Collar",
    params(("collar_id" = i32, Path, description = "ID do colar")),
    responses(
        (status = 204, description = "Colar removido"),
        (status = 404, description = "Colar não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_collar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(collar_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::Collar, Action::Delete)?;

    let deleted = app_state.collar_repo.delete(collar_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Colar não encontrado."));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Pings de GPS (sub-recurso)
// ---

#[utoipa::path(
    post,
    path = "/collar/data",
    tag = "Collar",
    request_body = CollarPingPayload,
    responses(
        (status = 201, description = "Ping registrado"),
        (status = 404, description = "Colar não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ping(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CollarPingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    authorize(&user.0.role, Resource::CollarPing, Action::Create)?;

    let ping = app_state.collar_repo.create_ping(&payload).await?;

    // A resposta já sai como Feature GeoJSON, igual à leitura
    let feature = geo::feature(
        GeoPoint::new(ping.longitude, ping.latitude).to_geometry(),
        ping_properties(&ping),
    );
    Ok((StatusCode::CREATED, Json(feature)))
}

/// FeatureCollection de pontos: um Feature por ping, coordenadas [lon, lat].
#[utoipa::path(
    get,
    path = "/collar/data",
    tag = "Collar",
    params(CollarIdFilter, ListParams),
    responses(
        (status = 200, description = "Pings do colar como FeatureCollection GeoJSON")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_pings_geojson(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<CollarIdFilter>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::CollarPing, Action::List)?;

    let pings = app_state.collar_repo.pings(filter.collar_id, &params).await?;

    let features: Vec<Value> = pings
        .iter()
        .map(|p| {
            geo::feature(
                GeoPoint::new(p.longitude, p.latitude).to_geometry(),
                ping_properties(p),
            )
        })
        .collect();

    Ok((StatusCode::OK, Json(geo::feature_collection(features))))
}

/// Rota do colar: uma LineString montada a partir dos pings em ordem
/// temporal.
#[utoipa::path(
    get,
    path = "/collar/data/route",
    tag = "Collar",
    params(CollarIdFilter, ListParams),
    responses(
        (status = 200, description = "Rota do colar como LineString GeoJSON")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_route_geojson(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<CollarIdFilter>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::CollarPing, Action::List)?;

    let pings = app_state.collar_repo.pings(filter.collar_id, &params).await?;

    let points: Vec<GeoPoint> = pings
        .iter()
        .map(|p| GeoPoint::new(p.longitude, p.latitude))
        .collect();

    let feature = geo::feature(
        geo::line_string(&points),
        json!({ "collar_id": filter.collar_id }),
    );

    Ok((StatusCode::OK, Json(geo::feature_collection(vec![feature]))))
}

fn ping_properties(ping: &crate::models::collar::CollarPingRecord) -> Value {
    json!({
        "id": ping.id,
        "temperature": ping.temperature,
        "battery_percentage": ping.battery_percentage,
        "altitude": ping.altitude,
        "humidity": ping.humidity,
        "timestamp": ping.timestamp,
    })
}
