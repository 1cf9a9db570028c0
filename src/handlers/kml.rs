// src/handlers/kml.rs

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::{
        error::AppError,
        policy::{Action, Resource, authorize},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::collar::TrackUploadSummary,
};

/// Upload de trajeto: formulário multipart com o campo `collar_id` e o
/// arquivo KML. Placemarks incompletos são pulados; os demais entram em um
/// único lote.
#[utoipa::path(
    post,
    path = "/kml/upload_kml",
    tag = "Kml",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Trajeto gravado", body = TrackUploadSummary),
        (status = 400, description = "Formulário ou arquivo inválido"),
        (status = 404, description = "Colar não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_kml(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    authorize(&user.0.role, Resource::CollarPing, Action::Create)?;

    let mut collar_id: Option<i32> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("Formulário inválido: {}", e)))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("collar_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidUpload(format!("Formulário inválido: {}", e)))?;
                let parsed = text.trim().parse().map_err(|_| {
                    AppError::InvalidUpload("collar_id precisa ser um inteiro".to_string())
                })?;
                collar_id = Some(parsed);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidUpload(format!("Formulário inválido: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let collar_id = collar_id
        .ok_or_else(|| AppError::InvalidUpload("Campo collar_id ausente".to_string()))?;
    let (file_name, contents) =
        file.ok_or_else(|| AppError::InvalidUpload("Campo file ausente".to_string()))?;

    let summary = app_state
        .kml_service
        .ingest_track(collar_id, &file_name, &contents)
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}
