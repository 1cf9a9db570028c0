// src/models/collar.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Collar {
    pub id: i32,
    pub animal_id: i32,
    pub dev_eui: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção da listagem: colar + animal + rancho (cadeia de joins)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CollarInfo {
    pub animal_tag: String,
    pub ranch_name: String,
    pub animal_id: i32,
    pub collar_id: i32,
    pub collar_dev_eui: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Animais dos ranchos do usuário que ainda estão sem colar
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct WithoutCollarInfo {
    pub animal_id: i32,
    pub animal_tag: String,
    pub ranch_name: String,
    pub animal_type: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CollarPayload {
    #[validate(range(min = 1, message = "O id do animal deve ser positivo."))]
    pub animal_id: i32,

    #[validate(length(min = 1, message = "O dev_eui do colar é obrigatório."))]
    pub collar_dev_eui: String,
}

// ---
// Pings de GPS/telemetria (sub-recurso de Collar)
// ---

// Linha crua do banco, geometria desmontada em lon/lat
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CollarPingRecord {
    pub id: i32,
    pub collar_id: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub temperature: f64,
    pub battery_percentage: f64,
    pub altitude: f64,
    pub humidity: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CollarPingPayload {
    #[validate(range(min = 1, message = "O id do colar deve ser positivo."))]
    pub collar_id: i32,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude fora do intervalo [-90, 90]."))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude fora do intervalo [-180, 180]."))]
    pub longitude: f64,

    pub temperature: f64,

    #[serde(default)]
    pub battery_percentage: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub humidity: f64,

    pub timestamp: DateTime<Utc>,
}

// Filtro do sub-recurso: de qual colar buscar os pings
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CollarIdFilter {
    pub collar_id: i32,
}

// Resumo do upload de trajeto: quantos placemarks entraram no lote e
// quantos foram pulados por estarem incompletos
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackUploadSummary {
    pub collar_id: i32,
    pub inserted: usize,
    pub skipped: usize,
}
