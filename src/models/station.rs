// src/models/station.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::geo::GeoPoint;

// Linha crua do banco: a geometria volta desmontada em lon/lat
// (ST_X/ST_Y) e é remontada em GeoJSON pela projeção abaixo.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StationRecord {
    pub id: i32,
    pub name: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção única de resposta para estações
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StationInfo {
    pub station_id: i32,
    pub station_name: String,
    // Geometria Point GeoJSON, ou null se a estação não tem localização
    #[schema(value_type = Object)]
    pub location: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StationRecord> for StationInfo {
    fn from(row: StationRecord) -> Self {
        let location = match (row.longitude, row.latitude) {
            (Some(lon), Some(lat)) => Some(GeoPoint::new(lon, lat).to_geometry()),
            _ => None,
        };
        Self {
            station_id: row.id,
            station_name: row.name,
            location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StationPayload {
    #[validate(length(min = 1, message = "O nome da estação é obrigatório."))]
    pub station_name: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude fora do intervalo [-90, 90]."))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude fora do intervalo [-180, 180]."))]
    pub longitude: f64,
}

// Vincula uma estação a um rancho (ponte station_ranches)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachRanchPayload {
    #[validate(range(min = 1, message = "O id do rancho deve ser positivo."))]
    pub ranch_id: i32,
}

// ---
// Leituras meteorológicas / qualidade do ar (sub-recurso de Station)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StationReading {
    pub id: i32,
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub solar_radiation: f64,
    pub pm1: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub co2: f64,
    pub aqi: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StationReadingPayload {
    #[validate(range(min = 1, message = "O id da estação deve ser positivo."))]
    pub station_id: i32,

    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub solar_radiation: f64,
    pub pm1: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub co2: f64,
    pub aqi: Option<f64>,
}

// Filtro do sub-recurso: de qual estação buscar as leituras
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct StationIdFilter {
    pub station_id: i32,
}
