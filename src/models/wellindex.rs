// src/models/wellindex.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Índice de bem-estar: escore calculado externamente; aqui só é
// armazenado e servido por rancho.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct WellIndex {
    pub id: i32,
    pub ranch_id: i32,
    pub index_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct WellIndexInfo {
    pub wellindex_id: i32,
    pub ranch_name: String,
    pub index_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WellIndexPayload {
    #[validate(range(min = 1, message = "O id do rancho deve ser positivo."))]
    pub ranch_id: i32,

    pub index_value: f64,
}
