// src/models/milk.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct DairyMilk {
    pub id: i32,
    pub ranch_id: i32,
    pub milk_quality: f64,
    pub milk_quantity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção da listagem: registro de leite + nome do rancho
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct DairyMilkInfo {
    pub ranch_name: String,
    pub dairy_milk_id: i32,
    pub milk_quality: f64,
    pub milk_quantity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DairyMilkPayload {
    #[validate(range(min = 1, message = "O id do rancho deve ser positivo."))]
    pub ranch_id: i32,

    #[validate(range(min = 0.0, message = "A qualidade do leite não pode ser negativa."))]
    pub milk_quality: f64,

    #[validate(range(min = 0.0, message = "A quantidade de leite não pode ser negativa."))]
    pub milk_quantity: f64,
}
