// src/models/animal.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Animal {
    pub id: i32,
    pub ranch_id: i32,
    pub tag: String,
    pub species: String,
    pub age: i32,
    // true = vivo, false = morto
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção da listagem: animal + nome do rancho dono (join)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct AnimalInfo {
    pub ranch_name: String,
    pub animal_id: i32,
    pub animal_tag: String,
    pub animal_age: i32,
    pub animal_type: String,
    pub animal_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnimalPayload {
    #[validate(range(min = 1, message = "O id do rancho deve ser positivo."))]
    pub ranch_id: i32,

    #[validate(length(min = 1, max = 12, message = "A tag deve ter entre 1 e 12 caracteres."))]
    pub tag: String,

    #[validate(length(min = 1, message = "A espécie é obrigatória."))]
    pub species: String,

    #[validate(range(min = 1, message = "A idade deve ser positiva."))]
    pub age: i32,

    pub status: bool,
}

// ---
// Registro de saúde (sub-recurso de Animal)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct HealthRecord {
    pub id: i32,
    pub animal_id: i32,
    pub head_injury: bool,
    pub skin_conditions: bool,
    pub abscess: bool,
    pub arthritis: bool,
    pub swollen_hooves: bool,
    pub mastitis: bool,
    pub fibrosis: bool,
    pub asymmetry: bool,
    pub mammary_skin_conditions: String,
    // CMT: teste de mastite da Califórnia, subtipos a/d
    pub cmt_a: bool,
    pub cmt_d: bool,
    // Momento do exame, distinto dos carimbos de criação/atualização
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HealthRecordPayload {
    #[validate(range(min = 1, message = "O id do animal deve ser positivo."))]
    pub animal_id: i32,

    #[serde(default)]
    pub head_injury: bool,
    #[serde(default)]
    pub skin_conditions: bool,
    #[serde(default)]
    pub abscess: bool,
    #[serde(default)]
    pub arthritis: bool,
    #[serde(default)]
    pub swollen_hooves: bool,
    #[serde(default)]
    pub mastitis: bool,
    #[serde(default)]
    pub fibrosis: bool,
    #[serde(default)]
    pub asymmetry: bool,

    pub mammary_skin_conditions: String,

    #[serde(default)]
    pub cmt_a: bool,
    #[serde(default)]
    pub cmt_d: bool,

    pub recorded_at: DateTime<Utc>,
}

// Filtro do sub-recurso: de qual animal buscar os registros
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AnimalIdFilter {
    pub animal_id: i32,
}
