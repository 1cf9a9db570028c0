// src/models/ranch.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Ranch (a unidade de posse central: quase tudo pende de um rancho)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Ranch {
    pub id: i32,
    pub name: String,
    pub farm_code: String,
    pub primary_species: String,
    pub herd_size: i32,
    pub annual_yield: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. UserRanch (a "ponte" usuário-rancho)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct UserRanch {
    pub user_id: i32,
    pub ranch_id: i32,
    pub created_at: DateTime<Utc>,
}

// O que o cliente envia para criar ou atualizar um rancho
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RanchPayload {
    #[validate(length(min = 1, message = "O nome do rancho é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O identificador da fazenda é obrigatório."))]
    pub farm_code: String,

    #[validate(length(min = 1, message = "A espécie principal é obrigatória."))]
    pub primary_species: String,

    #[validate(range(min = 0, message = "O tamanho do rebanho não pode ser negativo."))]
    pub herd_size: i32,

    #[validate(range(min = 0.0, message = "A produção anual não pode ser negativa."))]
    pub annual_yield: f64,
}

// Associação do usuário autenticado a um rancho existente
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRanchPayload {
    #[validate(range(min = 1, message = "O id do rancho deve ser positivo."))]
    pub ranch_id: i32,
}
