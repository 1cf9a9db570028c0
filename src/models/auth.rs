// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    // Texto livre; o vocabulário conhecido fica em common::policy
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 3, message = "O nome de usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    // Papel decidido uma única vez no registro; ausente = "rancher"
    pub role: Option<String>,
}

// Dados para login (formulário estilo OAuth2: username + password)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O nome de usuário é obrigatório."))]
    pub username: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (nome do usuário)
    pub id: i32,      // ID do usuário
    pub role: String, // Papel gravado no registro
    pub exp: usize,   // Expiration time (quando o token expira)
    pub iat: usize,   // Issued At (quando o token foi criado)
}

// Troca de papel feita por um admin, chaveada pelo username
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRolePayload {
    #[validate(length(min = 1, message = "O papel é obrigatório."))]
    pub role: String,
}
