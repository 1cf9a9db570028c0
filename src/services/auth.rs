// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

// Vida útil do token de acesso
const TOKEN_MINUTES: i64 = 30;

// Papel atribuído quando o registro não informa um
const DEFAULT_ROLE: &str = "rancher";

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    /// Registra um usuário novo. O hash roda em `spawn_blocking` para não
    /// travar o executor; colisão de username/e-mail vira 409 no repositório.
    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_user(username, email, &password_hash, role.unwrap_or(DEFAULT_ROLE))
            .await
    }

    /// Login com username + senha; devolve o token assinado com validade
    /// de 30 minutos.
    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&user.username, user.id, &user.role)
    }

    /// Valida assinatura e expiração do token e devolve as claims. O papel
    /// viaja dentro do token: decidido no registro, não re-derivado a cada
    /// requisição.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Troca de papel chaveada pelo username; a checagem de admin fica na
    /// política, no handler.
    pub async fn change_role(&self, username: &str, role: &str) -> Result<User, AppError> {
        self.user_repo
            .set_role(username, role)
            .await?
            .ok_or(AppError::NotFound("Usuário não encontrado."))
    }

    fn create_token(&self, username: &str, user_id: i32, role: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(TOKEN_MINUTES);

        let claims = Claims {
            sub: username.to_owned(),
            id: user_id,
            role: role.to_owned(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    fn decode_with(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|d| d.claims)
    }

    fn claims(expires_in_secs: i64) -> Claims {
        let now = Utc::now();
        Claims {
            sub: "alice".to_string(),
            id: 7,
            role: "rancher".to_string(),
            exp: (now + chrono::Duration::seconds(expires_in_secs)).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    #[test]
    fn token_round_trips_subject_id_and_role() {
        let token = encode_with("segredo", &claims(1800));
        let decoded = decode_with("segredo", &token).unwrap();
        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.role, "rancher");
    }

    #[test]
    fn token_signed_with_wrong_key_is_rejected() {
        let token = encode_with("segredo", &claims(1800));
        assert!(decode_with("outro-segredo", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expirado bem além da folga padrão de validação
        let token = encode_with("segredo", &claims(-600));
        assert!(decode_with("segredo", &token).is_err());
    }
}
