use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Toda falha é traduzida aqui para um status HTTP + mensagem; nada é fatal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Usuário ou e-mail já cadastrado")]
    UserAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // 403 uniforme: papel sem permissão para o recurso/ação
    #[error("Permissão insuficiente")]
    Forbidden,

    // A mensagem completa vem do chamador ("Animal não encontrado." etc.)
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Rancho já associado a um usuário")]
    RanchAlreadyAssigned,

    #[error("Estação já vinculada a este rancho")]
    StationAlreadyLinked,

    // Upload recusado antes de qualquer escrita (extensão/XML inválido)
    #[error("Arquivo de trajeto inválido: {0}")]
    InvalidUpload(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::UserAlreadyExists => {
                (StatusCode::CONFLICT, "Usuário ou e-mail já cadastrado.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Seu papel não tem permissão para esta ação.".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::RanchAlreadyAssigned => (
                StatusCode::CONFLICT,
                "Este rancho já está associado a um usuário.".to_string(),
            ),
            AppError::StationAlreadyLinked => (
                StatusCode::CONFLICT,
                "Esta estação já está vinculada ao rancho informado.".to_string(),
            ),
            AppError::InvalidUpload(msg) => (StatusCode::BAD_REQUEST, msg),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe uma genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
