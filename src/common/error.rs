use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::{draft::DraftError, reconciler::ReconcileError};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Toda falha vira uma mensagem legível em português para o usuário;
// o detalhe técnico fica só no log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regras do rascunho de OS (cliente ausente, aparelho sem tipo...)
    #[error(transparent)]
    DraftError(#[from] DraftError),

    // Regras da sessão de edição (peça duplicada...)
    #[error(transparent)]
    ReconcileError(#[from] ReconcileError),

    #[error("CPF inválido")]
    InvalidCpf,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    // 404 genérico: "Ordem", "Peça", "Aviso"...
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("CEP não encontrado")]
    CepNotFound,

    #[error("CEP inválido")]
    InvalidCep,

    #[error("Falha ao consultar o serviço de CEP")]
    CepLookupError(#[from] reqwest::Error),

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

            AppError::DraftError(err) => {
                let body = Json(json!({ "error": err.to_string() }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ReconcileError(err) => {
                let body = Json(json!({ "error": err.to_string() }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::NotFound(what) => {
                let body = Json(json!({ "error": format!("{} não encontrado(a).", what) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            AppError::InvalidCpf => (StatusCode::BAD_REQUEST, "O CPF informado é inválido."),
            AppError::InvalidCep => (StatusCode::BAD_REQUEST, "O CEP deve ter 8 dígitos."),
            AppError::CepNotFound => (StatusCode::NOT_FOUND, "CEP não encontrado."),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Você não tem permissão para isso."),

            AppError::CepLookupError(ref e) => {
                tracing::error!("Falha na consulta ao ViaCEP: {}", e);
                (StatusCode::BAD_GATEWAY, "Não foi possível consultar o CEP agora.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
