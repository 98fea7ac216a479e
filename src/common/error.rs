// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Todos os erros que a API conhece. Os de entrada inválida viram 400,
// os de recurso ausente viram 404 e o resto vira 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // "CNPJ" ou "CPF"
    #[error("{0} já cadastrado")]
    DuplicateTaxId(&'static str),

    #[error("Valor não pode ser negativo")]
    InvalidValor,

    #[error("Duração não pode ser negativa")]
    InvalidDuracao,

    // A mensagem já vem pronta (ex: "Data é obrigatória")
    #[error("{0}")]
    RequiredField(&'static str),

    // Pai de um vínculo (POST .../barbearia/{id}) que não existe.
    #[error("Barbearia não encontrada com id: {0}")]
    BarbeariaNotFound(i64),

    #[error("{0}")]
    NotFound(String),

    #[error("JSON inválido: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Parâmetros inválidos: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Caminho inválido: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Atalho para o 404 padrão: "Cliente não encontrado com id: 7".
    pub fn not_found(recurso: &str, id: i64) -> Self {
        AppError::NotFound(format!("{recurso} com id: {id}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
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
            AppError::DuplicateTaxId(_)
            | AppError::InvalidValor
            | AppError::InvalidDuracao
            | AppError::RequiredField(_)
            | AppError::BarbeariaNotFound(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_)
            | AppError::PathRejection(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // DatabaseError e InternalServerError: loga o detalhe, devolve mensagem genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                let body = Json(json!({ "error": "Ocorreu um erro inesperado." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
