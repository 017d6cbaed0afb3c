//! Tipos de erro para o crate clickup

use thiserror::Error;

/// Erros do cliente ClickUp
#[derive(Debug, Error)]
pub enum ClickUpError {
    /// Erro de requisição HTTP (rede, timeout, conexão recusada)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API do ClickUp (status code não-2xx)
    #[error("Erro na API (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuração incompleta (token ou ID de lista/tarefa ausente)
    #[error("Configurações do ClickUp incompletas: {0}")]
    ConfigError(String),

    /// Entrada inválida (e.g., comentário vazio)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Todas as tentativas falharam sem erro registrado
    #[error("Falha após múltiplas tentativas: {0}")]
    RetriesExhausted(String),
}

impl ClickUpError {
    /// Falhas transitórias (não-2xx ou rede) podem ser repetidas em leituras.
    /// Erros de configuração nunca consomem nova tentativa.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClickUpError::ApiError { .. } | ClickUpError::HttpError(_))
    }

    /// Status HTTP associado, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            ClickUpError::ApiError { status, .. } => Some(*status),
            ClickUpError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, ClickUpError>;
