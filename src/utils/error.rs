use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clickup::ClickUpError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Falha da API do ClickUp (após as novas tentativas, quando aplicável)
    #[error("{0}")]
    ClickUpApi(ClickUpError),

    /// Credencial ou ID de lista ausente
    #[error("Configurações do ClickUp incompletas: {0}")]
    ConfigError(String),

    #[error("Erro ao acessar configurações salvas: {0}")]
    StoreError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Usuário não identificado")]
    Unauthorized,

    #[error("Acesso restrito a administradores")]
    Forbidden,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ClickUpError> for AppError {
    fn from(err: ClickUpError) -> Self {
        match err {
            ClickUpError::ConfigError(msg) => AppError::ConfigError(msg),
            ClickUpError::ValidationError(msg) => AppError::ValidationError(msg),
            other => AppError::ClickUpApi(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ClickUpApi(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::PRECONDITION_FAILED,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JsonError(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
