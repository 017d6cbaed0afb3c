/// Middleware de autenticação do painel
///
/// A sessão é mantida pelo provedor de autenticação externo, que repassa o id
/// do usuário no header `X-User-Id`. Endpoints administrativos (edição de
/// tarefas, configurações do ClickUp, monitor de API) exigem papel admin.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::utils::logging::log_access_denied;
use crate::utils::AppError;
use crate::AppState;

pub const USER_ID_HEADER: &str = "X-User-Id";

fn user_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Exige um usuário identificado
///
/// - **401 Unauthorized**: header ausente
pub async fn require_user(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user_id(&headers).is_none() {
        log_access_denied(None, request.uri().path());
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Exige usuário com papel admin
///
/// # Respostas
///
/// - **401 Unauthorized**: header ausente
/// - **403 Forbidden**: usuário sem papel admin
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = user_id(&headers) else {
        log_access_denied(None, request.uri().path());
        return Err(AppError::Unauthorized);
    };

    if !state.roles.is_admin(user).await? {
        log_access_denied(Some(user), request.uri().path());
        return Err(AppError::Forbidden);
    }

    tracing::debug!("✅ Admin access granted: {}", user);
    Ok(next.run(request).await)
}
