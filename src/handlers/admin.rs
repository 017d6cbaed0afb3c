use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::ClickUpSettings;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// `GET /admin/settings`
pub async fn get_settings(State(state): State<Arc<AppState>>) -> AppResult<Json<ClickUpSettings>> {
    log_request_received("/admin/settings", "GET");
    Ok(Json(state.store.get().await?))
}

/// `PUT /admin/settings`
///
/// Grava o registro e dispara uma busca imediata nas três listas.
pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<ClickUpSettings>,
) -> AppResult<Json<ClickUpSettings>> {
    log_request_received("/admin/settings", "PUT");

    if settings.api_key.trim().is_empty() {
        log_validation_error("api_key", "obrigatório");
        return Err(AppError::ValidationError("api_key é obrigatório".to_string()));
    }

    let stored = state.store.put(settings).await?;
    log_info("✅ Configurações do ClickUp atualizadas");
    state.refresh_panels();

    Ok(Json(stored))
}

/// `GET /admin/monitor`
pub async fn get_monitor(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let records = state.monitor.recent()?;

    Ok(Json(json!({
        "count": records.len(),
        "capacity": state.monitor.capacity(),
        "records": records
    })))
}
