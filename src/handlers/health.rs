use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "atendimentos-admin",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "polling": {
            "atendimentos": state.tickets.is_running(),
            "agendamentos": state.schedules.is_running(),
            "solicitacoes": state.requests.is_running()
        }
    }))
}
