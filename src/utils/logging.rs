use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_clickup_api_error(operation: &str, status: Option<u16>, error: &str) {
    error!("ClickUp API error: {} - Status: {:?} - Error: {}", operation, status, error);
}

pub fn log_clickup_task_updated(task_id: &str) {
    info!("✏️ ClickUp task updated successfully: {}", task_id);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Atendimentos admin server starting on port {}", port);
}

pub fn log_server_ready(addr: &str) {
    info!("✅ Server ready and listening on http://{}", addr);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_poll_result(list: &str, count: usize, changed: bool) {
    if changed {
        info!("🔄 {}: {} tarefas (snapshot atualizado)", list, count);
    } else {
        debug!("{}: {} tarefas (sem alterações)", list, count);
    }
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_access_denied(user_id: Option<&str>, endpoint: &str) {
    warn!("❌ Access denied: user {:?} - {}", user_id, endpoint);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
