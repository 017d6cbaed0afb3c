//! Monitor de chamadas à API do ClickUp
//!
//! Cada tentativa de buscar a lista de atendimentos gera um [`ApiCallRecord`].
//! Falhas ao registrar nunca interrompem a busca: são apenas logadas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::utils::{AppError, AppResult};

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub status: CallStatus,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ApiCallRecord {
    pub fn success(endpoint: impl Into<String>, elapsed: Duration) -> Self {
        Self::new(endpoint.into(), CallStatus::Success, elapsed, None)
    }

    pub fn error(endpoint: impl Into<String>, elapsed: Duration, message: impl Into<String>) -> Self {
        Self::new(endpoint.into(), CallStatus::Error, elapsed, Some(message.into()))
    }

    fn new(endpoint: String, status: CallStatus, elapsed: Duration, error_message: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            endpoint,
            status,
            response_time_ms: elapsed.as_millis() as u64,
            error_message,
        }
    }
}

/// Destino dos registros de chamada
pub trait CallLogger: Send + Sync {
    fn log_call(&self, record: ApiCallRecord) -> AppResult<()>;
}

/// Registra ignorando falhas do logger
pub fn log_call_quietly(logger: &dyn CallLogger, record: ApiCallRecord) {
    let endpoint = record.endpoint.clone();
    if let Err(e) = logger.log_call(record) {
        tracing::warn!("⚠️ Falha ao registrar chamada {}: {}", endpoint, e);
    }
}

/// Buffer em memória com os registros mais recentes (mais novo primeiro)
#[derive(Debug)]
pub struct ApiMonitor {
    capacity: usize,
    records: Mutex<VecDeque<ApiCallRecord>>,
}

impl Default for ApiMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ApiMonitor {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Registros mais recentes primeiro
    pub fn recent(&self) -> AppResult<Vec<ApiCallRecord>> {
        let records = self.records.lock().map_err(|e| {
            AppError::InternalError(format!("monitor de API indisponível: {}", e))
        })?;
        Ok(records.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CallLogger for ApiMonitor {
    fn log_call(&self, record: ApiCallRecord) -> AppResult<()> {
        let mut records = self.records.lock().map_err(|e| {
            AppError::InternalError(format!("monitor de API indisponível: {}", e))
        })?;
        records.push_front(record);
        records.truncate(self.capacity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenLogger;

    impl CallLogger for BrokenLogger {
        fn log_call(&self, _record: ApiCallRecord) -> AppResult<()> {
            Err(AppError::StoreError("sem conexão".to_string()))
        }
    }

    #[test]
    fn test_newest_first_and_bounded() {
        let monitor = ApiMonitor::new(2);
        for endpoint in ["list/1/task", "list/2/task", "list/3/task"] {
            tokio_test::assert_ok!(
                monitor.log_call(ApiCallRecord::success(endpoint, Duration::from_millis(12)))
            );
        }

        let records = monitor.recent().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].endpoint, "list/3/task");
        assert_eq!(records[1].endpoint, "list/2/task");
    }

    #[test]
    fn test_error_record_serialization() {
        let record = ApiCallRecord::error("list/1/task", Duration::from_millis(1500), "Bad Gateway");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["response_time_ms"], 1500);
        assert_eq!(json["error_message"], "Bad Gateway");
    }

    #[test]
    fn test_logger_failure_is_swallowed() {
        log_call_quietly(
            &BrokenLogger,
            ApiCallRecord::success("list/1/task", Duration::ZERO),
        );
    }
}
