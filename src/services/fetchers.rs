//! Busca das listas do painel (atendimentos, agendamentos, solicitações)
//!
//! Um cliente é montado a cada busca a partir das configurações salvas, de modo
//! que alterações feitas pelo administrador valem na próxima execução.

use async_trait::async_trait;
use clickup::TaskManager;
use std::sync::Arc;
use tokio::time::Instant;

use super::api_monitor::{log_call_quietly, ApiCallRecord, CallLogger};
use super::normalizer::{normalize_tasks, NormalizedTask};
use super::settings_store::SettingsStore;
use crate::config::ClickUpApiSettings;
use crate::models::ListKind;
use crate::utils::AppResult;

/// Como os responsáveis são apresentados em cada tela
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeProjection {
    /// "ana, joao.silva"
    Joined,
    /// ["ana", "joao.silva"]
    Usernames,
}

/// Fonte de tarefas consumida pelo poller
#[async_trait]
pub trait TaskSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> AppResult<Vec<NormalizedTask>>;
}

pub struct ListFetcher {
    kind: ListKind,
    projection: AssigneeProjection,
    store: Arc<dyn SettingsStore>,
    api: ClickUpApiSettings,
    call_logger: Option<Arc<dyn CallLogger>>,
}

impl ListFetcher {
    /// Atendimentos: registra cada tentativa no monitor
    pub fn tickets(
        store: Arc<dyn SettingsStore>,
        api: ClickUpApiSettings,
        call_logger: Arc<dyn CallLogger>,
    ) -> Self {
        Self {
            kind: ListKind::Tickets,
            projection: AssigneeProjection::Joined,
            store,
            api,
            call_logger: Some(call_logger),
        }
    }

    pub fn schedules(store: Arc<dyn SettingsStore>, api: ClickUpApiSettings) -> Self {
        Self {
            kind: ListKind::Schedules,
            projection: AssigneeProjection::Joined,
            store,
            api,
            call_logger: None,
        }
    }

    pub fn requests(store: Arc<dyn SettingsStore>, api: ClickUpApiSettings) -> Self {
        Self {
            kind: ListKind::Requests,
            projection: AssigneeProjection::Usernames,
            store,
            api,
            call_logger: None,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn projection(&self) -> AssigneeProjection {
        self.projection
    }
}

#[async_trait]
impl TaskSource for ListFetcher {
    fn name(&self) -> &str {
        self.kind.label()
    }

    async fn fetch(&self) -> AppResult<Vec<NormalizedTask>> {
        let settings = self.store.get().await?;
        let list_id = settings.require_list(self.kind)?;
        let client = self.api.build_client(settings.require_api_key()?)?;
        let manager = TaskManager::new(client);

        let endpoint = format!("list/{}/task", list_id);
        let started = Instant::now();
        let logger = self.call_logger.as_deref();

        let tasks = manager
            .get_tasks_in_list_observed(list_id, &[], |report| {
                let Some(logger) = logger else {
                    return;
                };
                let record = match report.error {
                    None => ApiCallRecord::success(&endpoint, started.elapsed()),
                    Some(e) => ApiCallRecord::error(&endpoint, started.elapsed(), e.to_string()),
                };
                log_call_quietly(logger, record);
            })
            .await?;

        Ok(normalize_tasks(tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClickUpSettings;
    use crate::services::api_monitor::{ApiMonitor, CallStatus};
    use crate::services::settings_store::MemorySettingsStore;
    use crate::utils::AppError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api_for(server: &MockServer) -> ClickUpApiSettings {
        ClickUpApiSettings {
            base_url: server.base_url(),
            retry_base_delay_ms: 1,
            ..Default::default()
        }
    }

    fn store_with(settings: ClickUpSettings) -> Arc<dyn SettingsStore> {
        Arc::new(MemorySettingsStore::new(settings))
    }

    fn configured() -> ClickUpSettings {
        ClickUpSettings {
            api_key: "pk_test".to_string(),
            list_id: "L-ATD".to_string(),
            list_id_requests: "L-SOL".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_list_id_is_config_error_without_http() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(json!({"tasks": []}));
            })
            .await;

        let fetcher = ListFetcher::schedules(store_with(configured()), api_for(&server));
        let result = fetcher.fetch().await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_ticket_fetch_logs_every_attempt() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/list/L-ATD/task");
                then.status(503);
            })
            .await;

        let monitor = Arc::new(ApiMonitor::default());
        let fetcher = ListFetcher::tickets(
            store_with(configured()),
            api_for(&server),
            monitor.clone(),
        );

        let result = fetcher.fetch().await;

        assert!(matches!(result, Err(AppError::ClickUpApi(_))));
        assert_eq!(mock.hits_async().await, 3);

        let records = monitor.recent().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.status == CallStatus::Error));
        assert!(records.iter().all(|r| r.endpoint == "list/L-ATD/task"));
        assert_eq!(
            records[0].error_message.as_deref(),
            Some("Erro na API (status 503): Service Unavailable")
        );
    }

    #[tokio::test]
    async fn test_request_fetch_normalizes_tasks() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/list/L-SOL/task")
                    .header("Authorization", "pk_test");
                then.status(200).json_body(json!({
                    "tasks": [{
                        "id": "s1",
                        "name": "Solicitação de treinamento",
                        "status": {"status": "aberto", "color": "#ccc"},
                        "assignees": [{"id": 1, "username": "ana"}],
                        "due_date": "1700000000000",
                        "custom_fields": [
                            {"id": "f-prod", "name": "Produto", "value": [{"name": "ERP"}]}
                        ]
                    }]
                }));
            })
            .await;

        let fetcher = ListFetcher::requests(store_with(configured()), api_for(&server));
        let tasks = fetcher.fetch().await.unwrap();

        assert_eq!(fetcher.projection(), AssigneeProjection::Usernames);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].assignee_usernames(), &["ana".to_string()]);
        assert_eq!(tasks[0].due_date, Some(1_700_000_000_000));
        assert_eq!(tasks[0].field("1").unwrap().value, json!(["ERP"]));
    }

    #[tokio::test]
    async fn test_successful_ticket_fetch_logs_one_record() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/L-ATD/task");
                then.status(200).json_body(json!({"tasks": []}));
            })
            .await;

        let monitor = Arc::new(ApiMonitor::default());
        let fetcher = ListFetcher::tickets(
            store_with(configured()),
            api_for(&server),
            monitor.clone(),
        );

        assert!(fetcher.fetch().await.unwrap().is_empty());
        let records = monitor.recent().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, CallStatus::Success);
    }
}
