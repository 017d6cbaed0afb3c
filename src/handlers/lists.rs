// ============================================================================
// Telas de lista: atendimentos, agendamentos e solicitações
// ============================================================================
//
// Os handlers leem o snapshot mantido pelo poller de cada lista e aplicam os
// filtros da tela (visão, busca, status). Nenhuma chamada ao ClickUp é feita
// aqui; `POST .../retry` apenas dispara uma busca imediata.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use clickup::{Priority, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::services::filters::{distinct_statuses, StatusFilter, TaskQuery, TicketView};
use crate::services::{AssigneeProjection, ListPanel, NormalizedTask};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// Parâmetros de consulta das telas de lista
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub view: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Responsáveis no formato de cada tela
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssigneesView {
    Joined(String),
    Usernames(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldCell {
    pub key: String,
    pub title: String,
    pub value: Value,
}

/// Linha da tabela
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: Option<TaskStatus>,
    pub status_label: String,
    pub priority: Option<Priority>,
    pub priority_label: Option<&'static str>,
    pub assignees: AssigneesView,
    pub start_date: Option<i64>,
    pub start_date_display: String,
    pub due_date: Option<i64>,
    pub due_date_display: String,
    pub custom_fields: Vec<FieldCell>,
    pub url: Option<String>,
}

impl TaskRow {
    pub fn project(task: &NormalizedTask, projection: AssigneeProjection) -> Self {
        let assignees = match projection {
            AssigneeProjection::Joined => AssigneesView::Joined(task.assignees_joined()),
            AssigneeProjection::Usernames => {
                AssigneesView::Usernames(task.assignee_usernames().to_vec())
            }
        };

        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description_or_placeholder().to_string(),
            status: task.status.clone(),
            status_label: task.status_label().to_string(),
            priority: task.priority,
            priority_label: task.priority.map(|p| p.as_str()),
            assignees,
            start_date: task.start_date,
            start_date_display: task.start_date_display(),
            due_date: task.due_date,
            due_date_display: task.due_date_display(),
            custom_fields: task
                .custom_fields
                .iter()
                .map(|f| FieldCell {
                    key: f.key.clone(),
                    title: f.title(),
                    value: f.value.clone(),
                })
                .collect(),
            url: task.url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub tasks: Vec<TaskRow>,
    /// Status distintos do snapshot completo (dropdown de filtro)
    pub statuses: Vec<String>,
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn list_response(panel: &ListPanel, query: &TaskQuery, projection: AssigneeProjection) -> ListResponse {
    let state = panel.cache().snapshot();
    let tasks: Vec<TaskRow> = query
        .apply(&state.tasks)
        .iter()
        .map(|t| TaskRow::project(t, projection))
        .collect();

    ListResponse {
        statuses: distinct_statuses(&state.tasks),
        total: state.tasks.len(),
        tasks,
        loading: state.loading,
        error: state.error,
        updated_at: state.updated_at,
    }
}

fn parse_view(view: Option<&str>) -> AppResult<TicketView> {
    match view.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(TicketView::default()),
        Some(v) => v.parse().map_err(|e: String| {
            log_validation_error("view", &e);
            AppError::ValidationError(e)
        }),
    }
}

/// `GET /atendimentos?view=today|pending&search=&status=`
pub async fn list_atendimentos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>> {
    log_request_received("/atendimentos", "GET");

    let query = TaskQuery {
        view: Some(parse_view(params.view.as_deref())?),
        scheduled_only: false,
        search: params.search.unwrap_or_default(),
        status: StatusFilter::parse(params.status.as_deref().unwrap_or_default()),
    };

    Ok(Json(list_response(&state.tickets, &query, AssigneeProjection::Joined)))
}

/// `GET /agendamentos?search=`
pub async fn list_agendamentos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>> {
    log_request_received("/agendamentos", "GET");

    let query = TaskQuery {
        view: None,
        scheduled_only: true,
        search: params.search.unwrap_or_default(),
        status: StatusFilter::All,
    };

    Ok(Json(list_response(&state.schedules, &query, AssigneeProjection::Joined)))
}

/// `GET /solicitacoes?search=&status=`
pub async fn list_solicitacoes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>> {
    log_request_received("/solicitacoes", "GET");

    let query = TaskQuery {
        view: None,
        scheduled_only: false,
        search: params.search.unwrap_or_default(),
        status: StatusFilter::parse(params.status.as_deref().unwrap_or_default()),
    };

    Ok(Json(list_response(&state.requests, &query, AssigneeProjection::Usernames)))
}

fn accepted(list: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "accepted",
            "list": list,
            "timestamp": Utc::now().to_rfc3339()
        })),
    )
}

/// `POST /atendimentos/retry`
pub async fn retry_atendimentos(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    state.tickets.retry();
    accepted(state.tickets.name())
}

/// `POST /agendamentos/retry`
pub async fn retry_agendamentos(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    state.schedules.retry();
    accepted(state.schedules.name())
}

/// `POST /solicitacoes/retry`
pub async fn retry_solicitacoes(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    state.requests.retry();
    accepted(state.requests.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalizer::normalize_task;
    use serde_json::json;

    fn sample() -> NormalizedTask {
        normalize_task(
            serde_json::from_value(json!({
                "id": "t1",
                "name": "Atendimento Cliente X",
                "status": {"status": "agendado", "color": "#f80"},
                "priority": {"priority": "urgent", "id": "1"},
                "assignees": [{"id": 1, "username": "ana"}, {"id": 2, "username": "joao.silva"}],
                "custom_fields": [{"id": "f1", "name": "Produto", "value": [{"name": "ERP"}]}]
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_row_projections() {
        let task = sample();

        let joined = TaskRow::project(&task, AssigneeProjection::Joined);
        assert_eq!(joined.assignees, AssigneesView::Joined("ana, joao.silva".to_string()));
        assert_eq!(joined.description, "Sem descrição");
        assert_eq!(joined.due_date_display, "Não informada");
        assert_eq!(joined.priority_label, Some("Urgente"));
        assert_eq!(joined.custom_fields[0].title, "Produtos");

        let listed = TaskRow::project(&task, AssigneeProjection::Usernames);
        assert_eq!(
            serde_json::to_value(&listed.assignees).unwrap(),
            json!(["ana", "joao.silva"])
        );
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(parse_view(None).unwrap(), TicketView::Today);
        assert_eq!(parse_view(Some("pending")).unwrap(), TicketView::Pending);
        assert!(matches!(parse_view(Some("x")), Err(AppError::ValidationError(_))));
    }
}
