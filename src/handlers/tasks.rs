// ============================================================================
// Detalhes de tarefa, comentários e metadados de listas
// ============================================================================
//
// Chamadas diretas ao ClickUp com o cliente montado a partir das
// configurações salvas. Leituras passam pela política de novas tentativas;
// edição e comentário são enviados uma única vez.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use clickup::{Comment, CreateTaskRequest, CustomField, FieldOption, Status, TaskUpdate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::lists::TaskRow;
use crate::models::ListKind;
use crate::services::normalizer::{format_date, normalize_task};
use crate::services::AssigneeProjection;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// `GET /tasks/{id}`
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> AppResult<Json<TaskRow>> {
    log_request_received("/tasks/{id}", "GET");

    let manager = state.task_manager().await?;
    let task = manager.get_task(&task_id).await.map_err(|e| {
        log_clickup_api_error("get_task", e.status(), &e.to_string());
        AppError::from(e)
    })?;

    Ok(Json(TaskRow::project(
        &normalize_task(task),
        AssigneeProjection::Usernames,
    )))
}

/// `PUT /tasks/{id}` (admin)
///
/// Aceita prioridade como texto ("alta") ou número; campos personalizados
/// como `{id, value}`.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    Json(update): Json<TaskUpdate>,
) -> AppResult<Json<TaskRow>> {
    log_request_received("/tasks/{id}", "PUT");

    if update.is_empty() {
        log_validation_error("body", "nenhum campo para atualizar");
        return Err(AppError::ValidationError(
            "nenhum campo para atualizar".to_string(),
        ));
    }

    let manager = state.task_manager().await?;
    let task = manager.update_task(&task_id, &update).await.map_err(|e| {
        log_clickup_api_error("update_task", e.status(), &e.to_string());
        AppError::from(e)
    })?;

    log_clickup_task_updated(&task.id);
    state.refresh_panels();

    Ok(Json(TaskRow::project(
        &normalize_task(task),
        AssigneeProjection::Usernames,
    )))
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: String,
    pub text: String,
    pub author: String,
    pub date: Option<i64>,
    pub date_display: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            author: comment.author().to_string(),
            date_display: format_date(comment.date),
            id: comment.id,
            text: comment.comment_text,
            date: comment.date,
        }
    }
}

/// `GET /tasks/{id}/comments`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> AppResult<Json<Vec<CommentView>>> {
    log_request_received("/tasks/{id}/comments", "GET");

    let manager = state.task_manager().await?;
    let comments = manager.get_task_comments(&task_id).await?;

    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub comment_text: String,
}

/// `POST /tasks/{id}/comments` (admin)
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    Json(body): Json<NewComment>,
) -> AppResult<(StatusCode, Json<Value>)> {
    log_request_received("/tasks/{id}/comments", "POST");

    let manager = state.task_manager().await?;
    let created = manager
        .add_comment(&task_id, &body.comment_text)
        .await
        .map_err(|e| {
            log_clickup_api_error("add_comment", e.status(), &e.to_string());
            AppError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "task_id": task_id,
            "comment": created
        })),
    ))
}

/// Status inicial de um atendimento aberto pelo painel
pub const NEW_TICKET_STATUS: &str = "fazer";

#[derive(Debug, Deserialize)]
pub struct NewTicket {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
}

impl NewTicket {
    fn into_request(self) -> CreateTaskRequest {
        CreateTaskRequest {
            name: format!("Atendimento: {}", self.nome.trim()),
            description: Some(self.descricao),
            status: Some(NEW_TICKET_STATUS.to_string()),
            due_date: None,
        }
    }
}

/// `POST /atendimentos` (admin)
///
/// Cria a tarefa na lista de atendimentos e dispara uma nova busca do painel.
pub async fn create_atendimento(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTicket>,
) -> AppResult<(StatusCode, Json<TaskRow>)> {
    log_request_received("/atendimentos", "POST");

    if body.nome.trim().is_empty() {
        log_validation_error("nome", "obrigatório");
        return Err(AppError::ValidationError("nome é obrigatório".to_string()));
    }

    let stored = state.store.get().await?;
    let list_id = stored.require_list(ListKind::Tickets)?.to_string();
    let manager = state.task_manager().await?;

    let created = manager
        .create_task(&list_id, &body.into_request())
        .await
        .map_err(|e| {
            log_clickup_api_error("create_task", e.status(), &e.to_string());
            AppError::from(e)
        })?;

    state.tickets.retry();

    let row = TaskRow::project(&normalize_task(created), AssigneeProjection::Joined);
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /lists/{id}/statuses`
pub async fn list_statuses(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> AppResult<Json<Vec<Status>>> {
    let manager = state.task_manager().await?;
    Ok(Json(manager.get_list_statuses(&list_id).await?))
}

/// `GET /lists/{id}/fields`
pub async fn list_fields(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> AppResult<Json<Vec<CustomField>>> {
    let manager = state.task_manager().await?;
    Ok(Json(manager.get_list_fields(&list_id).await?))
}

/// `GET /fields/{id}/options`
pub async fn field_options(
    State(state): State<Arc<AppState>>,
    Path(field_id): Path<String>,
) -> AppResult<Json<Vec<FieldOption>>> {
    let manager = state.task_manager().await?;
    Ok(Json(manager.get_custom_field_options(&field_id).await?))
}

/// `GET /lookup-fields`
///
/// Definições de campos da lista de atendimentos somadas às das listas
/// auxiliares configuradas, sem repetir ids.
pub async fn lookup_fields(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CustomField>>> {
    log_request_received("/lookup-fields", "GET");

    let stored = state.store.get().await?;
    let tickets_list = stored.require_list(ListKind::Tickets)?;
    let manager = state.task_manager().await?;

    let mut fields = manager.get_list_fields(tickets_list).await?;

    for kind in [ListKind::ClientesProdutos, ListKind::Produtos] {
        let list_id = stored.list_id_for(kind).trim();
        if list_id.is_empty() {
            continue;
        }
        for field in manager.get_list_fields(list_id).await? {
            if !fields.iter().any(|f| f.id == field.id) {
                fields.push(field);
            }
        }
    }

    Ok(Json(fields))
}
