// ============================================================================
// Task Manager - Operações de tarefas do ClickUp usadas pelo painel
// ============================================================================
//
// 1. **Leituras (com novas tentativas, ver retry.rs):**
//    - Tarefas de uma lista (get_tasks_in_list)
//    - Uma tarefa (get_task)
//    - Comentários (get_task_comments)
//    - Definições de campos de uma lista (get_list_fields)
//    - Opções de um campo (get_custom_field_options)
//    - Status de uma lista (get_list_statuses)
//
// 2. **Escritas (uma única tentativa):**
//    - Atualização (update_task)
//    - Novo comentário (add_comment)
//    - Criação (create_task)
//
// IDs vazios (lista, tarefa, campo) retornam ConfigError antes de qualquer
// chamada HTTP e sem consumir tentativas.

use crate::client::ClickUpClient;
use crate::error::{ClickUpError, Result};
use crate::retry::AttemptReport;
use crate::types::{Comment, CreateTaskRequest, CustomField, FieldOption, Status, Task, TaskUpdate};
use serde_json::{json, Value};

/// Gerenciador de tarefas do ClickUp
///
/// # Thread-Safety
///
/// Este struct implementa `Clone` e pode ser compartilhado entre tasks via `Arc<>`.
#[derive(Clone, Debug)]
pub struct TaskManager {
    client: ClickUpClient,
}

impl TaskManager {
    /// Cria uma nova instância a partir de um cliente já configurado
    pub fn new(client: ClickUpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ClickUpClient {
        &self.client
    }

    /// Lista as tarefas de uma lista
    ///
    /// # Endpoint da API
    ///
    /// `GET /api/v2/list/{list_id}/task` (com `subtasks=true&statuses[]=...`
    /// quando `statuses` não está vazio)
    ///
    /// Tarefas que falham na desserialização são ignoradas com warning;
    /// resposta sem campo `tasks` resulta em lista vazia.
    pub async fn get_tasks_in_list(&self, list_id: &str, statuses: &[String]) -> Result<Vec<Task>> {
        self.get_tasks_in_list_observed(list_id, statuses, |_| {})
            .await
    }

    /// Igual a [`get_tasks_in_list`](Self::get_tasks_in_list), notificando
    /// `observer` ao fim de cada tentativa
    pub async fn get_tasks_in_list_observed<O>(
        &self,
        list_id: &str,
        statuses: &[String],
        observer: O,
    ) -> Result<Vec<Task>>
    where
        O: FnMut(&AttemptReport<'_>),
    {
        let id = require_id(list_id, "list_id")?;
        let endpoint = tasks_endpoint(id, statuses);

        let json_resp: Value = self.client.get_json_observed(&endpoint, observer).await?;
        let tasks = tasks_from_response(json_resp);

        tracing::info!("✅ Listadas {} tasks da lista {}", tasks.len(), id);
        Ok(tasks)
    }

    /// Busca uma tarefa pelo ID
    ///
    /// `GET /api/v2/task/{task_id}`
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let id = require_id(task_id, "task_id")?;
        self.client.get_json(&format!("/task/{}", id)).await
    }

    /// Atualiza uma tarefa
    ///
    /// `PUT /api/v2/task/{task_id}` - nunca repetida. Em caso de rejeição o
    /// payload é registrado no log para diagnóstico.
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<Task> {
        let id = require_id(task_id, "task_id")?;
        let endpoint = format!("/task/{}", id);

        tracing::info!("✏️ Atualizando tarefa {}", id);

        match self.client.put_json(&endpoint, update).await {
            Ok(task) => Ok(task),
            Err(e) => {
                tracing::error!(
                    "❌ Erro ao atualizar tarefa {}: {} - payload enviado: {}",
                    id,
                    e,
                    serde_json::to_string(update).unwrap_or_default()
                );
                Err(e)
            }
        }
    }

    /// Lista os comentários de uma tarefa
    ///
    /// `GET /api/v2/task/{task_id}/comment`
    pub async fn get_task_comments(&self, task_id: &str) -> Result<Vec<Comment>> {
        let id = require_id(task_id, "task_id")?;
        let json_resp: Value = self.client.get_json(&format!("/task/{}/comment", id)).await?;

        match json_resp.get("comments") {
            Some(comments) => Ok(serde_json::from_value(comments.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Adiciona um comentário (notificando todos)
    ///
    /// `POST /api/v2/task/{task_id}/comment` - nunca repetida
    pub async fn add_comment(&self, task_id: &str, comment_text: &str) -> Result<Value> {
        let id = require_id(task_id, "task_id")?;
        if comment_text.trim().is_empty() {
            return Err(ClickUpError::ValidationError(
                "comentário vazio".to_string(),
            ));
        }

        let body = json!({
            "comment_text": comment_text,
            "notify_all": true
        });

        let created: Value = self
            .client
            .post_json(&format!("/task/{}/comment", id), &body)
            .await?;

        tracing::info!("💬 Comentário adicionado à tarefa {}", id);
        Ok(created)
    }

    /// Definições dos campos personalizados de uma lista
    ///
    /// `GET /api/v2/list/{list_id}/field`
    pub async fn get_list_fields(&self, list_id: &str) -> Result<Vec<CustomField>> {
        let id = require_id(list_id, "list_id")?;
        let json_resp: Value = self.client.get_json(&format!("/list/{}/field", id)).await?;

        match json_resp.get("fields") {
            Some(fields) => Ok(serde_json::from_value(fields.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Opções de um campo personalizado (dropdown/labels)
    ///
    /// `GET /api/v2/custom_field/{field_id}` → `type_config.options`
    pub async fn get_custom_field_options(&self, field_id: &str) -> Result<Vec<FieldOption>> {
        let id = require_id(field_id, "field_id")?;
        let json_resp: Value = self.client.get_json(&format!("/custom_field/{}", id)).await?;

        match json_resp.pointer("/type_config/options") {
            Some(options) => Ok(serde_json::from_value(options.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Status configurados em uma lista
    ///
    /// `GET /api/v2/list/{list_id}` → `statuses`
    pub async fn get_list_statuses(&self, list_id: &str) -> Result<Vec<Status>> {
        let id = require_id(list_id, "list_id")?;
        let json_resp: Value = self.client.get_json(&format!("/list/{}", id)).await?;

        match json_resp.get("statuses") {
            Some(statuses) => Ok(serde_json::from_value(statuses.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Cria uma tarefa na lista
    ///
    /// `POST /api/v2/list/{list_id}/task` - nunca repetida
    pub async fn create_task(&self, list_id: &str, request: &CreateTaskRequest) -> Result<Task> {
        let id = require_id(list_id, "list_id")?;
        let created: Task = self
            .client
            .post_json(&format!("/list/{}/task", id), request)
            .await?;

        tracing::info!("✅ Task criada: {} - {}", created.id, created.name);
        Ok(created)
    }
}

fn require_id<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClickUpError::ConfigError(format!("{} não configurado", what)));
    }
    Ok(trimmed)
}

fn tasks_endpoint(list_id: &str, statuses: &[String]) -> String {
    let mut endpoint = format!("/list/{}/task", list_id);
    if !statuses.is_empty() {
        endpoint.push_str("?subtasks=true");
        for status in statuses {
            endpoint.push_str("&statuses[]=");
            endpoint.push_str(&urlencoding::encode(status));
        }
    }
    endpoint
}

/// Extrai o array `tasks`, ignorando itens malformados
fn tasks_from_response(json_resp: Value) -> Vec<Task> {
    let Some(tasks_array) = json_resp.get("tasks").and_then(|v| v.as_array()) else {
        tracing::warn!("⚠️ Resposta da API sem campo 'tasks'");
        return Vec::new();
    };

    tasks_array
        .iter()
        .filter_map(|task_value| match serde_json::from_value::<Task>(task_value.clone()) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!("⚠️ Falha ao desserializar task: {}", e);
                None
            }
        })
        .collect()
}
