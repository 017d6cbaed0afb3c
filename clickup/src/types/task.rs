//! Task types do ClickUp
//!
//! [`Task`] é a tarefa como devolvida pela API. Campos ausentes ou malformados
//! degradam para `None`/vazio em vez de invalidar a tarefa inteira.
//! [`TaskUpdate`] e [`CreateTaskRequest`] são os corpos enviados em
//! `PUT /task/{id}` e `POST /list/{id}/task`.

use serde::{Deserialize, Serialize, Serializer};

use super::{CustomField, CustomFieldUpdate, Priority, TaskStatus, User};

/// Representa uma tarefa do ClickUp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    // ==================== IDENTIFICAÇÃO ====================
    /// ID da tarefa
    pub id: String,

    /// Nome/título da tarefa
    #[serde(default)]
    pub name: String,

    /// Descrição da tarefa (texto rico)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // ==================== STATUS & PRIORIDADE ====================
    /// Status (texto ou objeto, ver [`TaskStatus`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// Prioridade (1=Urgente, 2=Alta, 3=Normal, 4=Baixa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    // ==================== RESPONSÁVEIS ====================
    #[serde(default)]
    pub assignees: Vec<User>,

    // ==================== DATAS ====================
    /// Data de início (timestamp em milissegundos)
    #[serde(
        default,
        deserialize_with = "super::epoch_millis::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<i64>,

    /// Data de entrega (timestamp em milissegundos)
    #[serde(
        default,
        deserialize_with = "super::epoch_millis::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<i64>,

    #[serde(
        default,
        deserialize_with = "super::epoch_millis::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_created: Option<i64>,

    #[serde(
        default,
        deserialize_with = "super::epoch_millis::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_updated: Option<i64>,

    // ==================== CAMPOS PERSONALIZADOS ====================
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,

    // ==================== OUTROS ====================
    /// URL da tarefa no ClickUp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Lista à qual a tarefa pertence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListRef>,
}

impl Task {
    /// Cria uma tarefa com campos mínimos (útil em testes e fakes)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: None,
            priority: None,
            assignees: Vec::new(),
            start_date: None,
            due_date: None,
            date_created: None,
            date_updated: None,
            custom_fields: Vec::new(),
            url: None,
            list: None,
        }
    }

    /// Nome do status ou string vazia
    pub fn status_label(&self) -> &str {
        self.status.as_ref().map(|s| s.label()).unwrap_or_default()
    }
}

/// Referência resumida à lista de uma tarefa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    #[serde(deserialize_with = "super::string_or_number::deserialize")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Corpo de `PUT /task/{id}`
///
/// Apenas os campos presentes são enviados. `status` é aceito como texto ou
/// objeto `{status}` e sempre enviado como texto; `priority` como número (1-4).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "status_as_label"
    )]
    pub status: Option<TaskStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldUpdate>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self == &TaskUpdate::default()
    }
}

fn status_as_label<S>(status: &Option<TaskStatus>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(status) => serializer.serialize_str(status.label()),
        None => serializer.serialize_none(),
    }
}

/// Corpo de `POST /list/{id}/task`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
}
