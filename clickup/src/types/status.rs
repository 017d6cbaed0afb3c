//! Status de tarefas do ClickUp
//!
//! Status são configurados por list no ClickUp. Exemplos usados pelo painel:
//! - "fazer"
//! - "agendado"
//! - "em andamento"
//! - "concluído"
//!
//! Dependendo do endpoint (ou de quem montou o payload), o status de uma
//! tarefa chega como texto simples ou como objeto `{status, color}`.
//! [`TaskStatus`] resolve essa ambiguidade uma única vez, preservando o
//! formato recebido na serialização.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status completo (objeto) como devolvido pela API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// ID do status (opcional em algumas operações)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Nome do status (e.g., "agendado", "concluído")
    pub status: String,

    /// Cor do status (hex color, e.g., "#FF0000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Tipo do status (open, closed, custom)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Ordem do status na lista
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderindex: Option<Value>,
}

impl Status {
    /// Cria um novo status com apenas o nome
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            id: None,
            status: status.into(),
            color: None,
            type_: None,
            orderindex: None,
        }
    }

    /// Cria um status com nome e cor
    pub fn with_color(status: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::new(status)
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)
    }
}

/// Status de uma tarefa: texto simples ou objeto completo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskStatus {
    Label(String),
    Detailed(Status),
}

impl TaskStatus {
    /// Nome do status, qualquer que seja o formato recebido
    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Label(label) => label,
            TaskStatus::Detailed(status) => &status.status,
        }
    }

    /// Cor, disponível apenas no formato objeto
    pub fn color(&self) -> Option<&str> {
        match self {
            TaskStatus::Label(_) => None,
            TaskStatus::Detailed(status) => status.color.as_deref(),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(label: &str) -> Self {
        TaskStatus::Label(label.to_string())
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
