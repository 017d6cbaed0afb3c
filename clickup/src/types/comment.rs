//! Comentários de tarefas (`GET/POST /task/{id}/comment`)

use serde::{Deserialize, Serialize};

use super::User;

/// Comentário de uma tarefa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "super::string_or_number::deserialize")]
    pub id: String,

    /// Texto plano do comentário
    #[serde(default)]
    pub comment_text: String,

    /// Autor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Data do comentário (timestamp em milissegundos)
    #[serde(
        default,
        deserialize_with = "super::epoch_millis::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

impl Comment {
    /// Username do autor ou "-"
    pub fn author(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.username())
            .unwrap_or("-")
    }
}
