//! Usuários do ClickUp (responsáveis e autores de comentários)

use serde::{Deserialize, Serialize};

/// Representa um usuário do ClickUp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// ID do usuário
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Nome de usuário
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Email do usuário
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Cor associada ao usuário (hex color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Iniciais do usuário
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
}

impl User {
    /// Cria um usuário com ID e username
    pub fn with_username(id: u64, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: Some(username.into()),
            email: None,
            color: None,
            initials: None,
        }
    }

    /// Username não vazio, se houver
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}
