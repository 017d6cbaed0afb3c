//! Configurações do ClickUp editadas pelo administrador
//!
//! Registro único com a credencial da API e um ID por lista lógica.

use chrono::{DateTime, Utc};
use clickup::ClickUpError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickUpSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Personal token (`pk_...`)
    #[serde(default)]
    pub api_key: String,

    /// Lista de atendimentos
    #[serde(default)]
    pub list_id: String,

    #[serde(default)]
    pub list_id_schedules: String,

    #[serde(default)]
    pub list_id_requests: String,

    /// Lista auxiliar "Cliente X Produto"
    #[serde(default)]
    pub list_id_clientes_produtos: String,

    /// Lista auxiliar "Produto"
    #[serde(default)]
    pub list_id_produtos: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Listas lógicas configuráveis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Tickets,
    Schedules,
    Requests,
    ClientesProdutos,
    Produtos,
}

impl ListKind {
    /// Nome do campo correspondente em [`ClickUpSettings`]
    pub fn settings_key(&self) -> &'static str {
        match self {
            ListKind::Tickets => "list_id",
            ListKind::Schedules => "list_id_schedules",
            ListKind::Requests => "list_id_requests",
            ListKind::ClientesProdutos => "list_id_clientes_produtos",
            ListKind::Produtos => "list_id_produtos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Tickets => "atendimentos",
            ListKind::Schedules => "agendamentos",
            ListKind::Requests => "solicitações",
            ListKind::ClientesProdutos => "clientes x produtos",
            ListKind::Produtos => "produtos",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ClickUpSettings {
    pub fn list_id_for(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::Tickets => &self.list_id,
            ListKind::Schedules => &self.list_id_schedules,
            ListKind::Requests => &self.list_id_requests,
            ListKind::ClientesProdutos => &self.list_id_clientes_produtos,
            ListKind::Produtos => &self.list_id_produtos,
        }
    }

    /// ID da lista, ou `ConfigError` se estiver vazio
    pub fn require_list(&self, kind: ListKind) -> clickup::Result<&str> {
        let id = self.list_id_for(kind).trim();
        if id.is_empty() {
            return Err(ClickUpError::ConfigError(format!(
                "{} não configurado ({})",
                kind.settings_key(),
                kind
            )));
        }
        Ok(id)
    }

    pub fn require_api_key(&self) -> clickup::Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(ClickUpError::ConfigError("api_key não configurada".to_string()));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_list_reports_missing_key() {
        let settings = ClickUpSettings {
            api_key: "pk_1".to_string(),
            list_id: "901".to_string(),
            ..Default::default()
        };

        assert_eq!(settings.require_list(ListKind::Tickets).unwrap(), "901");
        match settings.require_list(ListKind::Requests) {
            Err(ClickUpError::ConfigError(msg)) => assert!(msg.contains("list_id_requests")),
            other => panic!("esperado ConfigError, obtido {:?}", other),
        }
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let settings = ClickUpSettings {
            api_key: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.require_api_key().is_err());
    }

    #[test]
    fn test_partial_yaml_record() {
        let settings: ClickUpSettings =
            serde_yaml::from_str("api_key: pk_1\nlist_id: '901'\n").unwrap();
        assert_eq!(settings.list_id, "901");
        assert!(settings.list_id_produtos.is_empty());
        assert!(settings.updated_at.is_none());
    }
}
