//! Custom Fields do ClickUp
//!
//! O mesmo formato serve para o campo anexado a uma tarefa (com `value`) e para
//! a definição devolvida por `GET /list/{id}/field` (sem `value`).
//!
//! O valor é mantido como JSON bruto: dependendo do tipo ele é escalar,
//! objeto ou array (relacionamentos e labels vêm como array de objetos).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Representa um custom field do ClickUp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// ID do custom field (UUID)
    pub id: String,

    /// Nome do campo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tipo do campo (drop_down, labels, list_relationship, text...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Configuração específica do tipo de campo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_config: Option<TypeConfig>,

    /// Valor do campo (ausente em definições e em campos não preenchidos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
}

impl CustomField {
    /// Opções configuradas (dropdown/labels); vazio para os demais tipos
    pub fn options(&self) -> &[FieldOption] {
        self.type_config
            .as_ref()
            .and_then(|tc| tc.options.as_deref())
            .unwrap_or(&[])
    }
}

/// Configuração específica de cada tipo de campo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Para dropdown/labels: opções disponíveis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,

    /// Placeholder text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Opção de dropdown/labels
///
/// Dropdowns usam `name`; labels usam `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Cor da opção (hex color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderindex: Option<JsonValue>,
}

impl FieldOption {
    /// Texto exibível da opção
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_default()
    }
}

/// Par `{id, value}` enviado em atualizações de tarefa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldUpdate {
    pub id: String,
    #[serde(default)]
    pub value: JsonValue,
}
