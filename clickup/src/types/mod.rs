//! Tipos do ClickUp API
//!
//! Estruturas type-safe para os payloads consumidos pelo painel:
//!
//! - **Task**: tarefa como devolvida por `GET /list/{id}/task` e `GET /task/{id}`
//! - **TaskStatus**: status como texto simples OU objeto `{status, color}`
//! - **Priority**: níveis de prioridade (1-4)
//! - **User**: responsáveis (assignees) e autores de comentários
//! - **CustomField**: campos personalizados e suas definições
//! - **Comment**: comentários de uma tarefa
//!
//! ## ⚠️ Notas Importantes
//!
//! - **Timestamps**: sempre em milissegundos, às vezes entregues como string
//!   numérica ("1700000000000"). Ver [`epoch_millis`].
//! - **Priority**: valores limitados a 1-4
//! - **Status**: não são globais, cada lista tem seus próprios status

pub mod comment;
pub mod custom_field;
pub mod priority;
pub mod status;
pub mod task;
pub mod user;

pub use comment::Comment;
pub use custom_field::{CustomField, CustomFieldUpdate, FieldOption, TypeConfig};
pub use priority::Priority;
pub use status::{Status, TaskStatus};
pub use task::{CreateTaskRequest, ListRef, Task, TaskUpdate};
pub use user::User;

/// Desserialização tolerante de timestamps em milissegundos
///
/// Aceita número, string numérica ou null. Strings não numéricas viram `None`
/// (com warning) em vez de falhar a tarefa inteira.
pub mod epoch_millis {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(parse))
    }

    /// Converte um valor JSON em timestamp (ms)
    pub fn parse(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<i64>() {
                    Ok(ms) => Some(ms),
                    Err(_) => {
                        tracing::warn!("⚠️ Timestamp inválido ignorado: '{}'", s);
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

/// IDs que a API entrega ora como string, ora como número
pub(crate) mod string_or_number {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(serde::de::Error::custom(format!(
                "id inesperado: {}",
                other
            ))),
        }
    }
}
