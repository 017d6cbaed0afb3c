//! Normalização das tarefas do ClickUp para o formato exibido no painel
//!
//! - Status: resolvido uma vez em [`TaskStatus`] (texto ou objeto)
//! - Campos "Cliente X Produto" e "Produto": chaves "0" e "1", valor reduzido
//!   à lista de nomes dos itens relacionados
//! - Demais campos: mantidos sob o próprio id, valor intacto
//! - Datas: epoch em ms (`Option<i64>`), exibidas como dd/mm/yyyy HH:MM (UTC)

use chrono::{TimeZone, Utc};
use clickup::{CustomField, Priority, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nome do campo de relacionamento com clientes/produtos
pub const CLIENTES_PRODUTOS_FIELD: &str = "Cliente X Produto";
pub const PRODUTOS_FIELD: &str = "Produto";

pub const CLIENTES_PRODUTOS_KEY: &str = "0";
pub const PRODUTOS_KEY: &str = "1";

pub const NO_DATE: &str = "Não informada";
pub const INVALID_DATE: &str = "Data inválida";
pub const NO_DESCRIPTION: &str = "Sem descrição";

/// Campo personalizado já normalizado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    /// "0", "1" ou o id original do campo
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl NormalizedField {
    /// Título da coluna na tabela
    pub fn title(&self) -> String {
        field_title(&self.key, self.name.as_deref())
    }
}

/// Tarefa no formato interno do painel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTask {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Usernames dos responsáveis, na ordem recebida
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub custom_fields: Vec<NormalizedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NormalizedTask {
    pub fn status_label(&self) -> &str {
        self.status.as_ref().map(|s| s.label()).unwrap_or_default()
    }

    pub fn assignee_usernames(&self) -> &[String] {
        &self.assignees
    }

    /// Responsáveis separados por ", "
    pub fn assignees_joined(&self) -> String {
        self.assignees.join(", ")
    }

    pub fn description_or_placeholder(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => NO_DESCRIPTION,
        }
    }

    pub fn start_date_display(&self) -> String {
        format_date(self.start_date)
    }

    pub fn due_date_display(&self) -> String {
        format_date(self.due_date)
    }

    pub fn field(&self, key: &str) -> Option<&NormalizedField> {
        self.custom_fields.iter().find(|f| f.key == key)
    }
}

pub fn normalize_tasks(tasks: Vec<Task>) -> Vec<NormalizedTask> {
    tasks.into_iter().map(normalize_task).collect()
}

pub fn normalize_task(task: Task) -> NormalizedTask {
    let assignees = task
        .assignees
        .iter()
        .filter_map(|user| user.username())
        .map(str::to_string)
        .collect();

    NormalizedTask {
        id: task.id,
        name: task.name,
        description: task.description,
        status: task.status,
        priority: task.priority,
        assignees,
        start_date: task.start_date,
        due_date: task.due_date,
        custom_fields: task.custom_fields.into_iter().map(normalize_field).collect(),
        url: task.url,
    }
}

pub fn normalize_field(field: CustomField) -> NormalizedField {
    let special_key = match field.name.as_deref() {
        Some(CLIENTES_PRODUTOS_FIELD) => Some(CLIENTES_PRODUTOS_KEY),
        Some(PRODUTOS_FIELD) => Some(PRODUTOS_KEY),
        _ => None,
    };

    match special_key {
        Some(key) => NormalizedField {
            key: key.to_string(),
            name: field.name,
            value: item_names(field.value.as_ref()),
        },
        None => NormalizedField {
            key: field.id,
            name: field.name,
            value: field.value.unwrap_or(Value::Null),
        },
    }
}

/// Reduz um array de itens relacionados ao array dos seus `name`s
///
/// Valor que não é array resulta em array vazio.
fn item_names(value: Option<&Value>) -> Value {
    let names = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(Value::as_str))
                .map(|name| Value::String(name.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Value::Array(names)
}

/// Formata epoch em ms como dd/mm/yyyy HH:MM (UTC)
pub fn format_date(ms: Option<i64>) -> String {
    let Some(ms) = ms else {
        return NO_DATE.to_string();
    };

    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Título de coluna para a chave de um campo normalizado
pub fn field_title(key: &str, name: Option<&str>) -> String {
    match key {
        CLIENTES_PRODUTOS_KEY => "Clientes X Produtos".to_string(),
        PRODUTOS_KEY => "Produtos".to_string(),
        _ => name.unwrap_or(key).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_from(value: Value) -> NormalizedTask {
        normalize_task(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_produto_field_reduced_to_names() {
        let task = task_from(json!({
            "id": "t1",
            "custom_fields": [
                {"id": "f-prod", "name": "Produto", "value": [{"name": "A"}, {"name": "B"}]}
            ]
        }));

        let field = task.field(PRODUTOS_KEY).unwrap();
        assert_eq!(field.value, json!(["A", "B"]));
        assert_eq!(field.title(), "Produtos");
        assert!(task.field("f-prod").is_none());
    }

    #[test]
    fn test_field_order_and_other_fields_preserved() {
        let task = task_from(json!({
            "id": "t1",
            "custom_fields": [
                {"id": "f-obs", "name": "Observação", "value": "ligar antes"},
                {"id": "f-cp", "name": "Cliente X Produto", "value": [{"id": "x", "name": "Cliente A / Sistema"}]},
                {"id": "f-prod", "name": "Produto", "value": "não é array"}
            ]
        }));

        let keys: Vec<&str> = task.custom_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["f-obs", "0", "1"]);
        assert_eq!(task.custom_fields[0].value, json!("ligar antes"));
        assert_eq!(task.custom_fields[1].value, json!(["Cliente A / Sistema"]));
        assert_eq!(task.custom_fields[2].value, json!([]));
        assert_eq!(task.custom_fields[1].title(), "Clientes X Produtos");
        assert_eq!(task.custom_fields[0].title(), "Observação");
    }

    #[test]
    fn test_dates_from_numeric_string_and_null() {
        let task = task_from(json!({
            "id": "t1",
            "due_date": "1700000000000",
            "start_date": null
        }));

        assert_eq!(task.due_date, Some(1_700_000_000_000));
        assert_eq!(task.due_date_display(), "14/11/2023 22:13");
        assert_eq!(task.start_date_display(), NO_DATE);
    }

    #[test]
    fn test_out_of_range_date_is_invalid() {
        assert_eq!(format_date(Some(i64::MAX)), INVALID_DATE);
    }

    #[test]
    fn test_status_both_shapes() {
        let plain = task_from(json!({"id": "t1", "status": "agendado"}));
        let detailed = task_from(json!({"id": "t2", "status": {"status": "agendado", "color": "#f00"}}));

        assert_eq!(plain.status_label(), "agendado");
        assert_eq!(detailed.status_label(), "agendado");
        assert_eq!(detailed.status.as_ref().and_then(|s| s.color()), Some("#f00"));
    }

    #[test]
    fn test_assignee_projections() {
        let task = task_from(json!({
            "id": "t1",
            "assignees": [{"id": 1, "username": "joao.silva"}, {"id": 2}, {"id": 3, "username": "maria"}]
        }));

        assert_eq!(task.assignee_usernames(), &["joao.silva".to_string(), "maria".to_string()]);
        assert_eq!(task.assignees_joined(), "joao.silva, maria");
    }

    #[test]
    fn test_description_placeholder() {
        let task = task_from(json!({"id": "t1", "description": "  "}));
        assert_eq!(task.description_or_placeholder(), NO_DESCRIPTION);
    }
}
