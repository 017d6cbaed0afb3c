//! Filtros aplicados sobre o snapshot (sem nova chamada à API)

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::normalizer::NormalizedTask;

pub const SCHEDULED_STATUS: &str = "agendado";
pub const DONE_STATUS: &str = "concluído";
const TICKET_PREFIX: &str = "atendimento";

/// Variações da tela de atendimentos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketView {
    /// Nome começa com "atendimento"
    #[default]
    #[serde(alias = "hoje")]
    Today,
    /// Como `Today`, sem os concluídos
    #[serde(alias = "pendentes")]
    Pending,
}

impl TicketView {
    pub fn matches(&self, task: &NormalizedTask) -> bool {
        let is_ticket = task.name.to_lowercase().starts_with(TICKET_PREFIX);
        match self {
            TicketView::Today => is_ticket,
            TicketView::Pending => is_ticket && !has_status(task, DONE_STATUS),
        }
    }
}

impl FromStr for TicketView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "hoje" => Ok(TicketView::Today),
            "pending" | "pendentes" => Ok(TicketView::Pending),
            other => Err(format!("visão desconhecida: '{}'", other)),
        }
    }
}

/// Filtro de status do dropdown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Comparação exata (diferencia maiúsculas)
    Exact(String),
}

impl StatusFilter {
    /// "", "todos" e "all" significam sem filtro
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "todos" | "all" => StatusFilter::All,
            other => StatusFilter::Exact(other.to_string()),
        }
    }

    pub fn matches(&self, task: &NormalizedTask) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Exact(status) => task.status_label() == status,
        }
    }
}

/// Agendamentos: apenas status "agendado"
pub fn is_scheduled(task: &NormalizedTask) -> bool {
    has_status(task, SCHEDULED_STATUS)
}

fn has_status(task: &NormalizedTask, status: &str) -> bool {
    task.status_label().trim().to_lowercase() == status
}

/// Minúsculas e sem acentos ("João" -> "joao")
pub fn fold(text: &str) -> String {
    deunicode(text).to_lowercase()
}

/// Busca textual em todos os valores da tarefa, inclusive campos personalizados
///
/// Termo vazio mantém tudo.
pub fn matches_search(task: &NormalizedTask, term: &str) -> bool {
    let needle = fold(term.trim());
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| fold(text).contains(&needle);

    hit(&task.id)
        || hit(&task.name)
        || task.description.as_deref().is_some_and(hit)
        || hit(task.status_label())
        || task.assignees.iter().any(|a| hit(a))
        || task.priority.as_ref().is_some_and(|p| hit(p.as_str()))
        || (task.start_date.is_some() && hit(&task.start_date_display()))
        || (task.due_date.is_some() && hit(&task.due_date_display()))
        || task
            .custom_fields
            .iter()
            .any(|field| value_matches(&field.value, &hit))
}

fn value_matches(value: &Value, hit: &impl Fn(&str) -> bool) -> bool {
    match value {
        Value::String(s) => hit(s),
        Value::Number(n) => hit(&n.to_string()),
        Value::Bool(b) => hit(&b.to_string()),
        Value::Array(items) => items.iter().any(|item| value_matches(item, hit)),
        Value::Object(map) => map.values().any(|item| value_matches(item, hit)),
        Value::Null => false,
    }
}

/// Status distintos, na ordem em que aparecem
pub fn distinct_statuses(tasks: &[NormalizedTask]) -> Vec<String> {
    let mut statuses: Vec<String> = Vec::new();
    for task in tasks {
        let label = task.status_label();
        if !label.is_empty() && !statuses.iter().any(|s| s == label) {
            statuses.push(label.to_string());
        }
    }
    statuses
}

/// Combinação dos filtros de uma tela
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub view: Option<TicketView>,
    pub scheduled_only: bool,
    pub search: String,
    pub status: StatusFilter,
}

impl TaskQuery {
    pub fn matches(&self, task: &NormalizedTask) -> bool {
        self.view.map_or(true, |v| v.matches(task))
            && (!self.scheduled_only || is_scheduled(task))
            && self.status.matches(task)
            && matches_search(task, &self.search)
    }

    pub fn apply(&self, tasks: &[NormalizedTask]) -> Vec<NormalizedTask> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickup::TaskStatus;
    use serde_json::json;

    fn task(id: &str, name: &str, status: &str) -> NormalizedTask {
        NormalizedTask {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status: Some(TaskStatus::from(status)),
            priority: None,
            assignees: Vec::new(),
            start_date: None,
            due_date: None,
            custom_fields: Vec::new(),
            url: None,
        }
    }

    #[test]
    fn test_today_view_keeps_only_ticket_names() {
        let tasks = vec![
            task("1", "Atendimento Cliente X", "agendado"),
            task("2", "Reunião Interna", "agendado"),
        ];
        let query = TaskQuery {
            view: Some(TicketView::Today),
            ..Default::default()
        };

        let kept = query.apply(&tasks);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_pending_view_drops_done() {
        let done = task("1", "atendimento A", "concluído");
        let open = task("2", "ATENDIMENTO B", "em andamento");

        assert!(TicketView::Today.matches(&done));
        assert!(!TicketView::Pending.matches(&done));
        assert!(TicketView::Pending.matches(&open));
    }

    #[test]
    fn test_search_is_accent_and_case_insensitive() {
        let mut assigned = task("1", "Visita", "agendado");
        assigned.assignees = vec!["joao.silva".to_string()];
        let other = task("2", "Outra", "agendado");

        let query = TaskQuery {
            search: "joão".to_string(),
            ..Default::default()
        };
        let kept = query.apply(&[assigned, other]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_search_descends_into_custom_fields() {
        let mut t = task("1", "Visita", "agendado");
        t.custom_fields.push(crate::services::normalizer::NormalizedField {
            key: "0".to_string(),
            name: Some("Cliente X Produto".to_string()),
            value: json!(["Padaria São Jorge / PDV"]),
        });

        assert!(matches_search(&t, "sao jorge"));
        assert!(!matches_search(&t, "farmácia"));
        assert!(matches_search(&t, ""));
    }

    #[test]
    fn test_status_filter() {
        let t = task("1", "Atendimento", "Em andamento");

        assert_eq!(StatusFilter::parse("todos"), StatusFilter::All);
        assert!(StatusFilter::parse("all").matches(&t));
        assert!(StatusFilter::parse("Em andamento").matches(&t));
        assert!(!StatusFilter::parse("em andamento").matches(&t));
    }

    #[test]
    fn test_distinct_statuses_in_order() {
        let tasks = vec![
            task("1", "a", "agendado"),
            task("2", "b", "concluído"),
            task("3", "c", "agendado"),
        ];
        assert_eq!(distinct_statuses(&tasks), vec!["agendado", "concluído"]);
    }

    #[test]
    fn test_ticket_view_parsing() {
        assert_eq!("hoje".parse::<TicketView>().unwrap(), TicketView::Today);
        assert_eq!("Pending".parse::<TicketView>().unwrap(), TicketView::Pending);
        assert!("ontem".parse::<TicketView>().is_err());
    }
}
