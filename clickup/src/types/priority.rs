//! Priority levels para tarefas do ClickUp
//!
//! A API do ClickUp aceita valores de 1 a 4:
//! - 1 = Urgente
//! - 2 = Alta
//! - 3 = Normal (padrão)
//! - 4 = Baixa
//!
//! Nas respostas a prioridade vem como objeto
//! (`{"id": "2", "priority": "high", "color": "#ffcc00"}`) ou null; nos
//! formulários do painel ela chega como texto ("alta") ou número.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Representa os níveis de prioridade do ClickUp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Prioridade urgente (valor 1)
    Urgent = 1,
    /// Prioridade alta (valor 2)
    High = 2,
    /// Prioridade normal (valor 3) - padrão
    #[default]
    Normal = 3,
    /// Prioridade baixa (valor 4)
    Low = 4,
}

impl Priority {
    /// Converte para o valor inteiro usado pela API
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Cria a partir de um valor inteiro
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Priority::Urgent),
            2 => Some(Priority::High),
            3 => Some(Priority::Normal),
            4 => Some(Priority::Low),
            _ => None,
        }
    }

    /// Interpreta um rótulo em português ou inglês (sem diferenciar maiúsculas)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "urgente" | "urgent" => Some(Priority::Urgent),
            "alta" | "high" => Some(Priority::High),
            "normal" => Some(Priority::Normal),
            "baixa" | "low" => Some(Priority::Low),
            other => other.parse::<i32>().ok().and_then(Self::from_i32),
        }
    }

    /// Interpreta qualquer formato aceito (número, texto, objeto)
    ///
    /// Retorna `None` apenas para null. Valores não reconhecidos viram
    /// [`Priority::Normal`].
    pub fn from_value(value: &Value) -> Option<Self> {
        let parsed = match value {
            Value::Null => return None,
            Value::Number(n) => n.as_i64().and_then(|v| Self::from_i32(v as i32)),
            Value::String(s) => Self::from_label(s),
            Value::Object(map) => map
                .get("priority")
                .and_then(|p| p.as_str())
                .and_then(Self::from_label)
                .or_else(|| {
                    map.get("id")
                        .and_then(|id| id.as_str())
                        .and_then(Self::from_label)
                }),
            _ => None,
        };
        Some(parsed.unwrap_or_default())
    }

    /// Retorna o nome legível da prioridade
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgente",
            Priority::High => "Alta",
            Priority::Normal => "Normal",
            Priority::Low => "Baixa",
        }
    }
}

// Serializa no formato numérico esperado pela API
impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

// Deserializer customizado que aceita número, texto e objeto
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value).unwrap_or_default())
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
