use clickup::{ClickUpClient, RetryPolicy};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::services::roles::Role;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub clickup: ClickUpApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Parâmetros de conexão com a API do ClickUp
///
/// O token e os IDs de lista NÃO ficam aqui: são editados pelo administrador
/// e persistidos pelo `SettingsStore`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClickUpApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for ClickUpApiSettings {
    fn default() -> Self {
        Self {
            base_url: clickup::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
            retry_attempts: clickup::retry::DEFAULT_MAX_ATTEMPTS,
            retry_base_delay_ms: clickup::retry::DEFAULT_BASE_DELAY.as_millis() as u64,
        }
    }
}

impl ClickUpApiSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }

    /// Monta um cliente para o token informado
    ///
    /// Token vazio resulta em `ClickUpError::ConfigError`.
    pub fn build_client(&self, api_key: &str) -> clickup::Result<ClickUpClient> {
        Ok(
            ClickUpClient::with_timeouts(api_key, self.timeout_secs, self.connect_timeout_secs)?
                .with_base_url(&self.base_url)
                .with_retry_policy(self.retry_policy()),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
    pub interval_secs: u64,
    /// Inicia a busca periódica das três listas na subida do servidor
    pub autostart: bool,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            autostart: true,
        }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreSettings {
    /// Arquivo YAML com as configurações do ClickUp
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: "data/clickup_settings.yaml".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorSettings {
    pub capacity: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuthSettings {
    /// user_id -> papel
    #[serde(default)]
    pub roles: HashMap<String, Role>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        // ATENDIMENTOS__POLLING__INTERVAL_SECS=10 -> polling.interval_secs
        builder = builder.add_source(
            Environment::with_prefix("ATENDIMENTOS")
                .separator("__")
                .try_parsing(true),
        );

        let s = builder.build()?;

        s.try_deserialize()
    }
}
