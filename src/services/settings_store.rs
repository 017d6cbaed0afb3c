//! Persistência do registro único de configurações do ClickUp
//!
//! - [`YamlSettingsStore`]: arquivo YAML (ausente = registro vazio)
//! - [`MemorySettingsStore`]: em memória, para testes e execução local

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::ClickUpSettings;
use crate::utils::{AppError, AppResult};

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> AppResult<ClickUpSettings>;

    /// Grava o registro e devolve a versão persistida
    async fn put(&self, settings: ClickUpSettings) -> AppResult<ClickUpSettings>;
}

/// Carimba metadados: `id`/`created_at` na primeira gravação, `updated_at` sempre
fn stamp(previous: &ClickUpSettings, mut incoming: ClickUpSettings) -> ClickUpSettings {
    let now = Utc::now();
    incoming.id = previous
        .id
        .clone()
        .or(incoming.id)
        .or_else(|| Some(Uuid::new_v4().to_string()));
    incoming.created_at = previous.created_at.or(incoming.created_at).or(Some(now));
    incoming.updated_at = Some(now);
    incoming
}

pub struct YamlSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> AppResult<ClickUpSettings> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Arquivo de configurações ausente: {}", self.path.display());
                return Ok(ClickUpSettings::default());
            }
            Err(e) => {
                return Err(AppError::StoreError(format!(
                    "falha ao ler {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(ClickUpSettings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            AppError::StoreError(format!("YAML inválido em {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl SettingsStore for YamlSettingsStore {
    async fn get(&self) -> AppResult<ClickUpSettings> {
        self.read().await
    }

    async fn put(&self, settings: ClickUpSettings) -> AppResult<ClickUpSettings> {
        let _guard = self.write_lock.lock().await;

        let previous = self.read().await?;
        let stored = stamp(&previous, settings);

        let yaml = serde_yaml::to_string(&stored)
            .map_err(|e| AppError::StoreError(format!("falha ao serializar: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::StoreError(format!("falha ao criar {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&self.path, yaml).await.map_err(|e| {
            AppError::StoreError(format!("falha ao gravar {}: {}", self.path.display(), e))
        })?;

        tracing::info!("💾 Configurações do ClickUp salvas em {}", self.path.display());
        Ok(stored)
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    inner: RwLock<ClickUpSettings>,
}

impl MemorySettingsStore {
    pub fn new(settings: ClickUpSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> AppResult<ClickUpSettings> {
        Ok(self.inner.read().await.clone())
    }

    async fn put(&self, settings: ClickUpSettings) -> AppResult<ClickUpSettings> {
        let mut inner = self.inner.write().await;
        let stored = stamp(&inner, settings);
        *inner = stored.clone();
        Ok(stored)
    }
}
