//! Snapshot por lista com detecção de mudanças
//!
//! A cada busca a coleção normalizada (antes de qualquer filtro) é serializada
//! e comparada byte a byte com a anterior. Só há troca de snapshot e
//! notificação quando o conteúdo muda.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use super::normalizer::NormalizedTask;

/// Estado exibido por um painel de lista
///
/// Começa em `loading` até a primeira busca terminar.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub tasks: Arc<Vec<NormalizedTask>>,
    pub loading: bool,
    pub error: Option<String>,
    /// Momento da última troca de snapshot
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            tasks: Arc::default(),
            loading: true,
            error: None,
            updated_at: None,
        }
    }
}

#[derive(Default)]
struct Inner {
    state: PanelState,
    serialized: Option<Vec<u8>>,
}

pub struct SnapshotCache {
    inner: RwLock<Inner>,
    version: watch::Sender<u64>,
    detached: AtomicBool,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: RwLock::new(Inner::default()),
            version,
            detached: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> PanelState {
        self.read().state.clone()
    }

    /// Recebe o número da versão a cada troca de snapshot
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// A partir daqui todas as escritas são ignoradas
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn attach(&self) {
        self.detached.store(false, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    pub fn begin_fetch(&self) {
        if self.is_detached() {
            return;
        }
        self.write().state.loading = true;
    }

    /// Aplica o resultado de uma busca; devolve `true` se o snapshot mudou
    pub fn apply(&self, tasks: Vec<NormalizedTask>) -> bool {
        if self.is_detached() {
            tracing::debug!("Resultado descartado: snapshot desconectado");
            return false;
        }

        let serialized = match serde_json::to_vec(&tasks) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("⚠️ Falha ao serializar snapshot: {}", e);
                None
            }
        };

        let mut inner = self.write();
        inner.state.loading = false;
        inner.state.error = None;

        if serialized.is_some() && serialized == inner.serialized {
            return false;
        }

        inner.serialized = serialized;
        inner.state.tasks = Arc::new(tasks);
        inner.state.updated_at = Some(Utc::now());
        drop(inner);

        self.version.send_modify(|v| *v += 1);
        true
    }

    /// Registra a falha sem tocar no snapshot
    pub fn fail(&self, message: impl Into<String>) {
        if self.is_detached() {
            return;
        }
        let mut inner = self.write();
        inner.state.loading = false;
        inner.state.error = Some(message.into());
    }
}
