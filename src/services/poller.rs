//! Busca periódica de uma lista
//!
//! `start` busca imediatamente e depois a cada intervalo (30s por padrão).
//! Cada busca roda em sua própria task: buscas sobrepostas (timer + retry
//! manual) são possíveis e a última a gravar vence. `stop` cancela o timer e
//! desconecta o snapshot, então buscas ainda em andamento não gravam nada.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::fetchers::TaskSource;
use super::snapshot_cache::SnapshotCache;
use crate::utils::logging::log_poll_result;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

struct PollerState {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// Painel de uma lista: fonte + snapshot + timer
pub struct ListPanel {
    source: Arc<dyn TaskSource>,
    cache: Arc<SnapshotCache>,
    interval: Duration,
    poller: Mutex<Option<PollerState>>,
}

impl ListPanel {
    pub fn new(source: Arc<dyn TaskSource>, interval: Duration) -> Self {
        Self {
            source,
            cache: Arc::new(SnapshotCache::new()),
            interval,
            poller: Mutex::new(None),
        }
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    fn poller(&self) -> MutexGuard<'_, Option<PollerState>> {
        self.poller.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_running(&self) -> bool {
        self.poller().is_some()
    }

    /// Inicia a busca periódica; chamadas repetidas não têm efeito
    ///
    /// Devolve `false` se já estava em execução.
    pub fn start(&self) -> bool {
        let mut guard = self.poller();
        if guard.is_some() {
            return false;
        }

        self.cache.attach();

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let period = self.interval;

        let task = tokio::spawn(async move {
            // o primeiro tick é imediato
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        spawn_fetch(Arc::clone(&source), Arc::clone(&cache));
                    }
                }
            }
        });

        tracing::info!("⏱️ Busca periódica iniciada: {} (a cada {:?})", self.name(), period);

        *guard = Some(PollerState {
            stop_tx: Some(stop_tx),
            task,
        });
        true
    }

    /// Para o timer; nenhuma nova busca é agendada depois do retorno
    pub async fn stop(&self) {
        let state = self.poller().take();

        if let Some(mut state) = state {
            self.cache.detach();
            if let Some(stop_tx) = state.stop_tx.take() {
                let _ = stop_tx.send(());
            }
            if let Err(e) = state.task.await {
                tracing::warn!("⚠️ Falha ao encerrar busca periódica de {}: {}", self.name(), e);
            }
            tracing::info!("⏹️ Busca periódica encerrada: {}", self.name());
        }
    }

    /// Busca imediata, independente do timer
    pub fn retry(&self) -> JoinHandle<()> {
        tracing::info!("🔁 Nova busca solicitada: {}", self.name());
        spawn_fetch(Arc::clone(&self.source), Arc::clone(&self.cache))
    }
}

fn spawn_fetch(source: Arc<dyn TaskSource>, cache: Arc<SnapshotCache>) -> JoinHandle<()> {
    tokio::spawn(async move { run_fetch(source.as_ref(), &cache).await })
}

/// Uma busca completa: loading → resultado ou erro
pub async fn run_fetch(source: &dyn TaskSource, cache: &SnapshotCache) {
    cache.begin_fetch();
    match source.fetch().await {
        Ok(tasks) => {
            let count = tasks.len();
            let changed = cache.apply(tasks);
            log_poll_result(source.name(), count, changed);
        }
        Err(e) => {
            tracing::error!("❌ Falha ao buscar {}: {}", source.name(), e);
            cache.fail(e.to_string());
        }
    }
}
