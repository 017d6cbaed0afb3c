// Biblioteca do painel de atendimentos
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use clickup::TaskManager;
use std::sync::Arc;

use services::{
    ApiMonitor, ListFetcher, ListPanel, RoleProvider, SettingsStore, StaticRoleProvider,
};
use utils::AppResult;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: Arc<dyn SettingsStore>,
    pub roles: Arc<dyn RoleProvider>,
    pub monitor: Arc<ApiMonitor>,
    pub tickets: Arc<ListPanel>,
    pub schedules: Arc<ListPanel>,
    pub requests: Arc<ListPanel>,
}

impl AppState {
    /// Monta os três painéis sobre o mesmo armazenamento de configurações
    pub fn new(
        settings: config::Settings,
        store: Arc<dyn SettingsStore>,
        roles: Arc<dyn RoleProvider>,
    ) -> Self {
        let monitor = Arc::new(ApiMonitor::new(settings.monitor.capacity));
        let interval = settings.polling.interval();
        let api = settings.clickup.clone();

        let tickets = ListFetcher::tickets(store.clone(), api.clone(), monitor.clone());
        let schedules = ListFetcher::schedules(store.clone(), api.clone());
        let requests = ListFetcher::requests(store.clone(), api);

        Self {
            settings,
            store,
            roles,
            monitor,
            tickets: Arc::new(ListPanel::new(Arc::new(tickets), interval)),
            schedules: Arc::new(ListPanel::new(Arc::new(schedules), interval)),
            requests: Arc::new(ListPanel::new(Arc::new(requests), interval)),
        }
    }

    /// Papéis vindos da configuração (`auth.roles`)
    pub fn with_static_roles(settings: config::Settings, store: Arc<dyn SettingsStore>) -> Self {
        let roles = StaticRoleProvider::new(settings.auth.roles.clone());
        Self::new(settings, store, Arc::new(roles))
    }

    fn panels(&self) -> [&Arc<ListPanel>; 3] {
        [&self.tickets, &self.schedules, &self.requests]
    }

    pub fn start_polling(&self) {
        for panel in self.panels() {
            panel.start();
        }
    }

    pub async fn stop_polling(&self) {
        for panel in self.panels() {
            panel.stop().await;
        }
    }

    /// Busca imediata nas três listas (após alterações feitas pelo painel)
    pub fn refresh_panels(&self) {
        for panel in self.panels() {
            panel.retry();
        }
    }

    /// Cliente montado a partir das configurações salvas no momento da chamada
    pub async fn task_manager(&self) -> AppResult<TaskManager> {
        let stored = self.store.get().await?;
        let client = self.settings.clickup.build_client(stored.require_api_key()?)?;
        Ok(TaskManager::new(client))
    }
}
