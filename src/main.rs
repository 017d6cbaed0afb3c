/// Painel de atendimentos: API HTTP sobre as listas do ClickUp
///
/// Arquitetura:
/// - Três painéis (atendimentos, agendamentos, solicitações), cada um com busca
///   periódica própria e snapshot com detecção de mudanças
/// - Configurações do ClickUp (token + IDs de lista) editadas pelo admin e
///   persistidas em YAML
/// - Cliente do ClickUp montado a cada chamada a partir das configurações salvas
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use atendimentos_admin::config::Settings;
use atendimentos_admin::services::YamlSettingsStore;
use atendimentos_admin::utils::logging::*;
use atendimentos_admin::{handlers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if dotenv_loaded {
        log_info("✅ Arquivo .env carregado com sucesso");
    }

    let settings = Settings::new().context("Failed to load settings")?;
    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let store = Arc::new(YamlSettingsStore::new(&settings.store.path));
    log_info(&format!("📄 Configurações do ClickUp em {}", settings.store.path));

    let state = Arc::new(AppState::with_static_roles(settings.clone(), store));

    if settings.polling.autostart {
        state.start_polling();
    } else {
        log_warning("⚠️ Busca periódica desabilitada (polling.autostart = false)");
    }

    let app = handlers::router(state.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    log_server_startup(settings.server.port);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log_server_ready(&addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.stop_polling().await;
    log_info("👋 Servidor encerrado");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error(&format!("Falha ao aguardar sinal de encerramento: {}", e));
        std::future::pending::<()>().await;
    }
}
