//! Novas tentativas com backoff linear para chamadas idempotentes
//!
//! Leituras (listar tarefas, buscar tarefa, comentários, campos, status) usam
//! [`RetryPolicy::execute`]. Escritas (criar, atualizar, comentar) NUNCA passam
//! por aqui: uma falha é devolvida imediatamente para evitar efeitos duplicados.
//!
//! Com a política padrão são no máximo 3 tentativas, aguardando
//! `tentativa × 1s` antes da próxima (1s antes da 2ª, 2s antes da 3ª).

use crate::error::{ClickUpError, Result};
use std::future::Future;
use std::time::Duration;

/// Número padrão de tentativas (total, incluindo a primeira)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Intervalo base multiplicado pelo número da tentativa
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Resultado de uma tentativa, entregue ao observador
#[derive(Debug)]
pub struct AttemptReport<'a> {
    /// Número da tentativa (começa em 1)
    pub attempt: u32,
    pub max_attempts: u32,
    /// `None` quando a tentativa teve sucesso
    pub error: Option<&'a ClickUpError>,
}

impl AttemptReport<'_> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Política de novas tentativas parametrizada por máximo e backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Cria uma política; `max_attempts` menor que 1 é tratado como 1
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Uma única tentativa, sem espera
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Espera aplicada após a tentativa `attempt` falhar
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Executa `operation` com novas tentativas
    pub async fn execute<T, F, Fut>(&self, label: &str, operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.execute_observed(label, operation, |_| {}).await
    }

    /// Igual a [`execute`](Self::execute), notificando `observer` ao fim de
    /// cada tentativa (sucesso ou falha)
    pub async fn execute_observed<T, F, Fut, O>(
        &self,
        label: &str,
        mut operation: F,
        mut observer: O,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        O: FnMut(&AttemptReport<'_>),
    {
        let mut last_error: Option<ClickUpError> = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => {
                    observer(&AttemptReport {
                        attempt,
                        max_attempts: self.max_attempts,
                        error: None,
                    });
                    if attempt > 1 {
                        tracing::info!("✅ {} concluído na tentativa {}", label, attempt);
                    }
                    return Ok(value);
                }
                Err(error) => {
                    observer(&AttemptReport {
                        attempt,
                        max_attempts: self.max_attempts,
                        error: Some(&error),
                    });

                    if !error.is_retryable() {
                        return Err(error);
                    }

                    if attempt < self.max_attempts {
                        let delay = self.delay_for(attempt);
                        tracing::warn!(
                            "⚠️ {}: tentativa {}/{} falhou ({}). Nova tentativa em {:?}",
                            label,
                            attempt,
                            self.max_attempts,
                            error,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        tracing::error!(
                            "❌ {}: tentativa {}/{} falhou ({})",
                            label,
                            attempt,
                            self.max_attempts,
                            error
                        );
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ClickUpError::RetriesExhausted(label.to_string())))
    }
}
