//! Cliente HTTP para a API do ClickUp

use crate::error::{ClickUpError, Result};
use crate::retry::{AttemptReport, RetryPolicy};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// URL padrão da API v2
pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

/// Cliente para interagir com a API do ClickUp (v2)
///
/// Construído explicitamente por quem chama, a partir das configurações
/// vigentes; não existe instância global.
///
/// - Leituras: `get_json` com [`RetryPolicy`]
/// - Escritas: `post_json` / `put_json`, uma única tentativa
#[derive(Clone, Debug)]
pub struct ClickUpClient {
    http_client: HttpClient,
    api_token: String,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl ClickUpClient {
    /// Cria um novo cliente ClickUp
    ///
    /// # Argumentos
    ///
    /// * `api_token` - Token de autenticação (Personal Token `pk_...`)
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    ///
    /// # Erros
    ///
    /// `ConfigError` se o token estiver vazio.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(api_token, 30, 5)
    }

    /// Cria um novo cliente com timeouts customizados
    pub fn with_timeouts(
        api_token: impl Into<String>,
        total_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ClickUpError::ConfigError("api_key não configurada".to_string()));
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| {
                ClickUpError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Substitui a URL base (proxy, ambiente de testes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Substitui a política de novas tentativas das leituras
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Executa uma requisição GET (uma tentativa)
    pub(crate) async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", &self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        self.handle_response(response, ErrorText::BodyMessage).await
    }

    /// Executa uma requisição GET e parseia JSON (uma tentativa)
    pub(crate) async fn get_json_once<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.get(endpoint).await?;
        let json = response.json().await?;
        Ok(json)
    }

    /// GET com novas tentativas conforme a política do cliente
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.retry_policy
            .execute(endpoint, || self.get_json_once(endpoint))
            .await
    }

    /// GET com novas tentativas, notificando o observador a cada tentativa
    pub(crate) async fn get_json_observed<T, O>(&self, endpoint: &str, observer: O) -> Result<T>
    where
        T: DeserializeOwned,
        O: FnMut(&AttemptReport<'_>),
    {
        self.retry_policy
            .execute_observed(endpoint, || self.get_json_once(endpoint), observer)
            .await
    }

    /// Executa uma requisição POST e parseia JSON (nunca repetida)
    pub(crate) async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!(
            "POST {} with body: {}",
            url,
            serde_json::to_string(body).unwrap_or_default()
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", &self.api_token)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let response = self.handle_response(response, ErrorText::StatusText).await?;
        Ok(response.json().await?)
    }

    /// Executa uma requisição PUT e parseia JSON (nunca repetida)
    pub(crate) async fn put_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("PUT {}", url);

        let response = self
            .http_client
            .put(&url)
            .header("Authorization", &self.api_token)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let response = self.handle_response(response, ErrorText::StatusText).await?;
        Ok(response.json().await?)
    }

    /// Processa a resposta HTTP e trata erros
    ///
    /// Leituras preferem a mensagem do corpo (`err`/`error`/`message`);
    /// escritas sempre carregam o status text da resposta.
    async fn handle_response(&self, response: Response, text: ErrorText) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("Unknown error").to_string();
        let error_body = response.text().await.unwrap_or_default();

        tracing::error!("ClickUp API error ({}): {}", status_code, error_body);

        let message = match text {
            ErrorText::StatusText => status_text,
            ErrorText::BodyMessage => body_message(&error_body).unwrap_or(status_text),
        };

        Err(ClickUpError::ApiError {
            status: status_code,
            message,
        })
    }

    /// Obtém o token de autenticação
    pub fn token(&self) -> &str {
        &self.api_token
    }

    /// Obtém a URL base da API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

#[derive(Debug, Clone, Copy)]
enum ErrorText {
    BodyMessage,
    StatusText,
}

/// Mensagem de erro do JSON devolvido pela API, se houver
fn body_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;
    json.get("err")
        .or_else(|| json.get("error"))
        .or_else(|| json.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
