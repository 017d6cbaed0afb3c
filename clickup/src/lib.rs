//! Cliente da API ClickUp v2 usado pelo painel de atendimentos
//!
//! - [`client`]: requisições autenticadas e tratamento de erros da API
//! - [`retry`]: novas tentativas com backoff linear para leituras
//! - [`tasks`]: tarefas, comentários, campos personalizados e status de listas
//! - [`types`]: payloads tipados (Task, TaskStatus, Priority, CustomField...)
//!
//! # API ClickUp v2
//!
//! - **Tasks**: `/list/{list_id}/task`, `/task/{task_id}`
//! - **Comments**: `/task/{task_id}/comment`
//! - **Custom Fields**: `/list/{list_id}/field`, `/custom_field/{field_id}`
//! - **Lists**: `/list/{list_id}` (status configurados)
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use clickup::{ClickUpClient, TaskManager};
//!
//! #[tokio::main]
//! async fn main() -> clickup::Result<()> {
//!     let client = ClickUpClient::new(settings.api_key)?;
//!     let manager = TaskManager::new(client);
//!
//!     let tasks = manager.get_tasks_in_list(&settings.list_id, &[]).await?;
//!     println!("{} tarefas", tasks.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod tasks;
pub mod types;

// Re-exports principais
pub use client::{ClickUpClient, DEFAULT_BASE_URL};
pub use error::{ClickUpError, Result};
pub use retry::{AttemptReport, RetryPolicy};
pub use tasks::TaskManager;

pub use types::{
    Comment, CreateTaskRequest, CustomField, CustomFieldUpdate, FieldOption, Priority, Status,
    Task, TaskStatus, TaskUpdate, User,
};
