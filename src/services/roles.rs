//! Papéis de usuário
//!
//! A sessão é mantida pelo provedor de autenticação externo; aqui só se
//! responde "este usuário é administrador?".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Papel do usuário, `None` se desconhecido
    async fn role_of(&self, user_id: &str) -> AppResult<Option<Role>>;

    async fn is_admin(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.role_of(user_id).await? == Some(Role::Admin))
    }
}

/// Papéis fixos vindos da configuração (`auth.roles`)
#[derive(Debug, Clone, Default)]
pub struct StaticRoleProvider {
    roles: HashMap<String, Role>,
}

impl StaticRoleProvider {
    pub fn new(roles: HashMap<String, Role>) -> Self {
        Self { roles }
    }

    pub fn with_role(mut self, user_id: impl Into<String>, role: Role) -> Self {
        self.roles.insert(user_id.into(), role);
        self
    }
}

#[async_trait]
impl RoleProvider for StaticRoleProvider {
    async fn role_of(&self, user_id: &str) -> AppResult<Option<Role>> {
        Ok(self.roles.get(user_id.trim()).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_roles() {
        let provider = StaticRoleProvider::default()
            .with_role("u-admin", Role::Admin)
            .with_role("u-staff", Role::User);

        assert!(provider.is_admin("u-admin").await.unwrap());
        assert!(!provider.is_admin("u-staff").await.unwrap());
        assert!(!provider.is_admin("desconhecido").await.unwrap());
        assert_eq!(provider.role_of("u-staff").await.unwrap(), Some(Role::User));
    }
}
