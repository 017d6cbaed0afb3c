/// Middleware layer para o Axum router
///
/// - Identificação do usuário (header X-User-Id repassado pela sessão)
/// - Restrição de endpoints administrativos ao papel admin

pub mod admin_auth;

pub use admin_auth::{require_admin, require_user, USER_ID_HEADER};
