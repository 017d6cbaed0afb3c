// Handlers HTTP das telas do painel
pub mod admin;
pub mod health;
pub mod lists;
pub mod tasks;

pub use admin::*;
pub use health::*;
pub use lists::*;
pub use tasks::*;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{require_admin, require_user};
use crate::AppState;

/// Monta o router completo
///
/// - `/health`: público
/// - telas de lista, detalhes e metadados: usuário identificado
/// - criação de atendimento, edição, comentários e `/admin/*`: papel admin
pub fn router(state: Arc<AppState>) -> Router {
    let admin = middleware::from_fn_with_state(state.clone(), require_admin);

    let admin_routes = Router::new()
        .route("/admin/settings", get(get_settings).put(put_settings))
        .route("/admin/monitor", get(get_monitor))
        .route_layer(admin.clone());

    let user_routes = Router::new()
        .route(
            "/atendimentos",
            get(list_atendimentos).merge(post(create_atendimento).route_layer(admin.clone())),
        )
        .route("/atendimentos/retry", post(retry_atendimentos))
        .route("/agendamentos", get(list_agendamentos))
        .route("/agendamentos/retry", post(retry_agendamentos))
        .route("/solicitacoes", get(list_solicitacoes))
        .route("/solicitacoes/retry", post(retry_solicitacoes))
        .route(
            "/tasks/:id",
            get(get_task).merge(put(update_task).route_layer(admin.clone())),
        )
        .route(
            "/tasks/:id/comments",
            get(list_comments).merge(post(add_comment).route_layer(admin)),
        )
        .route("/lists/:id/statuses", get(list_statuses))
        .route("/lists/:id/fields", get(list_fields))
        .route("/fields/:id/options", get(field_options))
        .route("/lookup-fields", get(lookup_fields))
        .route_layer(middleware::from_fn(require_user));

    Router::new()
        .route("/health", get(health_check))
        .merge(admin_routes)
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::ClickUpSettings;
    use crate::services::{MemorySettingsStore, Role, StaticRoleProvider};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ADMIN: &str = "u-admin";
    const STAFF: &str = "u-staff";

    fn state_with(base_url: &str, stored: ClickUpSettings) -> Arc<AppState> {
        let mut settings = Settings::default();
        settings.clickup.base_url = base_url.to_string();
        settings.clickup.retry_base_delay_ms = 1;

        let roles = StaticRoleProvider::default()
            .with_role(ADMIN, Role::Admin)
            .with_role(STAFF, Role::User);

        Arc::new(AppState::new(
            settings,
            Arc::new(MemorySettingsStore::new(stored)),
            Arc::new(roles),
        ))
    }

    fn configured() -> ClickUpSettings {
        ClickUpSettings {
            api_key: "pk_test".to_string(),
            list_id: "L-ATD".to_string(),
            list_id_schedules: "L-AGD".to_string(),
            list_id_requests: "L-SOL".to_string(),
            ..Default::default()
        }
    }

    fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-User-Id", user);
        }
        match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, body) = send(state, request(Method::GET, "/health", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_lists_require_user() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, body) = send(state, request(Method::GET, "/atendimentos", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_atendimentos_filters_snapshot() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/L-ATD/task");
                then.status(200).json_body(json!({
                    "tasks": [
                        {"id": "1", "name": "Atendimento Cliente X", "status": "agendado",
                         "assignees": [{"id": 1, "username": "joao.silva"}]},
                        {"id": "2", "name": "Reunião Interna", "status": "agendado"},
                        {"id": "3", "name": "Atendimento Cliente Y", "status": "concluído"}
                    ]
                }));
            })
            .await;

        let state = state_with(&server.base_url(), configured());
        state.tickets.retry().await.unwrap();

        let (status, body) = send(
            state.clone(),
            request(Method::GET, "/atendimentos?view=pending", Some(STAFF), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(body["tasks"][0]["id"], "1");
        assert_eq!(body["tasks"][0]["assignees"], "joao.silva");
        assert_eq!(body["statuses"], json!(["agendado", "concluído"]));
        assert_eq!(body["total"], 3);

        let (_, body) = send(
            state.clone(),
            request(Method::GET, "/atendimentos?search=jo%C3%A3o", Some(STAFF), None),
        )
        .await;
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);

        // um registro no monitor por tentativa
        assert_eq!(state.monitor.recent().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_list_id_surfaces_in_panel_error() {
        let state = state_with("http://127.0.0.1:1", ClickUpSettings {
            api_key: "pk_test".to_string(),
            ..Default::default()
        });
        state.requests.retry().await.unwrap();

        let (status, body) = send(
            state,
            request(Method::GET, "/solicitacoes", Some(STAFF), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("list_id_requests"));
        assert_eq!(body["loading"], false);
    }

    #[tokio::test]
    async fn test_update_task_requires_admin() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, _) = send(
            state,
            request(Method::PUT, "/tasks/t1", Some(STAFF), Some(json!({"name": "x"}))),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_get_task_open_to_staff() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/task/t1");
                then.status(200).json_body(json!({"id": "t1", "name": "Atendimento", "status": "agendado"}));
            })
            .await;

        let state = state_with(&server.base_url(), configured());
        let (status, body) = send(state, request(Method::GET, "/tasks/t1", Some(STAFF), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_label"], "agendado");
    }

    #[tokio::test]
    async fn test_rejected_update_is_sent_once() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/task/t1")
                    .json_body(json!({"status": "concluído", "priority": 2}));
                then.status(400);
            })
            .await;

        let state = state_with(&server.base_url(), configured());
        let (status, body) = send(
            state,
            request(
                Method::PUT,
                "/tasks/t1",
                Some(ADMIN),
                Some(json!({"status": "concluído", "priority": "Alta"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Erro na API (status 400): Bad Request");
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_update_with_status_object_sends_label() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/task/t1")
                    .json_body(json!({"status": "concluído"}));
                then.status(200)
                    .json_body(json!({"id": "t1", "name": "Atendimento", "status": "concluído"}));
            })
            .await;

        let state = state_with(&server.base_url(), configured());
        let (status, body) = send(
            state,
            request(
                Method::PUT,
                "/tasks/t1",
                Some(ADMIN),
                Some(json!({"status": {"status": "concluído"}})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_label"], "concluído");
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_admin_creates_atendimento_in_tickets_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/list/L-ATD/task").json_body(json!({
                    "name": "Atendimento: Cliente Z",
                    "description": "Instalação do módulo fiscal",
                    "status": "fazer"
                }));
                then.status(200).json_body(json!({
                    "id": "new1",
                    "name": "Atendimento: Cliente Z",
                    "status": "fazer"
                }));
            })
            .await;

        let state = state_with(&server.base_url(), configured());
        let (status, body) = send(
            state,
            request(
                Method::POST,
                "/atendimentos",
                Some(ADMIN),
                Some(json!({"nome": "Cliente Z", "descricao": "Instalação do módulo fiscal"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "new1");
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_create_atendimento_requires_admin_and_name() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, _) = send(
            state.clone(),
            request(Method::POST, "/atendimentos", Some(STAFF), Some(json!({"nome": "X"}))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            state,
            request(Method::POST, "/atendimentos", Some(ADMIN), Some(json!({"nome": "  "}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, _) = send(
            state,
            request(Method::PUT, "/tasks/t1", Some(ADMIN), Some(json!({}))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_settings_round_trip_for_admin() {
        let state = state_with("http://127.0.0.1:1", ClickUpSettings::default());

        let (status, body) = send(
            state.clone(),
            request(
                Method::PUT,
                "/admin/settings",
                Some(ADMIN),
                Some(json!({"api_key": "pk_new", "list_id": "L-1"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["updated_at"].is_string());

        let (status, body) = send(
            state,
            request(Method::GET, "/admin/settings", Some(ADMIN), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["list_id"], "L-1");
    }

    #[tokio::test]
    async fn test_monitor_hidden_from_staff() {
        let state = state_with("http://127.0.0.1:1", configured());
        let (status, _) = send(
            state,
            request(Method::GET, "/admin/monitor", Some(STAFF), None),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_task_endpoint_without_api_key_is_precondition_failed() {
        let state = state_with("http://127.0.0.1:1", ClickUpSettings::default());
        let (status, body) = send(
            state,
            request(Method::GET, "/tasks/t1/comments", Some(STAFF), None),
        )
        .await;

        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["status"], 412);
    }

    #[tokio::test]
    async fn test_lookup_fields_merges_auxiliary_lists() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/L-ATD/field");
                then.status(200).json_body(json!({"fields": [
                    {"id": "f-cp", "name": "Cliente X Produto", "type": "list_relationship"}
                ]}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/L-PROD/field");
                then.status(200).json_body(json!({"fields": [
                    {"id": "f-cp", "name": "Cliente X Produto", "type": "list_relationship"},
                    {"id": "f-ver", "name": "Versão", "type": "short_text"}
                ]}));
            })
            .await;

        let mut stored = configured();
        stored.list_id_produtos = "L-PROD".to_string();
        let state = state_with(&server.base_url(), stored);

        let (status, body) = send(
            state,
            request(Method::GET, "/lookup-fields", Some(STAFF), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["f-cp", "f-ver"]);
    }
}
