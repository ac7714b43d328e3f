//! HTTP API for the document store.
//!
//! Exposes the store client over five JSON endpoints (`/login`, `/set`,
//! `/get`, `/delete`, `/query`) plus a health check. All authentication
//! state lives here: the store core only ever sees a resolved [`User`],
//! and the anonymous bootstrap user stands in when no session key is
//! presented.
//!
//! [`User`]: docstore_types::User

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

pub use api::{ApiRequest, ApiResponse};
pub use config::{ServerConfig, StorageConfig};
pub use error::{ServerError, ServerResult};
pub use server::StoreServer;
pub use session::{Session, SessionManager};
pub use state::{AppState, ANONYMOUS_USER};

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::json;
    use tower::util::ServiceExt;

    use docstore_types::User;

    fn test_app() -> (Arc<AppState>, Router) {
        let state = AppState::new(&ServerConfig::default()).unwrap();
        let app = router::build_router(state.clone())
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4321))));
        (state, app)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, ApiResponse) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let envelope = serde_json::from_slice(&bytes).unwrap();
        (status, envelope)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (_state, app) = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn set_then_get_roundtrip() {
        let (_state, app) = test_app();

        let (status, resp) = send(
            &app,
            "POST",
            "/set",
            Some(json!({"objects": [{"name": "first", "rank": 1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);
        assert_eq!(resp.objects.len(), 1);
        let uid = resp.objects[0]["_uid"].as_str().unwrap().to_string();
        assert!(!uid.is_empty());

        let (status, resp) = send(
            &app,
            "POST",
            "/get",
            Some(json!({"objects": [{"_uid": uid}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.objects.len(), 1);
        assert_eq!(resp.objects[0]["name"], json!("first"));
    }

    #[tokio::test]
    async fn get_accepts_query_parameters() {
        let (state, app) = test_app();

        let mut object = docstore_types::Object::new(
            serde_json::from_str(r#"{"via":"params"}"#).unwrap(),
        );
        state.client.set(&mut object, None).unwrap();

        let (status, resp) =
            send(&app, "GET", &format!("/get?uid={}", object.uid), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.objects.len(), 1);
    }

    #[tokio::test]
    async fn get_without_uids_is_bad_request() {
        let (_state, app) = test_app();
        let (status, resp) = send(&app, "POST", "/get", Some(json!({"objects": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn get_with_malformed_object_is_bad_request() {
        let (_state, app) = test_app();
        // A numeric _uid fails conversion, like it does on /set.
        let (status, resp) = send(
            &app,
            "POST",
            "/get",
            Some(json!({"objects": [{"_uid": 42}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn get_unknown_uid_is_not_found() {
        let (_state, app) = test_app();
        let (status, _resp) = send(&app, "GET", "/get?uid=no-such-uid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let (_state, app) = test_app();

        let (_, resp) = send(
            &app,
            "POST",
            "/set",
            Some(json!({"objects": [{"doomed": true}]})),
        )
        .await;
        let uid = resp.objects[0]["_uid"].as_str().unwrap().to_string();

        let (status, resp) = send(
            &app,
            "POST",
            "/delete",
            Some(json!({"objects": [{"_uid": uid}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);

        let (status, _) = send(&app, "GET", &format!("/get?uid={uid}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn query_endpoint_filters_objects() {
        let (_state, app) = test_app();

        send(
            &app,
            "POST",
            "/set",
            Some(json!({"objects": [
                {"kind": "note", "rank": 1},
                {"kind": "note", "rank": 5},
                {"kind": "page", "rank": 9},
            ]})),
        )
        .await;

        let (status, resp) = send(
            &app,
            "POST",
            "/query",
            Some(json!({"query": "kind = 'note' and rank > 2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.objects.len(), 1);
        assert_eq!(resp.objects[0]["rank"], json!(5.0));
    }

    #[tokio::test]
    async fn query_accepts_query_parameters() {
        let (_state, app) = test_app();

        send(
            &app,
            "POST",
            "/set",
            Some(json!({"objects": [{"color": "teal"}]})),
        )
        .await;

        let (status, resp) =
            send(&app, "GET", "/query?q=color%20%3D%20%27teal%27", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.objects.len(), 1);
    }

    #[tokio::test]
    async fn empty_query_is_bad_request() {
        let (_state, app) = test_app();
        let (status, _) = send(&app, "POST", "/query", Some(json!({"query": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_is_bad_request() {
        let (_state, app) = test_app();
        let (status, resp) = send(
            &app,
            "GET",
            "/query?q=a%20%3D%201%20or%20b%20%3D%202",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
        assert!(!resp.message.is_empty());
    }

    fn create_login_user(state: &AppState, username: &str, password: &str) {
        let mut user = User::new(username);
        user.password_hash = docstore_store::password::hash(password).unwrap();
        state.client.set_user(&mut user).unwrap();
    }

    #[tokio::test]
    async fn login_issues_usable_session() {
        let (state, app) = test_app();
        create_login_user(&state, "alice", "opensesame");

        let (status, resp) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"username": "alice", "password": "opensesame"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);
        assert_eq!(resp.key.len(), 64);
        assert!(!resp.expires.is_empty());

        let (status, resp) = send(
            &app,
            "POST",
            "/set",
            Some(json!({"key": resp.key, "objects": [{"owned": true}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let (state, app) = test_app();
        create_login_user(&state, "bob", "correct");

        let (status, resp) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"username": "bob", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn login_with_unknown_user_is_unauthorized() {
        let (_state, app) = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"username": "ghost", "password": "boo"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn stale_session_key_is_forbidden() {
        let (_state, app) = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/set",
            Some(json!({"key": "deadbeef", "objects": [{"a": 1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
