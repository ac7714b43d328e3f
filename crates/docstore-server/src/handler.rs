use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::json;

use docstore_store::StoreError;
use docstore_types::{object_from_api, object_to_api, ApiObject};

use crate::api::{ApiRequest, ApiResponse};
use crate::error::ServerResult;
use crate::state::AppState;

/// Health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "name": "docstore-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /login`: verify credentials and issue a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ApiRequest>,
) -> Response {
    respond("login", handle_login(&state, &req, addr))
}

fn handle_login(
    state: &AppState,
    req: &ApiRequest,
    addr: SocketAddr,
) -> ServerResult<ApiResponse> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(StoreError::InvalidCredentials.into());
    }
    let user = match state.client.get_user_by_username(&req.username) {
        Ok(user) => user,
        // An unknown username reads the same as a wrong password.
        Err(StoreError::NotFound(_)) => return Err(StoreError::InvalidCredentials.into()),
        Err(e) => return Err(e.into()),
    };
    if !state.client.check_password(&req.password, &user.password_hash) {
        return Err(StoreError::InvalidCredentials.into());
    }
    let session = state.sessions.create(&user, &addr.ip().to_string());
    Ok(ApiResponse {
        success: true,
        key: session.key,
        expires: session.expires.to_rfc3339_opts(SecondsFormat::Secs, true),
        ..ApiResponse::default()
    })
}

/// `POST|PUT /set`: store every object in the request.
pub async fn set_objects(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApiRequest>,
) -> Response {
    respond("set", handle_set(&state, &req))
}

fn handle_set(state: &AppState, req: &ApiRequest) -> ServerResult<ApiResponse> {
    let user = state.user_from_session_key(&req.key)?;
    let mut stored = Vec::with_capacity(req.objects.len());
    for api_object in &req.objects {
        let mut object = object_from_api(api_object)
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))?;
        state.client.set(&mut object, Some(&user))?;
        stored.push(object_to_api(&object));
    }
    Ok(ApiResponse::with_objects(stored))
}

/// `GET /get?uid=a,b,c&key=...`
pub async fn get_objects_from_params(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GetParams>,
) -> Response {
    let uids = params.uid.split(',').map(str::to_string).collect();
    respond("get", handle_get(&state, &params.key, uids))
}

/// `POST /get`: fetch every object named in the request.
pub async fn get_objects(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApiRequest>,
) -> Response {
    let mut uids = Vec::with_capacity(req.objects.len());
    for api_object in &req.objects {
        match object_from_api(api_object) {
            Ok(object) => uids.push(object.uid),
            Err(e) => {
                return respond(
                    "get",
                    Err(StoreError::InvalidArgument(e.to_string()).into()),
                );
            }
        }
    }
    respond("get", handle_get(&state, &req.key, uids))
}

fn handle_get(state: &AppState, key: &str, uids: Vec<String>) -> ServerResult<ApiResponse> {
    let mut wanted: Vec<String> = Vec::with_capacity(uids.len());
    for uid in uids {
        if !uid.is_empty() && !wanted.contains(&uid) {
            wanted.push(uid);
        }
    }
    if wanted.is_empty() {
        return Err(StoreError::ObjectNotSpecified.into());
    }
    let user = state.user_from_session_key(key)?;
    let mut objects = Vec::with_capacity(wanted.len());
    for uid in &wanted {
        let object = state.client.get(uid, Some(&user))?;
        objects.push(object_to_api(&object));
    }
    Ok(ApiResponse::with_objects(objects))
}

/// `POST|DELETE /delete`: remove every object named in the request.
pub async fn delete_objects(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApiRequest>,
) -> Response {
    respond("delete", handle_delete(&state, &req))
}

fn handle_delete(state: &AppState, req: &ApiRequest) -> ServerResult<ApiResponse> {
    let user = state.user_from_session_key(&req.key)?;
    for api_object in &req.objects {
        let object = object_from_api(api_object)
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))?;
        state.client.delete(&object, Some(&user))?;
    }
    Ok(ApiResponse::ok())
}

/// `GET /query?q=...&key=...` (`query=` is accepted as an alias).
pub async fn run_query_from_params(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Response {
    let expression = if params.q.is_empty() {
        params.query
    } else {
        params.q
    };
    respond("query", handle_query(&state, &params.key, &expression))
}

/// `POST /query`: run the filter expression in the request.
pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApiRequest>,
) -> Response {
    respond("query", handle_query(&state, &req.key, &req.query))
}

fn handle_query(state: &AppState, key: &str, expression: &str) -> ServerResult<ApiResponse> {
    if expression.is_empty() {
        return Err(StoreError::InvalidArgument("empty query".into()).into());
    }
    let user = state.user_from_session_key(key)?;
    let results = state.client.query(expression, Some(&user))?;
    let objects: Vec<ApiObject> = results.iter().map(object_to_api).collect();
    Ok(ApiResponse::with_objects(objects))
}

/// Query-string parameters for `GET /get`.
#[derive(Debug, Default, Deserialize)]
pub struct GetParams {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub key: String,
}

/// Query-string parameters for `GET /query`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub key: String,
}

fn respond(endpoint: &'static str, result: ServerResult<ApiResponse>) -> Response {
    match result {
        Ok(resp) => {
            tracing::debug!(endpoint, "request ok");
            (StatusCode::OK, Json(resp)).into_response()
        }
        Err(err) => {
            tracing::warn!(endpoint, error = %err, "request failed");
            (err.status(), Json(ApiResponse::error(err.to_string()))).into_response()
        }
    }
}
