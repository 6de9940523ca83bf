//! In-process fake of the scratch-data backend.
//!
//! Serves `/users` with the same status codes as the real service: 201 on
//! create, 200 on read and update, 204 on delete, 404 for unknown ids. Every
//! request is recorded so tests can assert on what the probe actually sent.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use crud_probe::config::PayloadConfig;
use crud_probe::{CrudProbe, ReqwestTransport};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, Value>,
    next_ids: VecDeque<String>,
    issued: u64,
    create_status: Option<StatusCode>,
    omit_id: bool,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct BackendState {
    inner: Arc<Mutex<Inner>>,
}

impl BackendState {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn record(&self, id: &str) -> Option<Value> {
        self.inner.lock().unwrap().records.get(id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    fn log(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = serde_json::from_slice(body).ok();
        self.inner.lock().unwrap().requests.push(RecordedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            content_type,
            body,
        });
    }
}

/// Knobs for the fake backend's behaviour.
#[derive(Default)]
pub struct BackendOptions {
    /// Ids handed out on create, in order. Falls back to generated ids.
    pub ids: Vec<String>,
    /// Answer every create with this status and no record.
    pub create_status: Option<StatusCode>,
    /// Answer create with 201 but leave `_id` out of the body.
    pub omit_id: bool,
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: BackendState,
}

impl FakeBackend {
    /// Collection URL in the same shape as the default config (trailing slash).
    pub fn base_url(&self) -> String {
        format!("http://{}/users/", self.addr)
    }

    pub fn probe(&self) -> anyhow::Result<CrudProbe<ReqwestTransport>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        let transport = ReqwestTransport::with_client(client);
        Ok(CrudProbe::new(
            transport,
            self.base_url(),
            PayloadConfig::default(),
        ))
    }
}

pub async fn spawn_backend(options: BackendOptions) -> anyhow::Result<FakeBackend> {
    let state = BackendState::default();
    {
        let mut inner = state.inner.lock().unwrap();
        inner.next_ids = options.ids.into();
        inner.create_status = options.create_status;
        inner.omit_id = options.omit_id;
    }

    let app = Router::new()
        .route("/users", any(collection))
        .route("/users/", any(collection))
        .route("/users/:id", get(by_id).put(by_id).delete(by_id))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("fake backend stopped: {e}");
        }
    });

    Ok(FakeBackend { addr, state })
}

async fn collection(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.log(&method, &uri, &headers, &body);

    if method != Method::POST {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut inner = state.inner.lock().unwrap();
    if let Some(status) = inner.create_status {
        return (status, "backend unavailable").into_response();
    }

    inner.issued += 1;
    let issued = inner.issued;
    let id = inner
        .next_ids
        .pop_front()
        .unwrap_or_else(|| format!("{issued:024x}"));
    fields.insert("_id".to_string(), Value::String(id.clone()));
    let created = Value::Object(fields);
    inner.records.insert(id, created.clone());

    let mut response_body = created;
    if inner.omit_id {
        if let Some(obj) = response_body.as_object_mut() {
            obj.remove("_id");
        }
    }
    (StatusCode::CREATED, Json(response_body)).into_response()
}

async fn by_id(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.log(&method, &uri, &headers, &body);

    let mut inner = state.inner.lock().unwrap();
    if !inner.records.contains_key(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }

    if method == Method::GET {
        let record = inner.records.get(&id).cloned().unwrap_or(Value::Null);
        (StatusCode::OK, Json(record)).into_response()
    } else if method == Method::PUT {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(&body) else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        fields.insert("_id".to_string(), Value::String(id.clone()));
        inner.records.insert(id, Value::Object(fields));
        StatusCode::OK.into_response()
    } else if method == Method::DELETE {
        inner.records.remove(&id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}
