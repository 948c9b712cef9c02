#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use projcart_client::api::HttpApiClient;
use projcart_client::session::{MemoryTokenStore, TokenStore};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "hunter2";

type Reply = Result<Json<Value>, (StatusCode, String)>;

/// In-memory stand-in for the Projcart API
#[derive(Default)]
pub struct MockState {
    pub projects: Vec<Value>,
    pub owned: HashSet<String>,
    pub user: Option<Value>,
    /// Next mutating request fails with this status and body
    pub fail_next: Option<(StatusCode, String)>,
    pub auth_headers: Vec<Option<String>>,
    pub next_id: u32,
    /// `/users/me` answers `"projects": null` instead of an array
    pub null_projects: bool,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: String,
    pub state: Shared,
}

impl MockApi {
    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> HttpApiClient {
        HttpApiClient::new(&self.base_url, tokens).expect("valid mock base url")
    }

    /// Client already holding a valid session token
    pub fn signed_in(&self) -> (HttpApiClient, Arc<dyn TokenStore>) {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token(TOKEN));
        (self.client(Arc::clone(&tokens)), tokens)
    }

    pub fn fail_next(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().fail_next = Some((status, body.to_string()));
    }

    pub fn project_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .projects
            .iter()
            .filter_map(|p| p["title"].as_str().map(String::from))
            .collect()
    }
}

pub fn project(id: &str, title: &str, views: Option<u64>, created_at: Option<&str>) -> Value {
    let mut p = json!({
        "_id": id,
        "title": title,
        "website": format!("{}.dev", id),
        "github": "",
        "xProfile": "",
        "creatorName": "",
    });
    if let Some(v) = views {
        p["views"] = json!(v);
    }
    if let Some(c) = created_at {
        p["createdAt"] = json!(c);
    }
    p
}

/// Seeded catalogue: four public projects, two of them owned by the signed-in user
pub fn seeded_state() -> MockState {
    let mut state = MockState {
        user: Some(json!({ "name": "Ada", "email": EMAIL })),
        next_id: 100,
        ..MockState::default()
    };
    state.projects = vec![
        project("p1", "DevTool", Some(5), Some("2021-03-01T00:00:00.000Z")),
        project("p2", "Rocket Launcher", Some(20), Some("2023-05-10T00:00:00.000Z")),
        project("p3", "Garden Planner", Some(1), None),
        project("p4", "Beta Devtools", Some(5), Some("2022-07-15T00:00:00.000Z")),
    ];
    state.projects[3]["creatorName"] = json!("Grace");
    state.owned.insert("p1".into());
    state.owned.insert("p4".into());
    state
}

pub async fn spawn(state: MockState) -> Result<MockApi> {
    let shared: Shared = Arc::new(Mutex::new(state));
    let app = Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", patch(update_project).delete(delete_project))
        .route(
            "/api/users/me",
            get(get_me).patch(update_me).delete(delete_me),
        )
        .route("/api/auth/login", post(login))
        .with_state(Arc::clone(&shared));

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock api")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockApi {
        base_url: format!("http://127.0.0.1:{}/api", port),
        state: shared,
    })
}

fn authorize(state: &mut MockState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.auth_headers.push(header.clone());
    match header.as_deref() {
        Some(TOKEN) => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
    }
}

fn injected_failure(state: &mut MockState) -> Result<(), (StatusCode, String)> {
    match state.fail_next.take() {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

async fn list_projects(State(shared): State<Shared>, headers: HeaderMap) -> Reply {
    let mut state = shared.lock().unwrap();
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.auth_headers.push(header);
    injected_failure(&mut state)?;
    Ok(Json(Value::Array(state.projects.clone())))
}

async fn get_me(State(shared): State<Shared>, headers: HeaderMap) -> Reply {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    if state.null_projects {
        return Ok(Json(json!({ "user": state.user, "projects": null })));
    }
    let projects: Vec<Value> = state
        .projects
        .iter()
        .filter(|p| p["_id"].as_str().is_some_and(|id| state.owned.contains(id)))
        .cloned()
        .collect();
    Ok(Json(json!({ "user": state.user, "projects": projects })))
}

async fn create_project(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    if body["title"].as_str().unwrap_or_default().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title is required".to_string()));
    }
    state.next_id += 1;
    let id = format!("{}-{}", state.next_id, uuid::Uuid::new_v4().simple());
    let mut created = body.clone();
    created["_id"] = json!(id);
    created["views"] = json!(0);
    created["createdAt"] = json!("2024-01-01T00:00:00.000Z");
    state.projects.push(created.clone());
    state.owned.insert(id);
    Ok(Json(created))
}

async fn update_project(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    let project = state
        .projects
        .iter_mut()
        .find(|p| p["_id"] == json!(id))
        .ok_or((StatusCode::NOT_FOUND, "Project not found".to_string()))?;
    if let Value::Object(fields) = body {
        for (key, value) in fields {
            project[key.as_str()] = value;
        }
    }
    project["previewTitle"] = json!("Server preview");
    Ok(Json(project.clone()))
}

async fn delete_project(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    let before = state.projects.len();
    state.projects.retain(|p| p["_id"] != json!(id));
    if state.projects.len() == before {
        return Err((StatusCode::NOT_FOUND, "Project not found".to_string()));
    }
    state.owned.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn login(State(shared): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = shared.lock().unwrap();
    injected_failure(&mut state)?;
    if body["email"] == json!(EMAIL) && body["password"] == json!(PASSWORD) {
        Ok(Json(json!({ "token": TOKEN })))
    } else {
        Err((StatusCode::UNAUTHORIZED, "\"Invalid credentials\"".to_string()))
    }
}

async fn update_me(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    let mut user = state.user.clone().unwrap_or_else(|| json!({}));
    user["name"] = body["name"].clone();
    state.user = Some(user.clone());
    Ok(Json(json!({ "user": user })))
}

async fn delete_me(
    State(shared): State<Shared>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = shared.lock().unwrap();
    authorize(&mut state, &headers)?;
    injected_failure(&mut state)?;
    state.user = None;
    Ok(StatusCode::OK)
}
