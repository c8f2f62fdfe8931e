use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_TOKEN: &str = "mock-admin-token";
pub const ADMIN_EMAIL: &str = "admin@solar.example";
pub const ADMIN_PASSWORD: &str = "secret";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub link: Option<String>,
    pub image: Option<UploadedFile>,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<String>,
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
    banners: Arc<RwLock<HashMap<Uuid, Banner>>>,
}

/// Handler failure rendered as `{"message": ...}` with the matching status.
#[derive(Debug)]
pub enum MockError {
    Unauthorized,
    NotFound(&'static str),
    Validation(String),
    BadRequest(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            MockError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthenticated.".to_string()),
            MockError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            MockError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            MockError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        token: Arc::new(token.to_string()),
        categories: Arc::new(RwLock::new(HashMap::new())),
        banners: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(profile))
        .route("/api/admin/categories", get(list_categories).post(create_category))
        .route(
            "/api/admin/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/admin/banners", get(list_banners).post(create_banner))
        .route("/debug/echo", post(echo))
        .route("/debug/request", any(describe_request))
        .route("/debug/status/{code}", any(status_reply))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_token(listener, DEFAULT_TOKEN).await
}

pub async fn run_with_token(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), MockError> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    if presented == state.token.as_str() {
        Ok(())
    } else {
        tracing::debug!("rejected bearer token");
        Err(MockError::Unauthorized)
    }
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, MockError> {
    if input.email != ADMIN_EMAIL || input.password != ADMIN_PASSWORD {
        return Err(MockError::Validation("These credentials do not match our records.".into()));
    }
    Ok(Json(json!({
        "token": state.token.as_str(),
        "user": { "id": 1, "email": ADMIN_EMAIL, "role": "admin" },
    })))
}

async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    authorize(&state, &headers)?;
    Ok(Json(json!({ "id": 1, "email": ADMIN_EMAIL, "role": "admin" })))
}

async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Category>>, MockError> {
    authorize(&state, &headers)?;
    let categories = state.categories.read().await;
    let mut all: Vec<Category> = categories.values().cloned().collect();
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(all))
}

fn validate_name(
    name: &str,
    existing: &HashMap<Uuid, Category>,
    skip: Option<Uuid>,
) -> Result<String, MockError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MockError::Validation("The name field is required.".into()));
    }
    if existing.values().any(|c| c.name == name && Some(c.id) != skip) {
        return Err(MockError::Validation("The name has already been taken.".into()));
    }
    Ok(name.to_string())
}

async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), MockError> {
    authorize(&state, &headers)?;
    let mut categories = state.categories.write().await;
    let name = validate_name(&input.name, &categories, None)?;
    let category = Category { id: Uuid::new_v4(), name };
    categories.insert(category.id, category.clone());
    tracing::info!(id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, MockError> {
    authorize(&state, &headers)?;
    let categories = state.categories.read().await;
    categories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(MockError::NotFound("Category"))
}

async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, MockError> {
    authorize(&state, &headers)?;
    let mut categories = state.categories.write().await;
    if !categories.contains_key(&id) {
        return Err(MockError::NotFound("Category"));
    }
    let name = validate_name(&input.name, &categories, Some(id))?;
    let category = categories.get_mut(&id).ok_or(MockError::NotFound("Category"))?;
    category.name = name;
    Ok(Json(category.clone()))
}

async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MockError> {
    authorize(&state, &headers)?;
    let mut categories = state.categories.write().await;
    categories
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(MockError::NotFound("Category"))
}

async fn list_banners(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Banner>>, MockError> {
    authorize(&state, &headers)?;
    let banners = state.banners.read().await;
    Ok(Json(banners.values().cloned().collect()))
}

async fn create_banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Banner>), MockError> {
    authorize(&state, &headers)?;

    let mut title = None;
    let mut link = None;
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MockError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| MockError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "title" => title = Some(String::from_utf8_lossy(&data).into_owned()),
            "link" => link = Some(String::from_utf8_lossy(&data).into_owned()),
            "image" => {
                image = Some(UploadedFile {
                    filename: filename.unwrap_or_default(),
                    content_type,
                    size: data.len(),
                })
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| MockError::Validation("The title field is required.".into()))?;
    let banner = Banner {
        id: Uuid::new_v4(),
        title,
        link,
        image,
    };
    state.banners.write().await.insert(banner.id, banner.clone());
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Answer 201 with the request body verbatim.
async fn echo(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/json"));
    (StatusCode::CREATED, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Report what arrived: method, auth and content-type headers, body size.
async fn describe_request(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "authorization": header_str(header::AUTHORIZATION),
        "content_type": header_str(header::CONTENT_TYPE),
        "body_len": body.len(),
    }))
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub message: Option<String>,
}

/// Answer with the status from the path; `?message=` adds a message field.
async fn status_reply(Path(code): Path<u16>, Query(query): Query<StatusQuery>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut body = json!({ "status_code": code });
    if let Some(message) = query.message {
        body["message"] = Value::String(message);
    }
    (status, Json(body)).into_response()
}
