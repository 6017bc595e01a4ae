//! In-process stand-in for the employee backend.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use api::{ApiClient, Config, Session};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use types::Employee;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret99";
pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct Backend {
    pub employees: Vec<Employee>,
    pub users: HashMap<String, String>,
    pub next_id: u32,
    /// Query string of every `GET /employees`.
    pub list_queries: Vec<HashMap<String, String>>,
    /// Body of every create/update.
    pub bodies: Vec<Value>,
    /// `Authorization` header of every request, as sent.
    pub auth_headers: Vec<Option<String>>,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct TestEnv {
    pub backend: Shared,
    pub client: ApiClient,
}

impl TestEnv {
    pub async fn start() -> Self {
        let backend = Shared::default();
        backend
            .lock()
            .unwrap()
            .users
            .insert(USERNAME.to_string(), PASSWORD.to_string());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = Config::with_base_url(&format!("http://{addr}/api")).unwrap();
        let client = ApiClient::new(config, Session::in_memory());

        Self {
            backend,
            client,
        }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    pub fn seed(&self, employee: Value) {
        let mut backend = self.backend();
        backend.next_id += 1;
        let mut employee = employee;
        employee["_id"] = json!(format!("emp-{}", backend.next_id));
        backend
            .employees
            .push(serde_json::from_value(employee).unwrap());
    }
}

pub fn employee_json(name: &str, department: &str, status: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phone": "13800000000",
        "department": department,
        "position": "Staff",
        "salary": 8000,
        "hireDate": "2021-06-01T00:00:00.000Z",
        "status": status
    })
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/employees", get(list).post(create))
        .route("/api/employees/departments", get(departments))
        .route(
            "/api/employees/{id}",
            get(fetch_one).put(update).delete(remove),
        )
        .with_state(backend)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Record the header and reject anything but the issued token.
fn authorize(backend: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let expected = format!("Bearer {TOKEN}");
    let ok = header.as_deref() == Some(expected.as_str());
    backend.lock().unwrap().auth_headers.push(header);

    if ok {
        Ok(())
    } else {
        Err(message(StatusCode::UNAUTHORIZED, "Token is invalid or expired"))
    }
}

async fn login(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let backend = backend.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if backend.users.get(username).map(String::as_str) == Some(password) {
        Json(json!({ "token": TOKEN, "user": { "username": username } })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid username or password")
    }
}

async fn register(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    if backend.users.contains_key(&username) {
        return message(StatusCode::BAD_REQUEST, "Username already exists");
    }
    backend.users.insert(username, password);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User registered" })),
    )
        .into_response()
}

async fn reset_password(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default();
    let Some(new_password) = body["newPassword"].as_str() else {
        return message(StatusCode::BAD_REQUEST, "newPassword is required");
    };

    match backend.users.get_mut(username) {
        Some(password) => {
            *password = new_password.to_string();
            StatusCode::NO_CONTENT.into_response()
        }
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn list(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let mut backend = backend.lock().unwrap();
    backend.list_queries.push(params.clone());

    let param = |key: &str| params.get(key).cloned().unwrap_or_default();
    let page: usize = param("page").parse().unwrap_or(1);
    let limit: usize = param("limit").parse().unwrap_or(10);
    let search = param("search").to_lowercase();
    let department = param("department");
    let status = param("status");

    let matching: Vec<&Employee> = backend
        .employees
        .iter()
        .filter(|e| {
            search.is_empty()
                || e.name.to_lowercase().contains(&search)
                || e.email.to_lowercase().contains(&search)
                || e.phone.contains(&search)
        })
        .filter(|e| department.is_empty() || e.department == department)
        .filter(|e| status.is_empty() || e.status.as_str() == status)
        .collect();

    let total = matching.len();
    let employees: Vec<&Employee> = matching
        .into_iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .collect();

    Json(json!({
        "employees": employees,
        "total": total,
        "totalPages": total.div_ceil(limit),
    }))
    .into_response()
}

async fn departments(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let backend = backend.lock().unwrap();
    let mut names: Vec<&str> = backend
        .employees
        .iter()
        .map(|e| e.department.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();
    Json(names).into_response()
}

async fn fetch_one(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let backend = backend.lock().unwrap();
    match backend.employees.iter().find(|e| e.id == id) {
        Some(employee) => Json(employee).into_response(),
        None => message(StatusCode::NOT_FOUND, "Employee not found"),
    }
}

/// Validate like the real backend does and turn a body into a record.
fn to_record(id: String, body: &Value) -> Result<Employee, Response> {
    for field in ["name", "email", "phone", "department", "position"] {
        if body[field].as_str().is_none_or(str::is_empty) {
            return Err(message(
                StatusCode::BAD_REQUEST,
                &format!("{field} is required"),
            ));
        }
    }
    if body["salary"].is_null() {
        return Err(message(StatusCode::BAD_REQUEST, "salary is required"));
    }

    let mut record = body.clone();
    record["_id"] = json!(id);
    serde_json::from_value(record)
        .map_err(|e| message(StatusCode::BAD_REQUEST, &e.to_string()))
}

async fn create(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());
    let id = format!("emp-{}", backend.next_id + 1);

    match to_record(id, &body) {
        Ok(employee) => {
            backend.next_id += 1;
            backend.employees.push(employee.clone());
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(rejection) => rejection,
    }
}

async fn update(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());

    let Some(index) = backend.employees.iter().position(|e| e.id == id) else {
        return message(StatusCode::NOT_FOUND, "Employee not found");
    };
    match to_record(id, &body) {
        Ok(employee) => {
            backend.employees[index] = employee.clone();
            Json(employee).into_response()
        }
        Err(rejection) => rejection,
    }
}

async fn remove(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(rejection) = authorize(&backend, &headers) {
        return rejection;
    }

    let mut backend = backend.lock().unwrap();
    let before = backend.employees.len();
    backend.employees.retain(|e| e.id != id);

    if backend.employees.len() == before {
        message(StatusCode::NOT_FOUND, "Employee not found")
    } else {
        Json(json!({ "message": "Employee deleted" })).into_response()
    }
}
