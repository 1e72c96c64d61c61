//! In-memory mock of the AutoHub REST backend.
//!
//! Serves the fixture records of every entity with the usual
//! `{ success, data, message }` envelope. When a token is configured, the
//! record routes require `Authorization: Bearer <token>`.

use crate::api::Envelope;
use crate::error::Result;
use crate::record::{CarUser, Customer, Employee, Entity, Inspection, Order, Record};
use crate::validation::is_strong_password;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

pub struct MockApiConfig {
    pub port: u16,
    /// Bearer token required on record routes, and handed out by login.
    pub token: Option<String>,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            token: None,
        }
    }
}

/// Demo accounts accepted by `POST /api/auth/login`.
const ACCOUNTS: &[(&str, &str, &str, &str)] = &[
    ("admin@autohub.lk", "Admin123", "Admin", "admin"),
    ("vendor@autohub.lk", "Vendor123", "Lanka Auto Parts", "vendor"),
    ("service@autohub.lk", "Service123", "City Service Center", "service_center"),
    ("customer@autohub.lk", "Customer123", "Kamal Perera", "customer"),
];

pub struct MockState {
    pub token: Option<String>,
    records: RwLock<HashMap<Entity, Vec<Value>>>,
    /// Current password per demo account email.
    passwords: RwLock<HashMap<String, String>>,
}

impl MockState {
    /// State seeded with every entity's fixtures.
    pub fn with_fixtures(token: Option<String>) -> Result<Arc<Self>> {
        let mut records = HashMap::new();
        for entity in Entity::ALL {
            records.insert(entity, entity.fixtures_json()?);
        }
        let passwords = ACCOUNTS
            .iter()
            .map(|(email, password, _, _)| (email.to_string(), password.to_string()))
            .collect();
        Ok(Arc::new(Self {
            token,
            records: RwLock::new(records),
            passwords: RwLock::new(passwords),
        }))
    }

    pub async fn count(&self, entity: Entity) -> usize {
        self.records.read().await.get(&entity).map_or(0, Vec::len)
    }
}

type Reply = (StatusCode, Json<Envelope<Value>>);

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(Envelope::ok(data)))
}

fn fail(status: StatusCode, message: impl Into<String>) -> Reply {
    (status, Json(Envelope::fail(message)))
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/password", post(password_handler))
        .route("/api/{entity}", get(list_handler).post(create_handler))
        .route("/api/{entity}/{id}", delete(delete_handler))
        .route("/api/{entity}/{id}/status", patch(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: Arc<MockState>) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn run(config: MockApiConfig) -> Result<()> {
    let state = MockState::with_fixtures(config.token)?;
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!(
        port = config.port,
        auth = state.token.is_some(),
        "mock API listening"
    );
    serve(listener, state).await
}

async fn health_handler(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    let mut counts = serde_json::Map::new();
    for entity in Entity::ALL {
        counts.insert(entity.endpoint().to_string(), json!(state.count(entity).await));
    }
    Json(json!({ "status": "ok", "records": counts }))
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login_handler(
    State(state): State<Arc<MockState>>,
    Json(body): Json<LoginBody>,
) -> Reply {
    let email = body.email.trim().to_lowercase();
    let passwords = state.passwords.read().await;
    let account = ACCOUNTS.iter().enumerate().find(|(_, (e, _, _, _))| {
        *e == email && passwords.get(*e).is_some_and(|p| *p == body.password)
    });

    match account {
        Some((index, (email, _, name, role))) => {
            let token = state
                .token
                .clone()
                .unwrap_or_else(|| format!("mock-token-{}", index + 1));
            info!(%email, role, "login");
            ok(json!({
                "token": token,
                "user": { "id": index + 1, "name": name, "email": email, "role": role }
            }))
        }
        None => {
            warn!(%email, "login rejected");
            fail(StatusCode::UNAUTHORIZED, "Invalid email or password")
        }
    }
}

fn check_token(state: &MockState, headers: &HeaderMap) -> std::result::Result<(), Reply> {
    if let Some(expected) = &state.token {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(expected.as_str()) {
            return Err(fail(StatusCode::UNAUTHORIZED, "Missing or invalid token"));
        }
    }
    Ok(())
}

/// Resolve the entity segment and check the bearer token.
fn guard(state: &MockState, headers: &HeaderMap, segment: &str) -> std::result::Result<Entity, Reply> {
    check_token(state, headers)?;
    Entity::parse(segment).map_err(|e| fail(StatusCode::NOT_FOUND, e.to_string()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody {
    email: String,
    current_password: String,
    new_password: String,
}

async fn password_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<PasswordBody>,
) -> Reply {
    if let Err(reply) = check_token(&state, &headers) {
        return reply;
    }
    let email = body.email.trim().to_lowercase();
    let mut passwords = state.passwords.write().await;
    let Some(current) = passwords.get_mut(&email) else {
        return fail(StatusCode::NOT_FOUND, format!("No account for {}", email));
    };
    if *current != body.current_password {
        warn!(%email, "password change rejected");
        return fail(StatusCode::UNAUTHORIZED, "Current password is incorrect");
    }
    if !is_strong_password(&body.new_password) {
        return fail(
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters with an uppercase letter and a digit",
        );
    }
    *current = body.new_password;
    info!(%email, "password changed");
    ok(json!({ "email": email }))
}

fn record_id(value: &Value) -> Option<u64> {
    value.get("id").and_then(Value::as_u64)
}

/// Check that a body decodes as the entity's record type.
fn check_shape(entity: Entity, value: &Value) -> serde_json::Result<()> {
    fn decode<R: Record>(value: &Value) -> serde_json::Result<()> {
        R::deserialize(value).map(|_| ())
    }
    match entity {
        Entity::CarUsers => decode::<CarUser>(value),
        Entity::Employees => decode::<Employee>(value),
        Entity::Customers => decode::<Customer>(value),
        Entity::Orders => decode::<Order>(value),
        Entity::Inspections => decode::<Inspection>(value),
    }
}

async fn list_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(segment): Path<String>,
) -> Reply {
    let entity = match guard(&state, &headers, &segment) {
        Ok(entity) => entity,
        Err(reply) => return reply,
    };
    let records = state.records.read().await;
    let rows = records.get(&entity).cloned().unwrap_or_default();
    debug!(entity = entity.endpoint(), count = rows.len(), "list");
    ok(Value::Array(rows))
}

async fn create_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(segment): Path<String>,
    Json(mut body): Json<Value>,
) -> Reply {
    let entity = match guard(&state, &headers, &segment) {
        Ok(entity) => entity,
        Err(reply) => return reply,
    };
    if !body.is_object() {
        return fail(StatusCode::BAD_REQUEST, "Expected a JSON object");
    }

    let mut records = state.records.write().await;
    let rows = records.entry(entity).or_default();

    let id = match record_id(&body) {
        Some(id) if id > 0 => {
            if rows.iter().any(|r| record_id(r) == Some(id)) {
                return fail(StatusCode::CONFLICT, format!("Record {} already exists", id));
            }
            id
        }
        _ => rows.iter().filter_map(record_id).max().unwrap_or(0) + 1,
    };
    body["id"] = json!(id);

    if let Err(e) = check_shape(entity, &body) {
        return fail(StatusCode::BAD_REQUEST, format!("Invalid record: {}", e));
    }

    rows.push(body.clone());
    info!(entity = entity.endpoint(), id, "created");
    (StatusCode::CREATED, Json(Envelope::ok(body)))
}

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

async fn status_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path((segment, id)): Path<(String, u64)>,
    Json(body): Json<StatusBody>,
) -> Reply {
    let entity = match guard(&state, &headers, &segment) {
        Ok(entity) => entity,
        Err(reply) => return reply,
    };
    let label = match entity
        .status_labels()
        .iter()
        .find(|label| label.eq_ignore_ascii_case(body.status.trim()))
    {
        Some(label) => *label,
        None => {
            return fail(
                StatusCode::BAD_REQUEST,
                format!("Invalid status '{}'", body.status),
            )
        }
    };

    let mut records = state.records.write().await;
    let row = records
        .get_mut(&entity)
        .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)));
    match row {
        Some(row) => {
            row["status"] = json!(label);
            info!(entity = entity.endpoint(), id, status = label, "status updated");
            ok(row.clone())
        }
        None => fail(StatusCode::NOT_FOUND, format!("Record {} not found", id)),
    }
}

async fn delete_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path((segment, id)): Path<(String, u64)>,
) -> Response {
    let entity = match guard(&state, &headers, &segment) {
        Ok(entity) => entity,
        Err(reply) => return reply.into_response(),
    };
    let mut records = state.records.write().await;
    let rows = records.entry(entity).or_default();
    let before = rows.len();
    rows.retain(|r| record_id(r) != Some(id));
    if rows.len() == before {
        return fail(StatusCode::NOT_FOUND, format!("Record {} not found", id)).into_response();
    }
    info!(entity = entity.endpoint(), id, "deleted");
    ok(json!({ "id": id })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{self, ApiClient, HttpClient, Method};
    use crate::error::Error;
    use crate::record::{CarUserStatus, OrderStatus};
    use crate::validation::{LoginForm, PasswordChange};
    use secrecy::SecretString;
    use std::net::SocketAddr;
    use std::time::Duration;

    async fn spawn(token: Option<&str>) -> SocketAddr {
        let state = MockState::with_fixtures(token.map(str::to_string)).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, state));
        addr
    }

    #[tokio::test]
    async fn test_health_and_list() {
        let addr = spawn(None).await;
        let client = reqwest::Client::new();

        let health: Value = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["records"]["car-users"], 10);

        let body: Value = client
            .get(format!("http://{}/api/orders", addr))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), Order::fixtures().len());
    }

    #[tokio::test]
    async fn test_unknown_entity_is_404() {
        let addr = spawn(None).await;
        let resp = reqwest::get(format!("http://{}/api/widgets", addr)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_token_is_enforced() {
        let addr = spawn(Some("secret")).await;
        let client = reqwest::Client::new();
        let url = format!("http://{}/api/employees", addr);

        let resp = client.get(&url).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        let resp = client.get(&url).bearer_auth("secret").send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_status_update_rejects_unknown_status() {
        let addr = spawn(None).await;
        let resp = reqwest::Client::new()
            .patch(format!("http://{}/api/orders/1/status", addr))
            .json(&json!({"status": "Teleported"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_rejects_bad_shape() {
        let addr = spawn(None).await;
        let client = reqwest::Client::new();
        let url = format!("http://{}/api/car-users", addr);

        let mut user = serde_json::to_value(&CarUser::fixtures()[0]).unwrap();
        user["id"] = json!(0);
        let body: Value = client.post(&url).json(&user).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["data"]["id"], 11);

        let resp = client.post(&url).json(&json!({"name": "x"})).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    /// Runs the server on its own runtime so the blocking client can drive it.
    fn spawn_blocking_server(token: Option<&'static str>) -> SocketAddr {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let state = MockState::with_fixtures(token.map(str::to_string)).unwrap();
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                let _ = serve(listener, state).await;
            });
        });
        rx.recv().unwrap()
    }

    #[test]
    fn test_http_client_end_to_end() {
        let addr = spawn_blocking_server(Some("tok"));
        let base = format!("http://{}", addr);
        let anonymous = HttpClient::new(&base, Duration::from_secs(5)).unwrap();

        // Record routes need the token.
        assert!(matches!(
            api::fetch_records::<Order>(&anonymous),
            Err(Error::Status { status: 401, .. })
        ));

        let form = LoginForm {
            email: "admin@autohub.lk".to_string(),
            password: "Admin123".to_string(),
        };
        let session = api::login(&anonymous, &form).unwrap();
        assert_eq!(session.token, "tok");

        let client = HttpClient::new(&base, Duration::from_secs(5))
            .unwrap()
            .with_token(SecretString::from(session.token));

        let orders: Vec<Order> = api::fetch_records(&client).unwrap();
        assert_eq!(orders.len(), Order::fixtures().len());

        let user: CarUser = api::update_status(&client, 1, "suspended").unwrap();
        assert_eq!(user.status, CarUserStatus::Suspended);

        let order: Order = api::update_status(&client, 2, "Delivered").unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        api::delete_record::<Order>(&client, 2).unwrap();
        assert!(matches!(
            api::delete_record::<Order>(&client, 2),
            Err(Error::Status { status: 404, .. })
        ));

        let raw = client.send(Method::Get, "/api/orders", None).unwrap();
        assert_eq!(raw["data"].as_array().unwrap().len(), Order::fixtures().len() - 1);
    }

    #[test]
    fn test_password_change_end_to_end() {
        let addr = spawn_blocking_server(None);
        let client = HttpClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let login = |password: &str| {
            api::login(
                &client,
                &LoginForm {
                    email: "vendor@autohub.lk".to_string(),
                    password: password.to_string(),
                },
            )
        };

        let wrong_current = PasswordChange {
            current: "Nope1234".to_string(),
            new: "Parts2024".to_string(),
            confirm: "Parts2024".to_string(),
        };
        assert!(matches!(
            api::change_password(&client, "vendor@autohub.lk", &wrong_current),
            Err(Error::Status { status: 401, .. })
        ));

        let change = PasswordChange {
            current: "Vendor123".to_string(),
            ..wrong_current
        };
        api::change_password(&client, "vendor@autohub.lk", &change).unwrap();

        assert!(matches!(login("Vendor123"), Err(Error::Status { status: 401, .. })));
        assert_eq!(login("Parts2024").unwrap().user.email, "vendor@autohub.lk");
    }

    #[tokio::test]
    async fn test_password_route_rejects_weak_password() {
        let addr = spawn(None).await;
        let resp = reqwest::Client::new()
            .post(format!("http://{}/api/auth/password", addr))
            .json(&json!({
                "email": "admin@autohub.lk",
                "currentPassword": "Admin123",
                "newPassword": "short"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_login_is_401() {
        let addr = spawn_blocking_server(None);
        let client = HttpClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let form = LoginForm {
            email: "admin@autohub.lk".to_string(),
            password: "wrong".to_string(),
        };
        let err = api::login(&client, &form).unwrap_err();
        assert!(matches!(err, Error::Status { status: 401, ref message } if message == "Invalid email or password"));
    }
}
