//! In-process fake of the SweeperKeeper backend
//!
//! Serves the five endpoints of the HTTP contract from an axum router bound
//! to an ephemeral localhost port. Tests seed users, casinos and accounts,
//! inject failures or delays per endpoint, and read back hit counts.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use sweeperkeeper_core::{Account, Casino, ClientConfig, Coins, Credentials};
use tokio::sync::watch;
use tokio::task::JoinHandle;

const SESSION_COOKIE: &str = "session";

/// Routes of the backend contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Casinos,
    Accounts,
    Claim,
    Analytics,
}

#[derive(Default)]
struct BackendData {
    users: HashMap<String, String>,
    casinos: Vec<Casino>,
    accounts: HashMap<String, Vec<Account>>,
    claimed_total: HashMap<String, f64>,
    sessions: HashMap<String, String>,
    next_session: u64,
    hits: HashMap<Endpoint, usize>,
    failures: HashMap<Endpoint, u16>,
    delays: HashMap<Endpoint, Duration>,
    login_body: Option<serde_json::Value>,
}

#[derive(Clone, Default)]
struct BackendState {
    inner: Arc<Mutex<BackendData>>,
}

impl BackendState {
    fn data(&self) -> MutexGuard<'_, BackendData> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the hit, apply the configured delay and return the injected
    /// failure response, if any
    async fn enter(&self, endpoint: Endpoint) -> Option<Response> {
        let (delay, failure) = {
            let mut data = self.data();
            *data.hits.entry(endpoint).or_insert(0) += 1;
            (
                data.delays.get(&endpoint).copied(),
                data.failures.get(&endpoint).copied(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        failure.map(|status| {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": "injected failure" }))).into_response()
        })
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<String> {
        let token = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, token)| token.to_string())?;

        self.data().sessions.get(&token).cloned()
    }
}

/// Running fake backend; stops when [`FakeBackend::shutdown`] is awaited
pub struct FakeBackend {
    addr: SocketAddr,
    state: BackendState,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind to an ephemeral localhost port and start serving
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");

        let state = BackendState::default();
        let app = router(state.clone());

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown_tx,
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this backend
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url()).with_timeout(Duration::from_secs(2))
    }

    pub fn add_user(&self, credentials: &Credentials) {
        self.state
            .data()
            .users
            .insert(credentials.username.clone(), credentials.password.clone());
    }

    pub fn set_casinos(&self, casinos: Vec<Casino>) {
        self.state.data().casinos = casinos;
    }

    pub fn set_accounts(&self, username: &str, accounts: Vec<Account>) {
        self.state.data().accounts.insert(username.to_string(), accounts);
    }

    /// Current server-side accounts of a user
    pub fn accounts_of(&self, username: &str) -> Vec<Account> {
        self.state.data().accounts.get(username).cloned().unwrap_or_default()
    }

    /// Make every request to `endpoint` answer with `status`
    pub fn fail_with(&self, endpoint: Endpoint, status: u16) {
        self.state.data().failures.insert(endpoint, status);
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.state.data().failures.remove(&endpoint);
    }

    /// Answer every login with `body` and status 200, whatever the credentials
    pub fn respond_to_login_with(&self, body: serde_json::Value) {
        self.state.data().login_body = Some(body);
    }

    /// Hold every request to `endpoint` for `delay` before answering
    pub fn set_delay(&self, endpoint: Endpoint, delay: Duration) {
        self.state.data().delays.insert(endpoint, delay);
    }

    pub fn clear_delay(&self, endpoint: Endpoint) {
        self.state.data().delays.remove(&endpoint);
    }

    /// Number of requests that reached `endpoint`
    pub fn hits(&self, endpoint: Endpoint) -> usize {
        self.state.data().hits.get(&endpoint).copied().unwrap_or(0)
    }

    /// Stop accepting connections and wait for the server task to end
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// Configuration for a backend that refuses connections
pub async fn unreachable_config() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);

    ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(2))
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/api/casinos", get(casinos))
        .route("/api/accounts", get(accounts))
        .route("/claim_coins/{id}", get(claim_coins))
        .route("/analytics", get(analytics))
        .with_state(state)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "login required" }))).into_response()
}

async fn login(State(state): State<BackendState>, Json(credentials): Json<Credentials>) -> Response {
    if let Some(failure) = state.enter(Endpoint::Login).await {
        return failure;
    }

    let mut data = state.data();
    if let Some(body) = data.login_body.clone() {
        return Json(body).into_response();
    }

    let valid = data
        .users
        .get(&credentials.username)
        .is_some_and(|password| *password == credentials.password);

    if !valid {
        return Json(json!({ "success": false, "message": "Invalid username or password" }))
            .into_response();
    }

    data.next_session += 1;
    let token = format!("{}-{}", credentials.username, data.next_session);
    data.sessions.insert(token.clone(), credentials.username.clone());

    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);
    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "username": credentials.username })),
    )
        .into_response()
}

async fn casinos(State(state): State<BackendState>) -> Response {
    if let Some(failure) = state.enter(Endpoint::Casinos).await {
        return failure;
    }
    Json(state.data().casinos.clone()).into_response()
}

async fn accounts(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    if let Some(failure) = state.enter(Endpoint::Accounts).await {
        return failure;
    }
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };

    let accounts = state.data().accounts.get(&user).cloned().unwrap_or_default();
    Json(accounts).into_response()
}

async fn claim_coins(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = state.enter(Endpoint::Claim).await {
        return failure;
    }
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };

    let mut data = state.data();
    let claimed = data
        .accounts
        .get_mut(&user)
        .and_then(|accounts| accounts.iter_mut().find(|a| a.id.to_string() == id))
        .map(|account| std::mem::replace(&mut account.coins, Coins(0.0)).as_f64());

    match claimed {
        Some(amount) => {
            *data.claimed_total.entry(user).or_insert(0.0) += amount;
            Json(json!({ "success": true, "account_id": id, "claimed": amount })).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "account not found" }))).into_response(),
    }
}

async fn analytics(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    if let Some(failure) = state.enter(Endpoint::Analytics).await {
        return failure;
    }
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };

    let data = state.data();
    let total = data.claimed_total.get(&user).copied().unwrap_or(0.0);
    let accounts = data.accounts.get(&user).map(Vec::len).unwrap_or(0);
    Json(json!({ "total_coins_claimed": total, "accounts": accounts })).into_response()
}
