#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use user_service::{
    config::Config,
    database::user_store::UserStore,
    error::{Error, Result},
    models::user::{NewUser, User},
    routes::build_router,
    AppState,
};

/// In-process stand-in for the Postgres store with the same uniqueness rule.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI32,
    unreachable: AtomicBool,
    ping_delay: Option<Duration>,
    list_delay: Option<Duration>,
    panic_on_list: bool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ping_delay(mut self, delay: Duration) -> Self {
        self.ping_delay = Some(delay);
        self
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub fn panicking_on_list(mut self) -> Self {
        self.panic_on_list = true;
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn count_email(&self, email: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .count()
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(Error::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        if self.panic_on_list {
            panic!("list exploded");
        }
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        self.check_reachable()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        self.check_reachable()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(Error::Conflict("Email already exists".into()));
        }
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: user.name,
            email: user.email,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn ping(&self) -> Result<()> {
        if let Some(delay) = self.ping_delay {
            tokio::time::sleep(delay).await;
        }
        self.check_reachable()
    }
}

pub fn test_config() -> Config {
    Config::from_source(|_| None).expect("default config")
}

pub fn app_with(store: Arc<MemoryUserStore>, config: &Config) -> Router {
    let state = AppState::new(store, config.health_timeout);
    build_router(state, config)
}

pub fn setup_app() -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    (app_with(store.clone(), &test_config()), store)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let (status, bytes) = send(app, req).await;
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("non-JSON body ({e}): {}", String::from_utf8_lossy(&bytes)));
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}
