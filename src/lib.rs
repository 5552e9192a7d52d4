pub mod config;
pub mod database;
pub mod doc;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::database::user_store::UserStore;
use crate::services::{health_service::HealthService, user_service::UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub health_service: HealthService,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, health_timeout: Duration) -> Self {
        let user_service = UserService::new(store.clone());
        let health_service = HealthService::new(store, health_timeout);

        Self {
            user_service,
            health_service,
        }
    }
}
