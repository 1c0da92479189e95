//! Application state - Dependency injection container.
//!
//! Provides centralized access to the auth service and infrastructure.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{AuthService, Authenticator};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database.
    ///
    /// Wires the SeaORM-backed credential store into the auth service.
    pub fn from_config(database: Arc<Database>) -> Self {
        let store = Arc::new(UserStore::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::new(store));

        Self {
            auth_service,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(auth_service: Arc<dyn AuthService>, database: Arc<Database>) -> Self {
        Self {
            auth_service,
            database,
        }
    }
}
