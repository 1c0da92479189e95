//! Infrastructure layer - External systems integration
//!
//! This module handles the durable credential store:
//! - Database connection and migrations
//! - The user repository (the store contract the services consume)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
