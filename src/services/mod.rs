//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion; the credential store handle is injected at
//! construction.

mod auth_service;

pub use auth_service::{AuthService, Authenticator};
