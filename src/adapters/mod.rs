//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT and mock session validators
//! - `events` - Event publishers (tracing, in-memory)
//! - `http` - axum routers and handlers
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use events::{InMemoryEventBus, TracingEventPublisher};
