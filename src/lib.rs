//! School API: HTTPS CRUD service for teachers, students and execs.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, StoreKind};
pub use error::{AppError, ConfigError};
pub use models::{Exec, Resource, Student, Teacher};
pub use query::QueryPlan;
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
