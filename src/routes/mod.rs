//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::middleware::security_headers;
use crate::models::{Exec, Student, Teacher};
use crate::state::AppState;
use crate::store::Store;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application: common routes plus the three collections, traced, with security headers on every response.
pub fn app<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .merge(common_routes::<S>())
        .merge(resource_routes::<Teacher, S>())
        .merge(resource_routes::<Student, S>())
        .merge(resource_routes::<Exec, S>())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(security_headers))
}
