//! Resource CRUD routes: one collection prefix per [`Resource`] descriptor.
//! The collection is served with and without a trailing slash; `/<table>/:id` (trailing slash allowed) addresses one record.

use crate::handlers::resource::{create, delete, list, patch, read, replace};
use crate::models::Resource;
use crate::state::AppState;
use crate::store::Store;
use axum::{
    routing::{get, MethodRouter},
    Router,
};

pub fn resource_routes<R: Resource, S: Store>() -> Router<AppState<S>> {
    let base = format!("/{}", R::TABLE);
    Router::new()
        .route(&base, get(list::<R, S>).post(create::<R, S>))
        .route(&format!("{}/", base), get(list::<R, S>).post(create::<R, S>))
        .route(&format!("{}/:id", base), item::<R, S>())
        .route(&format!("{}/:id/", base), item::<R, S>())
}

fn item<R: Resource, S: Store>() -> MethodRouter<AppState<S>> {
    get(read::<R, S>)
        .put(replace::<R, S>)
        .patch(patch::<R, S>)
        .delete(delete::<R, S>)
}
