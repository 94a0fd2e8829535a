//! Resource CRUD handlers: list, read, create (batch), replace, patch, delete.
//! Generic over the resource descriptor and the store; routes instantiate one set per collection.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::models::{apply_patch, not_found_message, Resource};
use crate::query::QueryPlan;
use crate::response::{deleted, success_many_created, success_one, success_page};
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::store::Store;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(not_found_message::<R>())
}

pub async fn list<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let plan = QueryPlan::from_params::<R>(&params)?;
    let (rows, count) = tokio::try_join!(state.store.list::<R>(&plan), state.store.count::<R>(&plan))?;
    Ok(success_page(rows, count))
}

pub async fn read<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store.get::<R>(&id).await?.ok_or_else(not_found::<R>)?;
    Ok(success_one(record))
}

/// Body is a JSON array. The whole batch is validated, then stored atomically.
pub async fn create<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Payload(mut records): Payload<Vec<R>>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_batch(&records)?;
    for record in &mut records {
        record.set_id(uuid::Uuid::new_v4().to_string());
    }
    let created = state.store.insert_batch(records).await?;
    tracing::info!(table = R::TABLE, count = created.len(), "created records");
    Ok(success_many_created(created))
}

pub async fn replace<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Payload(mut record): Payload<R>,
) -> Result<impl IntoResponse, AppError> {
    record.set_id(id);
    RequestValidator::validate(&record)?;
    if !state.store.replace(&record).await? {
        return Err(not_found::<R>());
    }
    Ok(Json(record))
}

/// Merges known fields into the stored record, then writes every field back.
pub async fn patch<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Payload(updates): Payload<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let mut record = state.store.get::<R>(&id).await?.ok_or_else(not_found::<R>)?;
    apply_patch(&mut record, &updates)?;
    RequestValidator::validate(&record)?;
    // The row can vanish between the read and the write.
    if !state.store.replace(&record).await? {
        return Err(not_found::<R>());
    }
    Ok(Json(record))
}

pub async fn delete<R: Resource, S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete::<R>(&id).await? {
        return Err(not_found::<R>());
    }
    Ok(deleted(id))
}
