//! Storage gateway: the single source of truth for resource records.
//!
//! Handlers are generic over [`Store`]; [`PgStore`] talks to PostgreSQL through a
//! pooled connection per query or transaction, [`MemoryStore`] keeps rows behind a lock.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::Resource;
use crate::query::QueryPlan;
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Filtered, sorted, paginated page of records.
    async fn list<R: Resource>(&self, plan: &QueryPlan) -> Result<Vec<R>, AppError>;

    /// Number of records matching the plan filters (ignores sort and pagination).
    async fn count<R: Resource>(&self, plan: &QueryPlan) -> Result<u64, AppError>;

    async fn get<R: Resource>(&self, id: &str) -> Result<Option<R>, AppError>;

    /// Insert records that already carry their ids. All or nothing: the first unique
    /// collision, against stored rows or earlier records in the batch, aborts the batch
    /// with [`AppError::Conflict`].
    async fn insert_batch<R: Resource>(&self, records: Vec<R>) -> Result<Vec<R>, AppError>;

    /// Overwrite every attribute of the row with `record.id()`. Returns false when no row
    /// has that id.
    async fn replace<R: Resource>(&self, record: &R) -> Result<bool, AppError>;

    /// Returns false when no row has that id.
    async fn delete<R: Resource>(&self, id: &str) -> Result<bool, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
