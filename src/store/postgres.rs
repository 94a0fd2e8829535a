//! PostgreSQL-backed store.

use super::Store;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{conflict_message, Resource};
use crate::query::QueryPlan;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgConnection, PgPool, Row};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(PgStore { pool })
    }

    /// Fails with a conflict when another row already holds the record's unique value.
    async fn ensure_unique<R: Resource>(conn: &mut PgConnection, record: &R) -> Result<(), AppError> {
        let sql = sql::select_unique_holder::<R>();
        tracing::debug!(sql = %sql, value = %record.unique_value(), "query");
        let holder: Option<String> = sqlx::query_scalar(&sql)
            .bind(record.unique_value())
            .bind(record.id())
            .fetch_optional(&mut *conn)
            .await?;
        if holder.is_some() {
            return Err(AppError::Conflict(conflict_message::<R>()));
        }
        Ok(())
    }

    async fn execute<R: Resource>(conn: &mut PgConnection, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let result = query.execute(&mut *conn).await.map_err(unique_violation::<R>)?;
        Ok(result.rows_affected())
    }
}

/// A unique-index violation that slipped past the pre-check (concurrent writers) is still a conflict.
fn unique_violation<R: Resource>(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(conflict_message::<R>()),
        _ => AppError::Db(e),
    }
}

fn from_row<R: Resource>(row: &PgRow) -> Result<R, sqlx::Error> {
    let id: String = row.try_get(0)?;
    let mut values = Vec::with_capacity(R::FIELDS.len());
    for i in 0..R::FIELDS.len() {
        let v: Option<String> = row.try_get(i + 1)?;
        values.push(v.unwrap_or_default());
    }
    Ok(R::from_parts(id, values))
}

#[async_trait]
impl Store for PgStore {
    async fn list<R: Resource>(&self, plan: &QueryPlan) -> Result<Vec<R>, AppError> {
        let q = sql::select_list::<R>(plan);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        let records = rows.iter().map(from_row::<R>).collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn count<R: Resource>(&self, plan: &QueryPlan) -> Result<u64, AppError> {
        let q = sql::count::<R>(plan);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let n = query.fetch_one(&self.pool).await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<Option<R>, AppError> {
        let sql = sql::select_by_id::<R>();
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(from_row::<R>).transpose()?)
    }

    async fn insert_batch<R: Resource>(&self, records: Vec<R>) -> Result<Vec<R>, AppError> {
        let mut tx = self.pool.begin().await?;
        for record in &records {
            // Earlier inserts in this transaction are visible, so in-batch duplicates collide too.
            Self::ensure_unique(&mut tx, record).await?;
            Self::execute::<R>(&mut tx, &sql::insert(record)).await?;
        }
        tx.commit().await?;
        Ok(records)
    }

    async fn replace<R: Resource>(&self, record: &R) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        // Existence first: a missing id is not found even when its email collides.
        let lock = sql::lock_by_id::<R>();
        tracing::debug!(sql = %lock, id = %record.id(), "query");
        let existing: Option<String> = sqlx::query_scalar(&lock)
            .bind(record.id())
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            return Ok(false);
        }
        Self::ensure_unique(&mut tx, record).await?;
        let affected = Self::execute::<R>(&mut tx, &sql::update(record)).await?;
        if affected == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<bool, AppError> {
        let sql = sql::delete::<R>();
        tracing::debug!(sql = %sql, id = %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
