mod common;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{error_message, send};
use school_api::{app, AppError, AppState, MemoryStore, QueryPlan, Resource, Store};

/// Delegates to a seeded [`MemoryStore`] but fails every COUNT.
struct CountFails(MemoryStore);

#[async_trait]
impl Store for CountFails {
    async fn list<R: Resource>(&self, plan: &QueryPlan) -> Result<Vec<R>, AppError> {
        self.0.list(plan).await
    }

    async fn count<R: Resource>(&self, _plan: &QueryPlan) -> Result<u64, AppError> {
        Err(AppError::Db(sqlx::Error::Protocol("relation \"teachers\" is locked".into())))
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<Option<R>, AppError> {
        self.0.get(id).await
    }

    async fn insert_batch<R: Resource>(&self, records: Vec<R>) -> Result<Vec<R>, AppError> {
        self.0.insert_batch(records).await
    }

    async fn replace<R: Resource>(&self, record: &R) -> Result<bool, AppError> {
        self.0.replace(record).await
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<bool, AppError> {
        self.0.delete::<R>(id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.0.ping().await
    }
}

#[tokio::test]
async fn count_failure_fails_the_list_without_leaking_detail() -> Result<()> {
    let router = app(AppState::new(CountFails(MemoryStore::seeded())));

    let resp = send(&router, Method::GET, "/teachers/", None).await?;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["error"]["code"], "database_error");
    assert_eq!(error_message(&resp.body), "Database query error");
    assert!(!resp.body.to_string().contains("locked"));
    assert!(resp.body.get("data").is_none());

    // Reads that do not count are unaffected.
    let one = send(&router, Method::GET, "/teachers/1", None).await?;
    assert_eq!(one.status, StatusCode::OK);
    Ok(())
}
