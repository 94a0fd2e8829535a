//! In-memory store: rows per table behind an `RwLock`, kept in insertion order.
//!
//! Evaluates a [`QueryPlan`] the same way the SQL builder renders it.

use super::Store;
use crate::error::AppError;
use crate::models::{conflict_message, Resource, Teacher};
use crate::query::{QueryPlan, SortDirection};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug)]
struct Row {
    id: String,
    values: Vec<String>,
}

impl Row {
    fn from_record<R: Resource>(record: &R) -> Self {
        Row {
            id: record.id().to_string(),
            values: record.values().into_iter().map(str::to_string).collect(),
        }
    }

    fn to_record<R: Resource>(&self) -> R {
        R::from_parts(self.id.clone(), self.values.clone())
    }

    fn value(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or_default()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store preloaded with the demo teachers.
    pub fn seeded() -> Self {
        let seed = [
            Teacher {
                id: "1".into(),
                first_name: "Juan".into(),
                last_name: "Perez".into(),
                email: "juan.perez@school.local".into(),
                class: "Apo".into(),
                subject: "Math".into(),
            },
            Teacher {
                id: "2".into(),
                first_name: "Pedro".into(),
                last_name: "Castro".into(),
                email: "pedro.castro@school.local".into(),
                class: "Rizal".into(),
                subject: "Science".into(),
            },
        ];
        let rows: Vec<Row> = seed.iter().map(Row::from_record).collect();
        let mut tables = HashMap::new();
        tables.insert(<Teacher as Resource>::TABLE, rows);
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<&'static str, Vec<Row>>>, AppError> {
        self.tables.read().map_err(|_| AppError::Internal("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<&'static str, Vec<Row>>>, AppError> {
        self.tables.write().map_err(|_| AppError::Internal("store lock poisoned".into()))
    }
}

fn column<R: Resource>(name: &str) -> Option<usize> {
    R::FIELDS.iter().position(|f| *f == name)
}

fn matches<R: Resource>(row: &Row, plan: &QueryPlan) -> bool {
    plan.filters
        .iter()
        .all(|(col, val)| column::<R>(col).map(|i| row.value(i) == val.as_str()).unwrap_or(false))
}

fn compare<R: Resource>(a: &Row, b: &Row, plan: &QueryPlan) -> Ordering {
    for (col, dir) in &plan.sort {
        let Some(i) = column::<R>(col) else { continue };
        let ord = a.value(i).cmp(b.value(i));
        let ord = match dir {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn unique_taken<R: Resource>(rows: &[Row], record: &R) -> bool {
    let Some(i) = column::<R>(R::UNIQUE_FIELD) else {
        return false;
    };
    rows.iter()
        .any(|r| r.id != record.id() && r.value(i) == record.unique_value())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list<R: Resource>(&self, plan: &QueryPlan) -> Result<Vec<R>, AppError> {
        let tables = self.read()?;
        let mut rows: Vec<&Row> = tables
            .get(R::TABLE)
            .map(|rows| rows.iter().filter(|r| matches::<R>(r, plan)).collect())
            .unwrap_or_default();
        if !plan.sort.is_empty() {
            rows.sort_by(|a, b| compare::<R>(a, b, plan));
        }
        let offset = usize::try_from(plan.offset()).unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(plan.limit as usize)
            .map(Row::to_record)
            .collect())
    }

    async fn count<R: Resource>(&self, plan: &QueryPlan) -> Result<u64, AppError> {
        let tables = self.read()?;
        let n = tables
            .get(R::TABLE)
            .map(|rows| rows.iter().filter(|r| matches::<R>(r, plan)).count())
            .unwrap_or(0);
        Ok(n as u64)
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<Option<R>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .get(R::TABLE)
            .and_then(|rows| rows.iter().find(|r| r.id == id))
            .map(Row::to_record))
    }

    async fn insert_batch<R: Resource>(&self, records: Vec<R>) -> Result<Vec<R>, AppError> {
        let mut tables = self.write()?;
        let table = tables.entry(R::TABLE).or_default();
        let mut staged = table.clone();
        for record in &records {
            if unique_taken(&staged, record) {
                return Err(AppError::Conflict(conflict_message::<R>()));
            }
            staged.push(Row::from_record(record));
        }
        *table = staged;
        Ok(records)
    }

    async fn replace<R: Resource>(&self, record: &R) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let Some(rows) = tables.get_mut(R::TABLE) else {
            return Ok(false);
        };
        let Some(pos) = rows.iter().position(|r| r.id == record.id()) else {
            return Ok(false);
        };
        if unique_taken(rows.as_slice(), record) {
            return Err(AppError::Conflict(conflict_message::<R>()));
        }
        rows[pos] = Row::from_record(record);
        Ok(true)
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let Some(rows) = tables.get_mut(R::TABLE) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
