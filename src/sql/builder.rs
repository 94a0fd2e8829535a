//! Builds parameterized SELECT, COUNT, INSERT, UPDATE, DELETE for a resource.

use crate::models::Resource;
use crate::query::QueryPlan;

/// Quote identifier for PostgreSQL (safe: only from static allow-lists).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: impl Into<String>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// SELECT list: id first, then attribute columns in storage order.
fn select_column_list<R: Resource>() -> String {
    std::iter::once("id")
        .chain(R::FIELDS.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// WHERE clause from plan filters; empty string when there are none.
fn where_clause(q: &mut QueryBuf, plan: &QueryPlan) -> String {
    let mut parts = Vec::new();
    for (col, val) in &plan.filters {
        let n = q.push_param(val.as_str());
        parts.push(format!("{} = ${}", quoted(col), n));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// SELECT with exact-match filters, requested ORDER BY (none if no directive survived), LIMIT/OFFSET.
pub fn select_list<R: Resource>(plan: &QueryPlan) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, plan);
    let order_clause = if plan.sort.is_empty() {
        String::new()
    } else {
        let parts: Vec<String> = plan
            .sort
            .iter()
            .map(|(col, dir)| format!("{} {}", quoted(col), dir.as_sql()))
            .collect();
        format!(" ORDER BY {}", parts.join(", "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        select_column_list::<R>(),
        quoted(R::TABLE),
        where_clause,
        order_clause,
        plan.limit,
        plan.offset()
    );
    q
}

/// COUNT with the same filters as [`select_list`] but no ordering or pagination.
pub fn count<R: Resource>(plan: &QueryPlan) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, plan);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(R::TABLE), where_clause);
    q
}

/// SELECT by id. Caller adds id as sole param.
pub fn select_by_id<R: Resource>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list::<R>(),
        quoted(R::TABLE),
        quoted("id")
    )
}

/// Locks the row with id `$1` until the transaction ends. No row means no such record.
pub fn lock_by_id<R: Resource>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 FOR UPDATE",
        quoted("id"),
        quoted(R::TABLE),
        quoted("id")
    )
}

/// Finds another row holding the unique value. `$1` is the value, `$2` the id to exclude.
pub fn select_unique_holder<R: Resource>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 AND {} <> $2 LIMIT 1",
        quoted("id"),
        quoted(R::TABLE),
        quoted(R::UNIQUE_FIELD),
        quoted("id")
    )
}

/// INSERT id plus every attribute column.
pub fn insert<R: Resource>(record: &R) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    cols.push(quoted("id"));
    placeholders.push(format!("${}", q.push_param(record.id())));
    for (col, val) in R::FIELDS.iter().zip(record.values()) {
        cols.push(quoted(col));
        placeholders.push(format!("${}", q.push_param(val)));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(R::TABLE),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// Full-field UPDATE by id; id is the last param.
pub fn update<R: Resource>(record: &R) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in R::FIELDS.iter().zip(record.values()) {
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let id_param = q.push_param(record.id());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(R::TABLE),
        sets.join(", "),
        quoted("id"),
        id_param
    );
    q
}

/// DELETE by id. Caller adds id as sole param.
pub fn delete<R: Resource>() -> String {
    format!("DELETE FROM {} WHERE {} = $1", quoted(R::TABLE), quoted("id"))
}
