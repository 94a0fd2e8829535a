//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

const SUCCESS: &str = "success";

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub status: &'static str,
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub status: &'static str,
    pub count: u64,
    pub data: Vec<T>,
}

/// Acknowledgment for deletes.
#[derive(Serialize)]
pub struct Deleted {
    pub status: &'static str,
    pub id: String,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { status: SUCCESS, data }))
}

/// Page of results; `count` is the total number of matching rows, not the page size.
pub fn success_page<T: Serialize>(data: Vec<T>, count: u64) -> (StatusCode, Json<SuccessMany<T>>) {
    (StatusCode::OK, Json(SuccessMany { status: SUCCESS, count, data }))
}

pub fn success_many_created<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (StatusCode::CREATED, Json(SuccessMany { status: SUCCESS, count, data }))
}

pub fn deleted(id: String) -> (StatusCode, Json<Deleted>) {
    (StatusCode::OK, Json(Deleted { status: SUCCESS, id }))
}
