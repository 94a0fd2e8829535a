//! Per-request query plan: allow-listed filters, sort directives, pagination.
//!
//! Built from raw query-string pairs so repeated keys (`sort_by`) survive.
//! Field names in the plan always come from the resource's static allow-list,
//! never from the request.

use crate::error::AppError;
use crate::models::Resource;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exact, case-sensitive match on `asc` / `desc`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryPlan {
    pub filters: Vec<(&'static str, String)>,
    pub sort: Vec<(&'static str, SortDirection)>,
    pub page: u32,
    pub limit: u32,
}

impl Default for QueryPlan {
    fn default() -> Self {
        QueryPlan {
            filters: Vec::new(),
            sort: Vec::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryPlan {
    pub fn from_params<R: Resource>(params: &[(String, String)]) -> Result<Self, AppError> {
        let page = parse_number(first(params, "page"), DEFAULT_PAGE as i64);
        let limit = parse_number(first(params, "limit"), DEFAULT_LIMIT as i64);

        if limit > MAX_LIMIT as i64 {
            return Err(AppError::BadRequest(format!("Limit cannot be greater than {}", MAX_LIMIT)));
        }
        if limit < 1 {
            return Err(AppError::BadRequest("Limit must be greater than 0".into()));
        }
        if page < 1 {
            return Err(AppError::BadRequest("Page must be greater than 0".into()));
        }
        let page = u32::try_from(page).map_err(|_| AppError::BadRequest("Page is too large".into()))?;

        Ok(QueryPlan {
            filters: filters::<R>(params),
            sort: sort_directives::<R>(params),
            page,
            limit: limit as u32,
        })
    }

    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Absent or unparsable input falls back to the default.
fn parse_number(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(default)
}

fn filters<R: Resource>(params: &[(String, String)]) -> Vec<(&'static str, String)> {
    R::FIELDS
        .iter()
        .filter_map(|field| {
            first(params, field)
                .filter(|v| !v.is_empty())
                .map(|v| (*field, v.to_string()))
        })
        .collect()
}

/// `sort_by=field:direction`, repeatable. Malformed directives are skipped individually.
fn sort_directives<R: Resource>(params: &[(String, String)]) -> Vec<(&'static str, SortDirection)> {
    params
        .iter()
        .filter(|(k, _)| k == "sort_by")
        .filter_map(|(_, v)| {
            let parts: Vec<&str> = v.split(':').collect();
            let [field, dir] = parts.as_slice() else {
                return None;
            };
            let field = R::FIELDS.iter().find(|f| *f == field)?;
            Some((*field, SortDirection::parse(dir)?))
        })
        .collect()
}
