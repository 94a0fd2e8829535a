//! Record validation: required attributes, length bound, email format on the unique column.

use crate::error::AppError;
use crate::models::Resource;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_FIELD_LENGTH: usize = 255;

fn email_pattern() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$"))
        .as_ref()
        .map_err(|e| AppError::Internal(format!("email pattern: {}", e)))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a complete record (create, replace, merged patch). Every attribute is required.
    pub fn validate<R: Resource>(record: &R) -> Result<(), AppError> {
        for (col, value) in R::FIELDS.iter().zip(record.values()) {
            validate_field(col, value)?;
            if *col == "email" && !email_pattern()?.is_match(value) {
                return Err(AppError::Validation(format!("{} must be a valid email", col)));
            }
        }
        Ok(())
    }

    pub fn validate_batch<R: Resource>(records: &[R]) -> Result<(), AppError> {
        records.iter().try_for_each(Self::validate::<R>)
    }
}

fn validate_field(col: &str, v: &str) -> Result<(), AppError> {
    if v.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    if v.chars().count() > MAX_FIELD_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, MAX_FIELD_LENGTH
        )));
    }
    Ok(())
}
