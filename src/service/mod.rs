//! Request validation applied before records reach the store.

mod validation;
pub use validation::RequestValidator;
