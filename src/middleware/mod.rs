//! HTTP middleware applied to every route.

mod security_headers;
pub use security_headers::{security_headers, SECURITY_HEADERS};
