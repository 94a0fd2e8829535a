//! Runtime configuration read from the environment (and `.env`).

mod loader;

pub use loader::*;
