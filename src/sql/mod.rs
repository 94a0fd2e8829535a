//! Safe SQL builder: identifiers from static allow-lists only, values as parameters.

mod builder;
pub use builder::*;
