//! Domain events broadcast to notification subscribers

pub mod types;

pub use types::*;
