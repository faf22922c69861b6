//! Error handling for tvmux.

pub mod types;

pub use types::{AppError, AppResult, SourceError};
