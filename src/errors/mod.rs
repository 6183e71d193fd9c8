//! Error handling for the playlist merger

mod types;

pub use types::{AppError, AppResult, SourceError};
