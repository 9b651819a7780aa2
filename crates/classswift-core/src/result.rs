//! Convenience result type alias for ClassSwift.

use crate::error::AppError;

/// A specialized `Result` type for ClassSwift operations.
pub type AppResult<T> = Result<T, AppError>;
