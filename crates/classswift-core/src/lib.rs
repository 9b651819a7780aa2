//! # classswift-core
//!
//! Core crate for the ClassSwift backend. Contains configuration schemas,
//! broadcast event kinds, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ClassSwift crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
