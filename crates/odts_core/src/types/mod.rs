//! Shared types.
//!
//! This module provides:
//! - `error`: Structured error types for optimiser set-up and dense linear algebra
//!
//! # Re-exports
//!
//! - [`OptimiserError`], [`LinalgError`] from `error`

pub mod error;

pub use error::{LinalgError, OptimiserError};
