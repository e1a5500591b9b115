//! Shared types, errors, and configuration for Folio.
//!
//! This crate provides common types used across all other crates:
//! - Reporting period vocabulary (periodicity, basis, month-day)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
