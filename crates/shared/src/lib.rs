//! Shared types, errors, and configuration for bundle costing.
//!
//! This crate provides common types used across all other crates:
//! - Item codes as a validated newtype
//! - Lenient numeric coercion for host-supplied document fields
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use self::config::{AppConfig, CostingConfig, LogConfig};
pub use error::{AppError, AppResult};
pub use types::ItemCode;
