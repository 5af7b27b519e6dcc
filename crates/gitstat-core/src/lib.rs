//! Core types, configuration, and error handling for gitstat.
//!
//! This crate provides the shared foundation used by the other gitstat crates:
//! - [`GitStatError`]: unified error type using `thiserror`
//! - [`GitStatConfig`]: capacity caps and display limits loaded from `.gitstat.toml`
//! - Shared enums: [`OutputFormat`], [`AnalysisMode`]

mod config;
mod error;
mod types;

pub use config::{CapacityLimits, DisplayLimits, GitStatConfig};
pub use error::GitStatError;
pub use types::{AnalysisMode, OutputFormat};

/// A convenience `Result` type for gitstat operations.
pub type Result<T> = std::result::Result<T, GitStatError>;
