//! SiteProbe Core - Foundation crate for the SiteProbe fingerprinting tool.
//!
//! This crate provides shared types, error handling, and configuration
//! management that the scanner, card, and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`Address`, `RequesterId`)
//!
//! # Example
//!
//! ```rust
//! use siteprobe_core::{Address, AppConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! let address = Address::new("  https://shop.example.com/ ");
//! assert_eq!(address.as_str(), "https://shop.example.com/");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BatchConfig, CardConfig, FetchConfig, ThrottleConfig, MAX_YEAR_SPAN,
};
pub use error::{ConfigError, ConfigResult, Result, SiteProbeError};
pub use types::{Address, RequesterId};
