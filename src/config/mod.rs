//! Configuration module for adyen-fingerprint.
//!
//! This module provides configuration management for fingerprint computation, including:
//! - Loading settings from files (TOML/JSON)
//! - Environment variable overrides (`ADYEN_FP_*`)
//! - CLI argument merging
//! - Browser presets
//!
//! # Example
//!
//! ```rust,no_run
//! use adyen_fingerprint::config::FingerprintSettings;
//!
//! // Load from a specific file
//! let settings = FingerprintSettings::from_file("fingerprint.toml").unwrap();
//!
//! // Override with environment variables
//! let settings = settings.merge_with_env();
//! ```

mod preset;
mod settings;

pub use preset::BrowserPreset;
pub use settings::{CliArgs, ConfigError, FingerprintSettings, ENV_PREFIX};
