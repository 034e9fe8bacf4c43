//! # adyen-fingerprint
//!
//! Offline, deterministic reproduction of the device fingerprint string that
//! Adyen's in-browser fingerprinting script computes.
//!
//! Given a handful of simulated browser signals (user agent, timezone,
//! platform, screen geometry, Do Not Track), the crate produces the exact
//! fixed-format `"<digest>:<entropy>"` string the script would emit for a
//! browser exhibiting those signals.
//!
//! ## Features
//!
//! - **Bit-exact encoding**: ordered field table, per-field MD5/base64 digest and
//!   padding, `+`/`/` substitution, entropy tag
//! - **Injectable collaborators**: timezone lookup and placeholder tokens are traits,
//!   so output can be made fully reproducible
//! - **Flexible Configuration**: TOML/JSON files, environment variables, CLI arguments
//!
//! ## Quick Start
//!
//! ```rust
//! use adyen_fingerprint::{FingerprintInput, Fingerprinter, FixedTokenSource};
//!
//! let fingerprinter = Fingerprinter::new().with_token_source(FixedTokenSource::nil());
//! let input = FingerprintInput::new(
//!     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!      (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
//! )
//! .with_timezone("America/New_York")
//! .with_do_not_track(true);
//!
//! let fingerprint = fingerprinter.compute(&input).unwrap();
//! assert_eq!(fingerprint.hash.len(), 124);
//! assert!(fingerprint.to_string().ends_with(":40"));
//! ```
//!
//! ## Module Overview
//!
//! - [`encoder`]: Digest, field table, padding, assembly, entropy tag
//! - [`signals`]: Raw field values and the timezone/token collaborators
//! - [`fingerprint`]: Input configuration and the computation entry points
//! - [`config`]: Configuration loading and management
//!
//! ## Data Flow
//!
//! ```text
//! FingerprintInput ──► signals (raw values) ──► encoder::field (fixed width)
//!                                                       │
//!        "<digest>:<tag>" ◄── encoder::entropy ◄── encoder::assemble
//! ```
//!
//! ## Configuration
//!
//! Configuration follows a precedence chain:
//! 1. Default values
//! 2. Configuration file (TOML/JSON)
//! 3. Environment variables (`ADYEN_FP_*`)
//! 4. CLI arguments
//!
//! See [`config::FingerprintSettings`] for all available options.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Full version string with name
pub const FULL_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Module Exports
// ============================================================================

/// Field digest, encoding, assembly and entropy tagging.
pub mod encoder;

/// Raw field values and their injected collaborators.
pub mod signals;

/// Input configuration, output type and the computation entry points.
pub mod fingerprint;

/// Configuration management for loading settings from files, env, and CLI.
pub mod config;

// ============================================================================
// Re-exports for Convenience
// ============================================================================

// Encoder types
pub use encoder::{
    digest, EncodedField, EntropyTag, FieldDescriptor, FieldName, RawValue, FIELD_TABLE,
    TOTAL_WIDTH,
};

// Signal types
pub use signals::{
    BrowserSignals, FieldValueProvider, FixedTokenSource, IanaTimezoneResolver,
    RandomTokenSource, SeededTokenSource, StaticTimezoneResolver, TimezoneError,
    TimezoneResolver, TokenSource,
};

// Computation
pub use fingerprint::{
    compute_fingerprint, mask_random_fields, Fingerprint, FingerprintError, FingerprintInput,
    Fingerprinter,
};

// Config types
pub use config::{BrowserPreset, CliArgs, ConfigError, FingerprintSettings};

// ============================================================================
// Prelude Module
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use adyen_fingerprint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{BrowserPreset, FingerprintSettings};
    pub use crate::fingerprint::{
        compute_fingerprint, Fingerprint, FingerprintError, FingerprintInput, Fingerprinter,
    };
    pub use crate::signals::{FixedTokenSource, TimezoneResolver, TokenSource};
    pub use crate::{FULL_VERSION, NAME, VERSION};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
        assert!(FULL_VERSION.contains(VERSION));
        assert!(FULL_VERSION.contains(NAME));
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;
        let input = FingerprintInput::new("ua");
        assert!(Fingerprinter::new()
            .with_token_source(FixedTokenSource::nil())
            .compute(&input)
            .is_ok());
        let _ = VERSION;
        let _ = NAME;
    }
}
