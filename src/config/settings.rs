//! Fingerprint settings and configuration management.
//!
//! This module turns the configuration sources (file, environment, CLI) into a
//! [`FingerprintInput`] plus the token source the computation should use.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use super::BrowserPreset;
use crate::fingerprint::FingerprintInput;
use crate::signals::{
    FixedTokenSource, RandomTokenSource, SeededTokenSource, TokenSource, DEFAULT_COLOR_DEPTH,
    DEFAULT_PLATFORM, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_TIMEZONE,
};

/// Prefix of every environment variable read by [`FingerprintSettings::from_env`].
pub const ENV_PREFIX: &str = "ADYEN_FP_";

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Failed to serialize TOML configuration.
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// Failed to parse JSON configuration.
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Unsupported file format.
    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for one fingerprint computation.
///
/// # Configuration Precedence
///
/// Settings are applied in the following order (later sources override earlier):
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
/// 4. CLI arguments
///
/// A `preset` fills in `user_agent` and `platform` only where those are unset.
///
/// # Example
///
/// ```rust
/// use adyen_fingerprint::config::{BrowserPreset, FingerprintSettings};
///
/// let settings = FingerprintSettings::default()
///     .with_preset(BrowserPreset::MacSafari)
///     .with_timezone("Europe/Berlin");
///
/// let input = settings.to_input();
/// assert_eq!(input.platform, "MacIntel");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintSettings {
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// IANA timezone identifier.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// `navigator.platform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Do Not Track preference.
    #[serde(default)]
    pub do_not_track: bool,

    /// Screen color depth in bits.
    #[serde(default = "default_color_depth")]
    pub color_depth: u32,

    /// Screen width in pixels.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Screen height in pixels.
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    /// Browser preset supplying user agent and platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<BrowserPreset>,

    /// Fixed token for the canvas/WebGL placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Seed for reproducible canvas/WebGL tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// Default value functions for serde
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_color_depth() -> u32 {
    DEFAULT_COLOR_DEPTH
}

fn default_screen_width() -> u32 {
    DEFAULT_SCREEN_WIDTH
}

fn default_screen_height() -> u32 {
    DEFAULT_SCREEN_HEIGHT
}

impl Default for FingerprintSettings {
    fn default() -> Self {
        Self {
            user_agent: None,
            timezone: default_timezone(),
            platform: None,
            do_not_track: false,
            color_depth: default_color_depth(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            preset: None,
            token: None,
            seed: None,
        }
    }
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

impl FingerprintSettings {
    /// Creates a new FingerprintSettings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a configuration file.
    ///
    /// Supports both TOML and JSON formats, detected by file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match file_extension(path).as_str() {
            "toml" => Ok(toml::from_str(&content)?),
            "json" => Ok(serde_json::from_str(&content)?),
            ext => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Saves settings to a configuration file.
    ///
    /// The format is determined by the file extension.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match file_extension(path).as_str() {
            "toml" => toml::to_string_pretty(self)?,
            "json" => serde_json::to_string_pretty(self)?,
            ext => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Loads settings from environment variables.
    ///
    /// Environment variables are prefixed with `ADYEN_FP_` and use uppercase
    /// names with underscores. For example:
    /// - `ADYEN_FP_USER_AGENT`
    /// - `ADYEN_FP_TIMEZONE`
    /// - `ADYEN_FP_DO_NOT_TRACK`
    pub fn from_env() -> Self {
        Self::default().merge_with_env()
    }

    /// Merges current settings with environment variable overrides.
    pub fn merge_with_env(mut self) -> Self {
        self.apply_overrides(|key| env::var(format!("{ENV_PREFIX}{key}")).ok());
        self
    }

    /// Applies overrides from a key lookup (keys without the prefix).
    ///
    /// Unparseable numeric values are skipped with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("USER_AGENT") {
            self.user_agent = Some(val);
        }

        if let Some(val) = lookup("TIMEZONE") {
            self.timezone = val;
        }

        if let Some(val) = lookup("PLATFORM") {
            self.platform = Some(val);
        }

        if let Some(val) = lookup("DO_NOT_TRACK") {
            self.do_not_track = parse_bool(&val);
        }

        if let Some(val) = lookup("COLOR_DEPTH") {
            match val.parse() {
                Ok(depth) => self.color_depth = depth,
                Err(_) => warn!("Ignoring invalid COLOR_DEPTH override: {}", val),
            }
        }

        if let Some(val) = lookup("SCREEN_WIDTH") {
            match val.parse() {
                Ok(width) => self.screen_width = width,
                Err(_) => warn!("Ignoring invalid SCREEN_WIDTH override: {}", val),
            }
        }

        if let Some(val) = lookup("SCREEN_HEIGHT") {
            match val.parse() {
                Ok(height) => self.screen_height = height,
                Err(_) => warn!("Ignoring invalid SCREEN_HEIGHT override: {}", val),
            }
        }

        if let Some(val) = lookup("PRESET") {
            match val.parse() {
                Ok(preset) => self.preset = Some(preset),
                Err(e) => warn!("Ignoring PRESET override: {}", e),
            }
        }

        if let Some(val) = lookup("TOKEN") {
            self.token = Some(val);
        }

        if let Some(val) = lookup("SEED") {
            match val.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!("Ignoring invalid SEED override: {}", val),
            }
        }
    }

    /// Merges settings with CLI arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adyen_fingerprint::config::{CliArgs, FingerprintSettings};
    ///
    /// let args = CliArgs {
    ///     timezone: Some("Asia/Tokyo".to_string()),
    ///     do_not_track: Some(true),
    ///     ..Default::default()
    /// };
    ///
    /// let settings = FingerprintSettings::default().merge_with_args(&args);
    /// assert!(settings.do_not_track);
    /// ```
    pub fn merge_with_args(mut self, args: &CliArgs) -> Self {
        if let Some(ref user_agent) = args.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref timezone) = args.timezone {
            self.timezone = timezone.clone();
        }
        if let Some(ref platform) = args.platform {
            self.platform = Some(platform.clone());
        }
        if let Some(do_not_track) = args.do_not_track {
            self.do_not_track = do_not_track;
        }
        if let Some(color_depth) = args.color_depth {
            self.color_depth = color_depth;
        }
        if let Some(width) = args.width {
            self.screen_width = width;
        }
        if let Some(height) = args.height {
            self.screen_height = height;
        }
        if let Some(preset) = args.preset {
            self.preset = Some(preset);
        }
        if let Some(ref token) = args.token {
            self.token = Some(token.clone());
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }

        self
    }

    /// Validates all settings.
    ///
    /// A missing user agent is not a configuration error here; the computation
    /// itself reports it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::ValidationError(
                "Screen dimensions must be greater than 0".to_string(),
            ));
        }

        if self.color_depth == 0 {
            return Err(ConfigError::ValidationError(
                "Color depth must be greater than 0".to_string(),
            ));
        }

        if self.timezone.is_empty() {
            return Err(ConfigError::ValidationError(
                "Timezone cannot be empty".to_string(),
            ));
        }

        if self.token.is_some() && self.seed.is_some() {
            return Err(ConfigError::ValidationError(
                "A fixed token and a seed cannot be used together".to_string(),
            ));
        }

        Ok(())
    }

    /// Builds the computation input, resolving the preset.
    pub fn to_input(&self) -> FingerprintInput {
        let user_agent = self
            .user_agent
            .clone()
            .or_else(|| self.preset.map(|p| p.user_agent().to_string()));
        let platform = self
            .platform
            .clone()
            .or_else(|| self.preset.map(|p| p.platform().to_string()))
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        FingerprintInput {
            user_agent,
            timezone: self.timezone.clone(),
            platform,
            do_not_track: self.do_not_track,
            color_depth: self.color_depth,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        }
    }

    /// The token source selected by `token`/`seed`, random otherwise.
    pub fn token_source(&self) -> Box<dyn TokenSource + Send + Sync> {
        match (&self.token, self.seed) {
            (Some(token), _) => Box::new(FixedTokenSource::new(token.clone())),
            (None, Some(seed)) => Box::new(SeededTokenSource::new(seed)),
            (None, None) => Box::new(RandomTokenSource),
        }
    }

    // Builder-style methods for convenient configuration

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Sets the platform string.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the Do Not Track preference.
    pub fn with_do_not_track(mut self, do_not_track: bool) -> Self {
        self.do_not_track = do_not_track;
        self
    }

    /// Sets the screen geometry.
    pub fn with_screen(mut self, width: u32, height: u32, color_depth: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self.color_depth = color_depth;
        self
    }

    /// Sets the browser preset.
    pub fn with_preset(mut self, preset: BrowserPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Uses a fixed placeholder token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Uses seeded placeholder tokens.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// CLI argument structure for parsing command line options.
///
/// All fields are optional to allow partial overrides.
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    /// User agent string.
    pub user_agent: Option<String>,
    /// IANA timezone identifier.
    pub timezone: Option<String>,
    /// Platform string.
    pub platform: Option<String>,
    /// Do Not Track preference.
    pub do_not_track: Option<bool>,
    /// Screen color depth.
    pub color_depth: Option<u32>,
    /// Screen width.
    pub width: Option<u32>,
    /// Screen height.
    pub height: Option<u32>,
    /// Browser preset.
    pub preset: Option<BrowserPreset>,
    /// Fixed placeholder token.
    pub token: Option<String>,
    /// Placeholder token seed.
    pub seed: Option<u64>,
    /// Configuration file path.
    pub config_file: Option<PathBuf>,
}

impl CliArgs {
    /// Creates an empty CliArgs instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the final settings by applying the full configuration chain.
    ///
    /// This method handles the complete configuration precedence:
    /// 1. Default values
    /// 2. Configuration file (if specified)
    /// 3. Environment variables
    /// 4. CLI arguments (self)
    pub fn load_settings(&self) -> Result<FingerprintSettings, ConfigError> {
        // Start with defaults or file
        let mut settings = if let Some(ref config_file) = self.config_file {
            FingerprintSettings::from_file(config_file)?
        } else {
            FingerprintSettings::default()
        };

        // Apply environment overrides
        settings = settings.merge_with_env();

        // Apply CLI overrides
        settings = settings.merge_with_args(self);

        // Validate final settings
        settings.validate()?;

        Ok(settings)
    }
}
