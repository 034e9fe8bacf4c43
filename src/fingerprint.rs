//! Fingerprint computation
//!
//! Ties the pieces together: input defaults, raw field collection, per-field
//! encoding, assembly, and the entropy tag.
//!
//! # Usage
//!
//! ```rust,no_run
//! use adyen_fingerprint::fingerprint::{compute_fingerprint, FingerprintInput};
//!
//! let input = FingerprintInput::new(
//!     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!      (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
//! )
//! .with_timezone("America/New_York")
//! .with_do_not_track(true);
//!
//! let fingerprint = compute_fingerprint(&input).unwrap();
//! assert!(fingerprint.ends_with(":40"));
//! ```
//!
//! For reproducible output, inject a fixed token source:
//!
//! ```rust
//! use adyen_fingerprint::fingerprint::{FingerprintInput, Fingerprinter};
//! use adyen_fingerprint::signals::FixedTokenSource;
//!
//! let fingerprinter = Fingerprinter::new().with_token_source(FixedTokenSource::nil());
//! let input = FingerprintInput::new("Mozilla/5.0");
//! let a = fingerprinter.compute(&input).unwrap();
//! let b = fingerprinter.compute(&input).unwrap();
//! assert_eq!(a, b);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::encoder::{
    assemble, encode_field, EncodedField, EntropyTag, FieldName, FIELD_TABLE, TOTAL_WIDTH,
};
use crate::signals::{
    BrowserSignals, FieldValueProvider, IanaTimezoneResolver, RandomTokenSource, TimezoneError,
    TimezoneResolver, TokenSource, DEFAULT_COLOR_DEPTH, DEFAULT_PLATFORM, DEFAULT_SCREEN_HEIGHT,
    DEFAULT_SCREEN_WIDTH, DEFAULT_TIMEZONE,
};

/// Errors that abort a fingerprint computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerprintError {
    /// No user agent was supplied, or it was empty.
    #[error("Missing required field: userAgent")]
    MissingUserAgent,

    /// The timezone could not be resolved.
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
}

/// Simulated browser environment.
///
/// Every field except `user_agent` has a default. Deserializes from camelCase
/// keys, so the same shape works in JSON and TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintInput {
    /// `navigator.userAgent`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// IANA zone identifier.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// `navigator.platform`. Empty leaves the field unhashed.
    #[serde(default = "default_platform")]
    pub platform: String,

    /// `navigator.doNotTrack == "1"`.
    #[serde(default)]
    pub do_not_track: bool,

    /// `screen.colorDepth`
    #[serde(default = "default_color_depth")]
    pub color_depth: u32,

    /// `screen.width`
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// `screen.height`
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
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

impl Default for FingerprintInput {
    fn default() -> Self {
        Self {
            user_agent: None,
            timezone: default_timezone(),
            platform: default_platform(),
            do_not_track: false,
            color_depth: default_color_depth(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

impl FingerprintInput {
    /// Input for `user_agent` with every other value at its default.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
            ..Default::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_do_not_track(mut self, do_not_track: bool) -> Self {
        self.do_not_track = do_not_track;
        self
    }

    pub fn with_color_depth(mut self, color_depth: u32) -> Self {
        self.color_depth = color_depth;
        self
    }

    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Borrowed view used by the signal provider.
    ///
    /// # Errors
    ///
    /// [`FingerprintError::MissingUserAgent`] when the user agent is absent or empty.
    pub fn signals(&self) -> Result<BrowserSignals<'_>, FingerprintError> {
        let user_agent = self
            .user_agent
            .as_deref()
            .filter(|ua| !ua.is_empty())
            .ok_or(FingerprintError::MissingUserAgent)?;

        Ok(BrowserSignals {
            user_agent,
            timezone: &self.timezone,
            platform: &self.platform,
            do_not_track: self.do_not_track,
            color_depth: self.color_depth,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        })
    }
}

/// A computed fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    /// Assembled, substituted digest.
    pub hash: String,
    /// Device bucket.
    pub entropy: EntropyTag,
    /// Encoded fields in table order, before substitution.
    pub fields: Vec<EncodedField>,
}

impl Fingerprint {
    /// Encoded value of one field, before substitution.
    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Compare with `expected` while ignoring the canvas and webglFp segments.
    pub fn matches_ignoring_random_fields(&self, expected: &str) -> bool {
        mask_random_fields(&self.to_string()) == mask_random_fields(expected)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.hash, self.entropy)
    }
}

/// Replace the canvas and webglFp segments of a `"<hash>:<tag>"` string with `*`.
///
/// Strings whose hash part is not exactly the assembled width are returned
/// unchanged.
pub fn mask_random_fields(fingerprint: &str) -> String {
    let (hash, tag) = match fingerprint.rsplit_once(':') {
        Some(parts) => parts,
        None => (fingerprint, ""),
    };
    if hash.chars().count() != TOTAL_WIDTH {
        return fingerprint.to_string();
    }

    let masked_ranges: Vec<(usize, usize)> = [FieldName::Canvas, FieldName::WebglFp]
        .iter()
        .map(|name| (name.offset(), name.offset() + name.width()))
        .collect();

    let masked: String = hash
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if masked_ranges.iter().any(|(start, end)| i >= *start && i < *end) {
                '*'
            } else {
                c
            }
        })
        .collect();

    if fingerprint.contains(':') {
        format!("{masked}:{tag}")
    } else {
        masked
    }
}

/// Computes fingerprints with an injected timezone resolver and token source.
#[derive(Debug, Clone)]
pub struct Fingerprinter<R = IanaTimezoneResolver, T = RandomTokenSource> {
    resolver: R,
    tokens: T,
}

impl Fingerprinter {
    /// IANA timezone database and random UUID tokens.
    pub fn new() -> Self {
        Self {
            resolver: IanaTimezoneResolver::new(),
            tokens: RandomTokenSource,
        }
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, T> Fingerprinter<R, T> {
    /// Swap the timezone resolver.
    pub fn with_resolver<R2>(self, resolver: R2) -> Fingerprinter<R2, T> {
        Fingerprinter {
            resolver,
            tokens: self.tokens,
        }
    }

    /// Swap the token source.
    pub fn with_token_source<T2>(self, tokens: T2) -> Fingerprinter<R, T2> {
        Fingerprinter {
            resolver: self.resolver,
            tokens,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn token_source(&self) -> &T {
        &self.tokens
    }
}

impl<R: TimezoneResolver, T: TokenSource> Fingerprinter<R, T> {
    /// Compute the fingerprint for `input`.
    ///
    /// # Errors
    ///
    /// Fails when the user agent is missing or the timezone cannot be resolved.
    /// Nothing is partially computed.
    pub fn compute(&self, input: &FingerprintInput) -> Result<Fingerprint, FingerprintError> {
        let signals = input.signals()?;
        let provider = FieldValueProvider::new(&self.resolver, &self.tokens);
        let raw_values = provider.collect(&signals)?;

        let fields: Vec<EncodedField> = raw_values
            .iter()
            .zip(FIELD_TABLE.iter())
            .map(|((name, raw), descriptor)| {
                let value = encode_field(raw, descriptor.width);
                trace!(field = %name, %value, "encoded field");
                EncodedField::new(*name, value)
            })
            .collect();

        let hash = assemble(&fields);
        let entropy = EntropyTag::classify(signals.user_agent);

        debug!(
            timezone = signals.timezone,
            platform = signals.platform,
            entropy = %entropy,
            "computed fingerprint"
        );

        Ok(Fingerprint {
            hash,
            entropy,
            fields,
        })
    }
}

/// Compute `"<hash>:<tag>"` with the IANA database and random tokens.
pub fn compute_fingerprint(input: &FingerprintInput) -> Result<String, FingerprintError> {
    Ok(Fingerprinter::new().compute(input)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{FixedTokenSource, StaticTimezoneResolver};

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

    fn fixed() -> Fingerprinter<StaticTimezoneResolver, FixedTokenSource> {
        Fingerprinter::new()
            .with_resolver(StaticTimezoneResolver::reference_zones())
            .with_token_source(FixedTokenSource::nil())
    }

    #[test]
    fn test_input_defaults() {
        let input = FingerprintInput::default();
        assert_eq!(input.user_agent, None);
        assert_eq!(input.timezone, "America/Los_Angeles");
        assert_eq!(input.platform, "Win32");
        assert!(!input.do_not_track);
        assert_eq!(input.color_depth, 24);
        assert_eq!(input.screen_width, 1920);
        assert_eq!(input.screen_height, 1080);
    }

    #[test]
    fn test_input_from_json_uses_defaults() {
        let input: FingerprintInput =
            serde_json::from_str(r#"{"userAgent":"ua","doNotTrack":true}"#).unwrap();
        assert_eq!(input.user_agent.as_deref(), Some("ua"));
        assert!(input.do_not_track);
        assert_eq!(input.timezone, "America/Los_Angeles");
        assert_eq!(input.screen_height, 1080);
    }

    #[test]
    fn test_missing_user_agent() {
        let fingerprinter = fixed();
        assert_eq!(
            fingerprinter.compute(&FingerprintInput::default()),
            Err(FingerprintError::MissingUserAgent)
        );
        assert_eq!(
            fingerprinter.compute(&FingerprintInput::new("")),
            Err(FingerprintError::MissingUserAgent)
        );
    }

    #[test]
    fn test_unknown_timezone_propagates() {
        let err = fixed()
            .compute(&FingerprintInput::new(CHROME_UA).with_timezone("Not/AZone"))
            .unwrap_err();
        assert_eq!(
            err,
            FingerprintError::Timezone(TimezoneError::UnknownZone("Not/AZone".to_string()))
        );
        assert!(err.to_string().contains("Not/AZone"));
    }

    #[test]
    fn test_fixed_token_output() {
        let input = FingerprintInput::new(CHROME_UA)
            .with_timezone("America/Chicago")
            .with_do_not_track(true);
        let fingerprint = fixed().compute(&input).unwrap();

        assert_eq!(
            fingerprint.to_string(),
            "x355cNd9Pi0020000000000000LlDyZ49njD0050271576cVB94iKzBGnGpwGmJ6V9swEtLkIt16002\
             8Hb2ewkhpo00000qZkTExMpCOSm6AKNPGWp1B2M2Y8Asg:40"
        );
        assert_eq!(fingerprint.field(FieldName::UserAgent), Some("n+pwGmJ6V9"));
        assert_eq!(fingerprint.field(FieldName::TimeZone), Some("LlDyZ49nj/"));
    }

    #[test]
    fn test_mask_random_fields() {
        let masked = mask_random_fields(
            "x355cNd9Pi0020000000000000LlDyZ49njD0050271576cVB94iKzBGnGpwGmJ6V9swEtLkIt16002\
             q7zBvelero00000qZkTExMpCOGsb0UDZDMD1B2M2Y8Asg:40",
        );
        assert_eq!(
            masked,
            "x355cNd9Pi0020000000000000LlDyZ49njD0050271576cVB94iKzBGnGpwGmJ6V9swEtLkIt16002\
             **********00000qZkTExMpCO**********1B2M2Y8Asg:40"
        );
        assert_eq!(mask_random_fields("short:40"), "short:40");
    }

    #[test]
    fn test_display_and_serialize() {
        let fingerprint = fixed().compute(&FingerprintInput::new(CHROME_UA)).unwrap();
        let rendered = fingerprint.to_string();
        assert_eq!(rendered, format!("{}:40", fingerprint.hash));

        let json = serde_json::to_value(&fingerprint).unwrap();
        assert_eq!(json["entropy"], "40");
        assert_eq!(json["fields"].as_array().unwrap().len(), 16);
        assert_eq!(json["fields"][0]["name"], "plugins");
    }
}
