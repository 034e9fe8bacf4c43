//! Browser Signal Collection
//!
//! Produces the raw, pre-encoding value for every field in the table. Most
//! values are fixed data standing in for a stock desktop Chrome; the rest come
//! from the caller's [`BrowserSignals`], the injected [`TimezoneResolver`], and
//! the injected [`TokenSource`].
//!
//! # Modules
//!
//! - `navigator` - Plugin and MIME type tables
//! - `webgl` - Canvas and WebGL placeholder data URIs
//! - `timezone` - Zone offset lookup at the reference instants
//! - `token` - Per-call identifiers for the placeholders
//!
//! # Example
//!
//! ```rust
//! use adyen_fingerprint::encoder::{FieldName, RawValue};
//! use adyen_fingerprint::signals::{
//!     BrowserSignals, FieldValueProvider, FixedTokenSource, StaticTimezoneResolver,
//! };
//!
//! let resolver = StaticTimezoneResolver::reference_zones();
//! let tokens = FixedTokenSource::nil();
//! let provider = FieldValueProvider::new(&resolver, &tokens);
//!
//! let signals = BrowserSignals::new("Mozilla/5.0");
//! let video = provider.raw_value(FieldName::Video, &signals).unwrap();
//! assert_eq!(video, RawValue::literal("50271576"));
//! ```

pub mod navigator;
pub mod timezone;
pub mod token;
pub mod webgl;

pub use navigator::{MimeTypeInfo, PluginInfo};
pub use timezone::{
    timezone_signature, IanaTimezoneResolver, StaticTimezoneResolver, TimezoneError,
    TimezoneResolver, REFERENCE_INSTANTS_MS,
};
pub use token::{FixedTokenSource, RandomTokenSource, SeededTokenSource, TokenSource};
pub use webgl::{canvas_data_uri, webgl_data_uri, WebGlCapabilities};

use tracing::trace;

use crate::encoder::{FieldName, RawValue, FIELD_TABLE};

/// Literal inputs of the two superCookies halves.
pub const DOM_STORAGE_SIGNAL: &str = "DOM-LS: Yes, DOM-SS: Yes";
pub const IE_USER_DATA_SIGNAL: &str = ", IE-UD: No";

/// Default timezone when none is given.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
/// Default `navigator.platform`.
pub const DEFAULT_PLATFORM: &str = "Win32";
pub const DEFAULT_COLOR_DEPTH: u32 = 24;
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// The simulated environment, with defaults already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSignals<'a> {
    pub user_agent: &'a str,
    pub timezone: &'a str,
    pub platform: &'a str,
    pub do_not_track: bool,
    pub color_depth: u32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl<'a> BrowserSignals<'a> {
    /// Signals for `user_agent` with every other value at its default.
    pub fn new(user_agent: &'a str) -> Self {
        Self {
            user_agent,
            timezone: DEFAULT_TIMEZONE,
            platform: DEFAULT_PLATFORM,
            do_not_track: false,
            color_depth: DEFAULT_COLOR_DEPTH,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
        }
    }

    /// `(width + 7) * (height + 7) * colorDepth`, as a decimal string.
    pub fn video_signature(&self) -> String {
        let width = u128::from(self.screen_width) + 7;
        let height = u128::from(self.screen_height) + 7;
        (width * height * u128::from(self.color_depth)).to_string()
    }
}

/// Produces raw field values from signals and the injected collaborators.
#[derive(Debug)]
pub struct FieldValueProvider<'r, R: ?Sized, T: ?Sized> {
    resolver: &'r R,
    tokens: &'r T,
}

impl<'r, R, T> FieldValueProvider<'r, R, T>
where
    R: TimezoneResolver + ?Sized,
    T: TokenSource + ?Sized,
{
    pub fn new(resolver: &'r R, tokens: &'r T) -> Self {
        Self { resolver, tokens }
    }

    /// Raw value of a single field.
    ///
    /// Canvas and webglFp draw a new token each time they are asked for.
    pub fn raw_value(
        &self,
        field: FieldName,
        signals: &BrowserSignals<'_>,
    ) -> Result<RawValue, TimezoneError> {
        let raw = match field {
            FieldName::Plugins => {
                RawValue::hashed(PluginInfo::serialize_list(&PluginInfo::chrome_defaults()))
            }
            FieldName::NrOfPlugins => {
                RawValue::literal(PluginInfo::chrome_defaults().len().to_string())
            }
            FieldName::Fonts => RawValue::Absent,
            // Left blank rather than "0".
            FieldName::NrOfFonts => RawValue::literal(""),
            FieldName::TimeZone => {
                RawValue::hashed(timezone_signature(self.resolver, signals.timezone)?)
            }
            FieldName::Video => RawValue::literal(signals.video_signature()),
            FieldName::SuperCookies => RawValue::SplitHashed(
                DOM_STORAGE_SIGNAL.to_string(),
                IE_USER_DATA_SIGNAL.to_string(),
            ),
            FieldName::UserAgent => RawValue::hashed(signals.user_agent),
            FieldName::MimeTypes => {
                RawValue::hashed(MimeTypeInfo::serialize_table(&MimeTypeInfo::chrome_defaults()))
            }
            FieldName::NrOfMimeTypes => {
                RawValue::literal(MimeTypeInfo::chrome_defaults().len().to_string())
            }
            FieldName::Canvas => RawValue::hashed(canvas_data_uri(&self.tokens.next_token())),
            FieldName::CpuClass => RawValue::Absent,
            FieldName::Platform => RawValue::hashed_if_present(Some(signals.platform)),
            FieldName::DoNotTrack => {
                RawValue::hashed_if_present(signals.do_not_track.then_some("1"))
            }
            FieldName::WebglFp => RawValue::hashed(webgl_data_uri(&self.tokens.next_token())),
            // No JS font probing; the empty result is still hashed.
            FieldName::JsFonts => RawValue::hashed(""),
        };
        Ok(raw)
    }

    /// Raw values for every field, in table order.
    pub fn collect(
        &self,
        signals: &BrowserSignals<'_>,
    ) -> Result<Vec<(FieldName, RawValue)>, TimezoneError> {
        FIELD_TABLE
            .iter()
            .map(|descriptor| -> Result<(FieldName, RawValue), TimezoneError> {
                let raw = self.raw_value(descriptor.name, signals)?;
                trace!(field = %descriptor.name, ?raw, "collected raw field value");
                Ok((descriptor.name, raw))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_parts() -> (StaticTimezoneResolver, FixedTokenSource) {
        (
            StaticTimezoneResolver::reference_zones(),
            FixedTokenSource::nil(),
        )
    }

    #[test]
    fn test_video_signature() {
        let mut signals = BrowserSignals::new("ua");
        assert_eq!(signals.video_signature(), "50271576");

        signals.screen_width = 7680;
        signals.screen_height = 4320;
        signals.color_depth = 48;
        assert_eq!(signals.video_signature(), "1596559152");

        signals.screen_width = u32::MAX;
        signals.screen_height = u32::MAX;
        assert!(signals.video_signature().len() > 10);
    }

    #[test]
    fn test_static_fields() {
        let (resolver, tokens) = provider_parts();
        let provider = FieldValueProvider::new(&resolver, &tokens);
        let signals = BrowserSignals::new("ua");

        assert_eq!(
            provider.raw_value(FieldName::NrOfPlugins, &signals).unwrap(),
            RawValue::literal("2")
        );
        assert_eq!(
            provider.raw_value(FieldName::NrOfMimeTypes, &signals).unwrap(),
            RawValue::literal("2")
        );
        assert_eq!(
            provider.raw_value(FieldName::NrOfFonts, &signals).unwrap(),
            RawValue::literal("")
        );
        assert_eq!(
            provider.raw_value(FieldName::CpuClass, &signals).unwrap(),
            RawValue::Absent
        );
        assert_eq!(
            provider.raw_value(FieldName::JsFonts, &signals).unwrap(),
            RawValue::hashed("")
        );
    }

    #[test]
    fn test_platform_and_do_not_track() {
        let (resolver, tokens) = provider_parts();
        let provider = FieldValueProvider::new(&resolver, &tokens);
        let mut signals = BrowserSignals::new("ua");

        assert_eq!(
            provider.raw_value(FieldName::Platform, &signals).unwrap(),
            RawValue::hashed("Win32")
        );
        assert_eq!(
            provider.raw_value(FieldName::DoNotTrack, &signals).unwrap(),
            RawValue::Absent
        );

        signals.platform = "";
        signals.do_not_track = true;
        assert_eq!(
            provider.raw_value(FieldName::Platform, &signals).unwrap(),
            RawValue::Absent
        );
        assert_eq!(
            provider.raw_value(FieldName::DoNotTrack, &signals).unwrap(),
            RawValue::hashed("1")
        );
    }

    #[test]
    fn test_timezone_field() {
        let (resolver, tokens) = provider_parts();
        let provider = FieldValueProvider::new(&resolver, &tokens);
        let mut signals = BrowserSignals::new("ua");

        assert_eq!(
            provider.raw_value(FieldName::TimeZone, &signals).unwrap(),
            RawValue::hashed("420**480")
        );

        signals.timezone = "Nowhere/Special";
        assert_eq!(
            provider.raw_value(FieldName::TimeZone, &signals).unwrap_err(),
            TimezoneError::UnknownZone("Nowhere/Special".to_string())
        );
    }

    #[test]
    fn test_collect_follows_table_order() {
        let (resolver, tokens) = provider_parts();
        let provider = FieldValueProvider::new(&resolver, &tokens);
        let values = provider.collect(&BrowserSignals::new("ua")).unwrap();

        assert_eq!(values.len(), FIELD_TABLE.len());
        for ((name, _), descriptor) in values.iter().zip(FIELD_TABLE.iter()) {
            assert_eq!(*name, descriptor.name);
        }
    }

    #[test]
    fn test_placeholders_draw_tokens() {
        let resolver = StaticTimezoneResolver::reference_zones();
        let tokens = SeededTokenSource::new(1);
        let provider = FieldValueProvider::new(&resolver, &tokens);
        let signals = BrowserSignals::new("ua");

        let first = provider.raw_value(FieldName::Canvas, &signals).unwrap();
        let second = provider.raw_value(FieldName::Canvas, &signals).unwrap();
        assert_ne!(first, second);
    }
}
