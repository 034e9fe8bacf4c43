//! Field table and per-field encoding.
//!
//! The sixteen fields are encoded independently and then concatenated in
//! [`FIELD_TABLE`] order. Every encoded field is exactly as wide as its
//! descriptor says, so the assembled digest always has [`TOTAL_WIDTH`]
//! characters.

use serde::{Deserialize, Serialize};

use super::digest::digest;

/// Identifies one component of the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Plugins,
    NrOfPlugins,
    Fonts,
    NrOfFonts,
    TimeZone,
    Video,
    SuperCookies,
    UserAgent,
    MimeTypes,
    NrOfMimeTypes,
    Canvas,
    CpuClass,
    Platform,
    DoNotTrack,
    WebglFp,
    JsFonts,
}

impl FieldName {
    /// The field's key as the browser script names it.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Plugins => "plugins",
            FieldName::NrOfPlugins => "nrOfPlugins",
            FieldName::Fonts => "fonts",
            FieldName::NrOfFonts => "nrOfFonts",
            FieldName::TimeZone => "timeZone",
            FieldName::Video => "video",
            FieldName::SuperCookies => "superCookies",
            FieldName::UserAgent => "userAgent",
            FieldName::MimeTypes => "mimeTypes",
            FieldName::NrOfMimeTypes => "nrOfMimeTypes",
            FieldName::Canvas => "canvas",
            FieldName::CpuClass => "cpuClass",
            FieldName::Platform => "platform",
            FieldName::DoNotTrack => "doNotTrack",
            FieldName::WebglFp => "webglFp",
            FieldName::JsFonts => "jsFonts",
        }
    }

    /// Declared padded width.
    pub const fn width(&self) -> usize {
        match self {
            FieldName::NrOfPlugins | FieldName::NrOfFonts | FieldName::NrOfMimeTypes => 3,
            FieldName::CpuClass | FieldName::Platform | FieldName::DoNotTrack => 5,
            _ => 10,
        }
    }

    /// Character offset of this field inside the assembled digest.
    pub fn offset(&self) -> usize {
        FIELD_TABLE
            .iter()
            .take_while(|descriptor| descriptor.name != *self)
            .map(|descriptor| descriptor.width)
            .sum()
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{ name, paddedWidth }` table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub width: usize,
}

impl FieldDescriptor {
    const fn of(name: FieldName) -> Self {
        Self {
            name,
            width: name.width(),
        }
    }
}

/// Concatenation order of the assembled digest.
pub const FIELD_TABLE: [FieldDescriptor; 16] = [
    FieldDescriptor::of(FieldName::Plugins),
    FieldDescriptor::of(FieldName::NrOfPlugins),
    FieldDescriptor::of(FieldName::Fonts),
    FieldDescriptor::of(FieldName::NrOfFonts),
    FieldDescriptor::of(FieldName::TimeZone),
    FieldDescriptor::of(FieldName::Video),
    FieldDescriptor::of(FieldName::SuperCookies),
    FieldDescriptor::of(FieldName::UserAgent),
    FieldDescriptor::of(FieldName::MimeTypes),
    FieldDescriptor::of(FieldName::NrOfMimeTypes),
    FieldDescriptor::of(FieldName::Canvas),
    FieldDescriptor::of(FieldName::CpuClass),
    FieldDescriptor::of(FieldName::Platform),
    FieldDescriptor::of(FieldName::DoNotTrack),
    FieldDescriptor::of(FieldName::WebglFp),
    FieldDescriptor::of(FieldName::JsFonts),
];

/// Length of the assembled digest (sum of all widths).
pub const TOTAL_WIDTH: usize = total_width();

const fn total_width() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < FIELD_TABLE.len() {
        total += FIELD_TABLE[i].width;
        i += 1;
    }
    total
}

/// Pre-encoding value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// No value; encodes to all zeros.
    Absent,
    /// Padded or truncated as-is, without hashing.
    Literal(String),
    /// Digested first. An empty string is still digested.
    Hashed(String),
    /// Two independently digested halves, each at half the field width.
    SplitHashed(String, String),
}

impl RawValue {
    pub fn literal(value: impl Into<String>) -> Self {
        RawValue::Literal(value.into())
    }

    pub fn hashed(value: impl Into<String>) -> Self {
        RawValue::Hashed(value.into())
    }

    /// `Hashed` when `value` is present and non-empty, `Absent` otherwise.
    pub fn hashed_if_present(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => RawValue::Hashed(v.to_string()),
            _ => RawValue::Absent,
        }
    }
}

/// Right-align `value` in `width` characters.
///
/// Longer values keep their first `width` characters; shorter ones are
/// left-padded with `'0'`.
pub fn pad_string(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.chars().take(width).collect()
    } else {
        let mut out = "0".repeat(width - len);
        out.push_str(value);
        out
    }
}

/// Encode a raw value into exactly `width` characters.
pub fn encode_field(raw: &RawValue, width: usize) -> String {
    match raw {
        RawValue::Absent => pad_string("", width),
        RawValue::Literal(value) => pad_string(value, width),
        RawValue::Hashed(value) => pad_string(&digest(value), width),
        RawValue::SplitHashed(first, second) => {
            let half = width / 2;
            let mut out = pad_string(&digest(first), half);
            out.push_str(&pad_string(&digest(second), half));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_and_widths() {
        let names: Vec<&str> = FIELD_TABLE.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "plugins",
                "nrOfPlugins",
                "fonts",
                "nrOfFonts",
                "timeZone",
                "video",
                "superCookies",
                "userAgent",
                "mimeTypes",
                "nrOfMimeTypes",
                "canvas",
                "cpuClass",
                "platform",
                "doNotTrack",
                "webglFp",
                "jsFonts",
            ]
        );
        for descriptor in FIELD_TABLE.iter() {
            assert_eq!(descriptor.width, descriptor.name.width());
        }
        assert_eq!(TOTAL_WIDTH, 124);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(FieldName::Plugins.offset(), 0);
        assert_eq!(FieldName::TimeZone.offset(), 26);
        assert_eq!(FieldName::Canvas.offset(), 79);
        assert_eq!(FieldName::WebglFp.offset(), 104);
        assert_eq!(FieldName::JsFonts.offset() + 10, TOTAL_WIDTH);
    }

    #[test]
    fn test_pad_string() {
        assert_eq!(pad_string("2", 3), "002");
        assert_eq!(pad_string("", 5), "00000");
        assert_eq!(pad_string("50271576", 10), "0050271576");
        assert_eq!(pad_string("1596559152", 10), "1596559152");
        assert_eq!(pad_string("qZkTERSBtPC8tw4I4+mUBQ", 5), "qZkTE");
    }

    #[test]
    fn test_encode_modes() {
        assert_eq!(encode_field(&RawValue::Absent, 10), "0000000000");
        assert_eq!(encode_field(&RawValue::literal(""), 3), "000");
        assert_eq!(encode_field(&RawValue::literal("2"), 3), "002");
        assert_eq!(encode_field(&RawValue::hashed(""), 10), "1B2M2Y8Asg");
        assert_eq!(encode_field(&RawValue::hashed("1"), 5), "xMpCO");
    }

    #[test]
    fn test_split_hashed_uses_half_width() {
        let raw = RawValue::SplitHashed(
            "DOM-LS: Yes, DOM-SS: Yes".to_string(),
            ", IE-UD: No".to_string(),
        );
        let encoded = encode_field(&raw, 10);
        assert_eq!(encoded.len(), 10);
        assert_eq!(encoded, "cVB94iKzBG");
    }

    #[test]
    fn test_hashed_if_present() {
        assert_eq!(RawValue::hashed_if_present(None), RawValue::Absent);
        assert_eq!(RawValue::hashed_if_present(Some("")), RawValue::Absent);
        assert_eq!(
            RawValue::hashed_if_present(Some("Win32")),
            RawValue::hashed("Win32")
        );
    }
}
