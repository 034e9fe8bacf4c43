//! Fingerprint Encoding
//!
//! Turns per-field raw values into the fixed-width digest string.
//!
//! # Modules
//!
//! - `digest` - MD5 + base64 text digest applied to hashed fields
//! - `field` - The ordered field table and the per-field padding rules
//! - `assemble` - Concatenation in table order and `+`/`/` substitution
//! - `entropy` - The `"20"`/`"40"` device tag
//!
//! # Example
//!
//! ```rust
//! use adyen_fingerprint::encoder::{encode_field, RawValue};
//!
//! assert_eq!(encode_field(&RawValue::literal("2"), 3), "002");
//! assert_eq!(encode_field(&RawValue::Absent, 5), "00000");
//! ```

pub mod assemble;
pub mod digest;
pub mod entropy;
pub mod field;

pub use assemble::{assemble, substitute, EncodedField};
pub use digest::digest;
pub use entropy::EntropyTag;
pub use field::{
    encode_field, pad_string, FieldDescriptor, FieldName, RawValue, FIELD_TABLE, TOTAL_WIDTH,
};
