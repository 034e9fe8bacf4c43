//! Field digest: MD5 over the UTF-8 bytes, standard base64 without `=` padding.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use md5::{Digest, Md5};

/// Hash `text` and return its base64 text form with padding stripped.
///
/// A 16-byte digest always encodes to 22 characters once the two `=` are
/// removed, but callers go through [`crate::encoder::pad_string`] before
/// relying on any width.
///
/// # Example
///
/// ```rust
/// use adyen_fingerprint::encoder::digest;
///
/// assert_eq!(digest(""), "1B2M2Y8AsgTpgAmY7PhCfg");
/// ```
pub fn digest(text: &str) -> String {
    let hash = Md5::digest(text.as_bytes());
    STANDARD_NO_PAD.encode(hash)
}
