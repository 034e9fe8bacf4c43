//! Entropy tag selection from the user agent.

use serde::{Serialize, Serializer};

/// Substrings that mark an Apple mobile device. Matching is case-sensitive.
const APPLE_MOBILE_MARKERS: [&str; 3] = ["iPad", "iPhone", "iPod"];

/// Coarse device bucket appended after the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntropyTag {
    /// iPad, iPhone or iPod: `"20"`.
    AppleMobile,
    /// Everything else: `"40"`.
    Other,
}

impl EntropyTag {
    /// Classify a user agent.
    pub fn classify(user_agent: &str) -> Self {
        if APPLE_MOBILE_MARKERS
            .iter()
            .any(|marker| user_agent.contains(marker))
        {
            EntropyTag::AppleMobile
        } else {
            EntropyTag::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntropyTag::AppleMobile => "20",
            EntropyTag::Other => "40",
        }
    }
}

impl std::fmt::Display for EntropyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntropyTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apple_mobile_devices() {
        for ua in [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X)",
            "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X)",
            "Mozilla/5.0 (iPod touch; CPU iPhone OS 12_0 like Mac OS X)",
        ] {
            assert_eq!(EntropyTag::classify(ua), EntropyTag::AppleMobile);
            assert_eq!(EntropyTag::classify(ua).as_str(), "20");
        }
    }

    #[test]
    fn test_everything_else() {
        for ua in [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "",
        ] {
            assert_eq!(EntropyTag::classify(ua), EntropyTag::Other);
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(EntropyTag::classify("IPHONE ipad IPOD"), EntropyTag::Other);
    }
}
