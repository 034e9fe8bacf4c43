//! Browser presets: matching user agent and platform pairs.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Predefined user agent / `navigator.platform` combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserPreset {
    /// Windows 10/11 with Chrome (most common)
    WindowsChrome,
    /// macOS with Chrome
    MacChrome,
    /// macOS with Safari
    MacSafari,
    /// Linux with Chrome
    LinuxChrome,
    /// iPhone with Mobile Safari
    IphoneSafari,
    /// iPad with Mobile Safari
    IpadSafari,
    /// Android phone with Chrome
    AndroidChrome,
}

impl BrowserPreset {
    /// Get all presets
    pub fn all() -> Vec<BrowserPreset> {
        vec![
            BrowserPreset::WindowsChrome,
            BrowserPreset::MacChrome,
            BrowserPreset::MacSafari,
            BrowserPreset::LinuxChrome,
            BrowserPreset::IphoneSafari,
            BrowserPreset::IpadSafari,
            BrowserPreset::AndroidChrome,
        ]
    }

    /// Get the user agent string for this preset
    pub fn user_agent(&self) -> &'static str {
        match self {
            BrowserPreset::WindowsChrome => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            }
            BrowserPreset::MacChrome => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            }
            BrowserPreset::MacSafari => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15"
            }
            BrowserPreset::LinuxChrome => {
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            }
            BrowserPreset::IphoneSafari => {
                "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1"
            }
            BrowserPreset::IpadSafari => {
                "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1"
            }
            BrowserPreset::AndroidChrome => {
                "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Mobile Safari/537.36"
            }
        }
    }

    /// Get the platform string for this preset
    pub fn platform(&self) -> &'static str {
        match self {
            BrowserPreset::WindowsChrome => "Win32",
            BrowserPreset::MacChrome | BrowserPreset::MacSafari => "MacIntel",
            BrowserPreset::LinuxChrome => "Linux x86_64",
            BrowserPreset::IphoneSafari => "iPhone",
            BrowserPreset::IpadSafari => "iPad",
            BrowserPreset::AndroidChrome => "Linux armv81",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserPreset::WindowsChrome => "windows-chrome",
            BrowserPreset::MacChrome => "mac-chrome",
            BrowserPreset::MacSafari => "mac-safari",
            BrowserPreset::LinuxChrome => "linux-chrome",
            BrowserPreset::IphoneSafari => "iphone-safari",
            BrowserPreset::IpadSafari => "ipad-safari",
            BrowserPreset::AndroidChrome => "android-chrome",
        }
    }
}

impl std::fmt::Display for BrowserPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BrowserPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        BrowserPreset::all()
            .into_iter()
            .find(|preset| preset.as_str() == normalized)
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "Unknown browser preset: {}. Valid presets are: {}",
                    s,
                    BrowserPreset::all()
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
