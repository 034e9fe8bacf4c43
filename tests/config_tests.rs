//! Integration tests for configuration loading
//!
//! File formats, the CLI precedence chain, and presets driving a full computation.

use std::fs;

use adyen_fingerprint::{
    BrowserPreset, CliArgs, ConfigError, EntropyTag, FingerprintSettings, Fingerprinter,
};

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fingerprint.toml");
    fs::write(
        &path,
        r#"
user_agent = "Mozilla/5.0 (X11; Linux x86_64)"
timezone = "Europe/Paris"
do_not_track = true
screen_width = 1366
"#,
    )
    .unwrap();

    let settings = FingerprintSettings::from_file(&path).unwrap();

    assert_eq!(
        settings.user_agent.as_deref(),
        Some("Mozilla/5.0 (X11; Linux x86_64)")
    );
    assert_eq!(settings.timezone, "Europe/Paris");
    assert!(settings.do_not_track);
    assert_eq!(settings.screen_width, 1366);
    // Unset keys keep their defaults
    assert_eq!(settings.screen_height, 1080);
    assert_eq!(settings.color_depth, 24);
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fingerprint.json");
    fs::write(
        &path,
        r#"{ "preset": "ipad-safari", "timezone": "Asia/Tokyo", "seed": 42 }"#,
    )
    .unwrap();

    let settings = FingerprintSettings::from_file(&path).unwrap();

    assert_eq!(settings.preset, Some(BrowserPreset::IpadSafari));
    assert_eq!(settings.timezone, "Asia/Tokyo");
    assert_eq!(settings.seed, Some(42));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let settings = FingerprintSettings::default()
        .with_user_agent("RoundTrip/1.0")
        .with_screen(2560, 1440, 30)
        .with_token("fixed-token");

    for name in ["settings.toml", "settings.json"] {
        let path = dir.path().join(name);
        settings.to_file(&path).unwrap();
        assert_eq!(FingerprintSettings::from_file(&path).unwrap(), settings);
    }
}

#[test]
fn test_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    fs::write(&path, "timezone: UTC").unwrap();

    let err = FingerprintSettings::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "yaml"));

    let err = FingerprintSettings::default().to_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let err = FingerprintSettings::from_file("/nonexistent/fingerprint.toml").unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "screen_width = \"wide\"").unwrap();

    let err = FingerprintSettings::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParseError(_)));
}

#[test]
fn test_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fingerprint.toml");
    fs::write(
        &path,
        "user_agent = \"File/1.0\"\ntimezone = \"Europe/London\"\ncolor_depth = 16\n",
    )
    .unwrap();

    let args = CliArgs {
        config_file: Some(path),
        timezone: Some("America/Denver".to_string()),
        ..Default::default()
    };

    let settings = args.load_settings().unwrap();

    assert_eq!(settings.user_agent.as_deref(), Some("File/1.0"));
    assert_eq!(settings.timezone, "America/Denver");
    assert_eq!(settings.color_depth, 16);
}

#[test]
fn test_load_settings_validates() {
    let args = CliArgs {
        width: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        args.load_settings(),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_preset_end_to_end() {
    let settings = FingerprintSettings::default()
        .with_preset(BrowserPreset::IphoneSafari)
        .with_timezone("Asia/Tokyo")
        .with_screen(390, 844, 32)
        .with_token("00000000-0000-0000-0000-000000000000");

    let fingerprint = Fingerprinter::new()
        .with_token_source(settings.token_source())
        .compute(&settings.to_input())
        .unwrap();

    assert_eq!(fingerprint.entropy, EntropyTag::AppleMobile);
    assert_eq!(
        fingerprint.to_string(),
        "x355cNd9Pi00200000000000005L7iGrdXwD0010811104cVB94iKzBGPJODP1OQX4swEtLkIt16002\
         8Hb2ewkhpo00000hn5Xv00000Sm6AKNPGWp1B2M2Y8Asg:20"
    );
}

#[test]
fn test_every_preset_computes() {
    let fingerprinter = Fingerprinter::new();
    for preset in BrowserPreset::all() {
        let input = FingerprintSettings::default().with_preset(preset).to_input();
        let fingerprint = fingerprinter.compute(&input).unwrap();
        let expected = match preset {
            BrowserPreset::IphoneSafari | BrowserPreset::IpadSafari => EntropyTag::AppleMobile,
            _ => EntropyTag::Other,
        };
        assert_eq!(fingerprint.entropy, expected, "{preset}");
    }
}
