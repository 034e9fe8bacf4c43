//! adyen-fp - Command line entry point
//!
//! Loads settings through the configuration chain, computes one fingerprint,
//! and prints it to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use adyen_fingerprint::{
    config::{BrowserPreset, CliArgs, FingerprintSettings},
    fingerprint::{Fingerprint, Fingerprinter},
    signals::IanaTimezoneResolver,
    NAME, VERSION,
};

/// Build the CLI command parser
fn build_cli() -> Command {
    Command::new("adyen-fp")
        .version(VERSION)
        .about("Compute Adyen device fingerprints offline")
        .long_about(
            "Reproduces the device fingerprint string computed by Adyen's browser script\n\
             for a simulated set of browser signals:\n\
             - user agent and navigator.platform\n\
             - IANA timezone\n\
             - screen geometry and color depth\n\
             - Do Not Track preference",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file (TOML or JSON)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("user-agent")
                .short('u')
                .long("user-agent")
                .value_name("STRING")
                .help("User agent string"),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .value_name("NAME")
                .help("Browser preset supplying user agent and platform")
                .value_parser(
                    BrowserPreset::all()
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>(),
                ),
        )
        .arg(
            Arg::new("timezone")
                .short('t')
                .long("timezone")
                .value_name("ZONE")
                .help("IANA timezone (default: America/Los_Angeles)"),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .value_name("STRING")
                .help("navigator.platform (default: Win32)"),
        )
        .arg(
            Arg::new("do-not-track")
                .long("do-not-track")
                .help("Report Do Not Track as enabled")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("color-depth")
                .long("color-depth")
                .value_name("BITS")
                .help("Screen color depth (default: 24)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help("Screen width (default: 1920)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help("Screen height (default: 1080)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("STRING")
                .help("Fixed token for the canvas/WebGL placeholders"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Seed for reproducible canvas/WebGL tokens")
                .value_parser(clap::value_parser!(u64))
                .conflicts_with("token"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the fingerprint with its per-field breakdown as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("expect")
                .long("expect")
                .value_name("FINGERPRINT")
                .help("Compare against a known fingerprint, ignoring canvas/WebGL segments"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress output except errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

/// Parse CLI arguments into CliArgs struct
fn parse_cli_args(matches: &clap::ArgMatches) -> CliArgs {
    let mut args = CliArgs::default();

    args.config_file = matches.get_one::<PathBuf>("config").cloned();
    args.user_agent = matches.get_one::<String>("user-agent").cloned();
    args.timezone = matches.get_one::<String>("timezone").cloned();
    args.platform = matches.get_one::<String>("platform").cloned();
    args.color_depth = matches.get_one::<u32>("color-depth").copied();
    args.width = matches.get_one::<u32>("width").copied();
    args.height = matches.get_one::<u32>("height").copied();
    args.token = matches.get_one::<String>("token").cloned();
    args.seed = matches.get_one::<u64>("seed").copied();

    // Values are restricted by the parser, so this only fails on a clap bug
    args.preset = matches
        .get_one::<String>("preset")
        .and_then(|p| p.parse().ok());

    if matches.get_flag("do-not-track") {
        args.do_not_track = Some(true);
    }

    args
}

/// Initialize the tracing/logging subsystem
fn init_tracing(verbosity: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Compute the fingerprint for the loaded settings
fn compute(settings: &FingerprintSettings) -> Result<Fingerprint> {
    let input = settings.to_input();
    debug!(?input, "resolved fingerprint input");

    let fingerprinter = Fingerprinter::new()
        .with_resolver(IanaTimezoneResolver::new())
        .with_token_source(settings.token_source());

    fingerprinter
        .compute(&input)
        .context("Failed to compute fingerprint")
}

/// Main application entry point
fn main() -> Result<ExitCode> {
    let matches = build_cli().get_matches();

    let verbosity = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");
    init_tracing(verbosity, quiet);

    let cli_args = parse_cli_args(&matches);
    let settings = cli_args
        .load_settings()
        .context("Failed to load configuration")?;

    info!("{} v{} computing fingerprint", NAME, VERSION);
    let fingerprint = compute(&settings)?;

    if matches.get_flag("json") {
        let rendered = serde_json::to_string_pretty(&fingerprint)
            .context("Failed to serialize fingerprint")?;
        println!("{rendered}");
    } else {
        println!("{fingerprint}");
    }

    if let Some(expected) = matches.get_one::<String>("expect") {
        let matched = fingerprint.matches_ignoring_random_fields(expected);
        println!("{matched}");
        if !matched {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
