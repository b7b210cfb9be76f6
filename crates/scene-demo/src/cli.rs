#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `SCENE_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Scene Demo: a books list driven by a stateful scene relay

USAGE:
    scene-demo [OPTIONS]

OPTIONS:
    --author=NAME        Author whose books are listed (default: Ursula K. Le Guin)
    --fail-first=N       Make the first N fetches fail (default: 0)
    --retries=N          Fetch again up to N times after an error (default: 1)
    --log=FILTER         Tracing filter when RUST_LOG is unset (default: info)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    SCENE_DEMO_AUTHOR      Override --author
    SCENE_DEMO_FAIL_FIRST  Override --fail-first
    SCENE_DEMO_RETRIES     Override --retries
    SCENE_DEMO_LOG         Override --log
    RUST_LOG               Tracing filter (takes precedence over --log)";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Author passed to the scene as its config.
    pub author: String,
    /// Number of leading fetches that fail.
    pub fail_first: u32,
    /// Retries after an error state.
    pub retries: u32,
    /// Fallback tracing filter.
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            author: "Ursula K. Le Guin".into(),
            fail_first: 0,
            retries: 1,
            log: "info".into(),
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("scene-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("SCENE_DEMO_AUTHOR")
            && !val.trim().is_empty()
        {
            opts.author = val;
        }
        if let Some(val) = get_env("SCENE_DEMO_FAIL_FIRST")
            && let Ok(n) = val.parse()
        {
            opts.fail_first = n;
        }
        if let Some(val) = get_env("SCENE_DEMO_RETRIES")
            && let Ok(n) = val.parse()
        {
            opts.retries = n;
        }
        if let Some(val) = get_env("SCENE_DEMO_LOG")
            && !val.trim().is_empty()
        {
            opts.log = val;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => {
                    return Err(ParseError::Help);
                }
                "--version" | "-V" => {
                    return Err(ParseError::Version);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--author=") {
                        if val.trim().is_empty() {
                            return Err(ParseError::InvalidValue {
                                flag: "--author",
                                value: val.to_string(),
                            });
                        }
                        opts.author = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--fail-first=") {
                        match val.parse() {
                            Ok(n) => opts.fail_first = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--fail-first",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--retries=") {
                        match val.parse() {
                            Ok(n) => opts.retries = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--retries",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = val.to_string();
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}
