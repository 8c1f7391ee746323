//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Preflight -- launch readiness scanner for your codebase.
///
/// Scans your project for missing configuration, integration issues,
/// security concerns, SEO metadata gaps, and other common mistakes that
/// affect production deploys. Use `preflight <COMMAND> --help` for details.
#[derive(Parser, Debug)]
#[command(name = "preflight", version, about, long_about = None)]
pub struct Cli {
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all readiness checks and print a report.
    Scan(ScanArgs),

    /// Add a check ID to the ignore list in preflight.yml.
    Ignore(IgnoreArgs),

    /// Remove a check ID from the ignore list in preflight.yml.
    Unignore(IgnoreArgs),

    /// List all available check and service IDs.
    Checks,

    /// Write a starter preflight.yml to the current directory.
    Init(InitArgs),
}

// ---- scan ----

/// Run the full readiness scan on a project directory.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project root to scan (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to preflight.yml (default: <PATH>/preflight.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show auxiliary details for each check.
    #[arg(short, long)]
    pub verbose: bool,

    /// Per-check timeout in seconds (overrides timeoutSecs).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

// ---- ignore / unignore ----

/// Edit the ignore list of preflight.yml.
#[derive(Args, Debug)]
pub struct IgnoreArgs {
    /// Check ID to ignore or re-enable (e.g. secrets, favicon, seoMeta).
    pub check_id: String,

    /// Path to preflight.yml (default: ./preflight.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// ---- init ----

/// Write a starter configuration file.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write preflight.yml into (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_scan_defaults() {
        let cli = Cli::try_parse_from(["preflight", "scan"]).expect("should parse 'scan'");
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(args.config.is_none(), "config should default to None");
                assert!(!args.verbose, "verbose should default to false");
                assert!(args.timeout_secs.is_none());
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_custom_path() {
        let cli = Cli::try_parse_from(["preflight", "scan", "/path/to/project"])
            .expect("should parse scan with path");
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("/path/to/project"));
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_verbose_and_timeout() {
        let cli = Cli::try_parse_from(["preflight", "scan", "-v", "--timeout-secs", "10"])
            .expect("should parse scan flags");
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.verbose);
                assert_eq!(args.timeout_secs, Some(10));
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_config_flag() {
        let cli = Cli::try_parse_from(["preflight", "scan", "-c", "/custom/preflight.yml"])
            .expect("should parse scan with config");
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.config, Some(PathBuf::from("/custom/preflight.yml")));
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_ignore() {
        let cli =
            Cli::try_parse_from(["preflight", "ignore", "secrets"]).expect("should parse ignore");
        match cli.command {
            Commands::Ignore(args) => {
                assert_eq!(args.check_id, "secrets");
            }
            _ => panic!("expected Ignore command"),
        }
    }

    #[test]
    fn test_cli_parse_unignore() {
        let cli = Cli::try_parse_from(["preflight", "unignore", "seoMeta"])
            .expect("should parse unignore");
        match cli.command {
            Commands::Unignore(args) => {
                assert_eq!(args.check_id, "seoMeta");
            }
            _ => panic!("expected Unignore command"),
        }
    }

    #[test]
    fn test_cli_parse_ignore_requires_check_id() {
        assert!(Cli::try_parse_from(["preflight", "ignore"]).is_err());
    }

    #[test]
    fn test_cli_parse_checks() {
        let cli = Cli::try_parse_from(["preflight", "checks"]).expect("should parse checks");
        assert!(matches!(cli.command, Commands::Checks));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::try_parse_from(["preflight", "init"]).expect("should parse init");
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.path, PathBuf::from("."));
            }
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn test_cli_parse_output_format_json() {
        let cli = Cli::try_parse_from(["preflight", "--output", "json", "scan"])
            .expect("should parse json output");
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_log_level() {
        let cli = Cli::try_parse_from(["preflight", "--log-level", "debug", "checks"])
            .expect("should parse log level");
        assert_eq!(cli.log_level, Some("debug".to_owned()));
    }

    #[test]
    fn test_cli_parse_invalid_command_fails() {
        assert!(Cli::try_parse_from(["preflight", "not-a-command"]).is_err());
    }

    #[test]
    fn test_cli_parse_missing_command_fails() {
        assert!(Cli::try_parse_from(["preflight"]).is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "preflight");

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        for expected in ["scan", "ignore", "unignore", "checks", "init"] {
            assert!(
                subcommands.contains(&expected),
                "should have '{expected}' subcommand"
            );
        }
    }
}
