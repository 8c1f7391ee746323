//! `preflight ignore` / `preflight unignore` command handlers
//!
//! Both commands edit the `ignore` list of an existing preflight.yml.
//! Duplicate adds and absent removes are friendly no-ops.

use std::path::PathBuf;

use preflight_core::config::PreflightConfig;
use preflight_core::error::{ConfigError, PreflightError};

use crate::cli::IgnoreArgs;
use crate::error::CliError;

/// Execute the `ignore` command.
pub async fn execute_ignore(args: IgnoreArgs) -> Result<(), CliError> {
    let config_path = resolve_config_path(args.config)?;
    let mut config = load_existing(&config_path).await?;

    if !config.add_ignore(&args.check_id) {
        println!("'{}' is already in the ignore list", args.check_id);
        return Ok(());
    }

    config.save(&config_path).await?;
    println!("Added '{}' to ignore list", args.check_id);
    Ok(())
}

/// Execute the `unignore` command.
pub async fn execute_unignore(args: IgnoreArgs) -> Result<(), CliError> {
    let config_path = resolve_config_path(args.config)?;
    let mut config = load_existing(&config_path).await?;

    if !config.remove_ignore(&args.check_id) {
        println!("'{}' is not in the ignore list", args.check_id);
        return Ok(());
    }

    config.save(&config_path).await?;
    println!("Removed '{}' from ignore list", args.check_id);
    Ok(())
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| CliError::Command(format!("failed to get current directory: {e}")))?;
            Ok(cwd.join("preflight.yml"))
        }
    }
}

/// Load a config that must already exist on disk.
async fn load_existing(path: &PathBuf) -> Result<PreflightConfig, CliError> {
    match PreflightConfig::from_file(path).await {
        Ok(config) => Ok(config),
        Err(PreflightError::Config(ConfigError::FileNotFound { .. })) => Err(CliError::Config(
            "preflight.yml not found. Run 'preflight init' first".to_owned(),
        )),
        Err(e) => Err(e.into()),
    }
}
