//! `preflight scan` command handler

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use preflight_checks::{registry, Runner};
use preflight_core::config::PreflightConfig;
use preflight_core::context::Context;
use preflight_core::types::{CheckResult, Report, ReportTally, Severity};
use preflight_detect::{detect_services, detect_stack, Evidence};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
pub async fn execute(args: ScanArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let root = args.path.clone();
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| root.join("preflight.yml"));

    let mut config = PreflightConfig::load_or_default(&config_path).await?;
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = Some(secs);
        config.validate()?;
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.effective_timeout_secs()))
        .user_agent(concat!("preflight/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CliError::Command(format!("failed to build http client: {e}")))?;

    info!(path = %root.display(), "starting preflight scan");

    // Evidence collection walks the filesystem; keep it off the runtime threads.
    let evidence = {
        let root = root.clone();
        tokio::task::spawn_blocking(move || Evidence::collect(root))
            .await
            .map_err(|e| CliError::Command(format!("evidence collection failed: {e}")))?
    };

    let stack = detect_stack(&evidence);
    let services = detect_services(&evidence);
    info!(stack = %stack, "stack detected");

    let ctx = Context::builder(root.clone())
        .stack(stack)
        .services(services)
        .config(config)
        .client(client)
        .verbose(args.verbose)
        .build();

    let checks = registry();
    let runner = Runner::from_config(&ctx.config);
    let report = runner.run(&ctx, &checks).await;

    let payload = ScanReport::new(&ctx, &report);
    writer.render(&payload)?;

    if !report.passed() {
        return Err(CliError::CheckFailures(report.error_count()));
    }

    Ok(())
}

/// Rendered scan report payload.
#[derive(Serialize)]
pub struct ScanReport {
    pub path: String,
    pub stack: String,
    pub results: Vec<CheckResult>,
    pub tally: ReportTally,
    pub passed: bool,
    #[serde(skip)]
    verbose: bool,
}

impl ScanReport {
    fn new(ctx: &Context, report: &Report) -> Self {
        Self {
            path: ctx.root_dir.display().to_string(),
            stack: ctx.stack.to_string(),
            results: report.results.clone(),
            tally: report.tally(),
            passed: report.passed(),
            verbose: ctx.verbose,
        }
    }
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Preflight scan: {}", self.path.bold())?;
        writeln!(w, "Stack: {}", self.stack)?;
        writeln!(w)?;

        for result in &self.results {
            let glyph = if result.passed {
                "✓".green()
            } else if result.severity == Severity::Error {
                "✗".red().bold()
            } else {
                "!".yellow()
            };
            writeln!(w, "{glyph} {}: {}", result.title, result.message)?;

            for suggestion in &result.suggestions {
                writeln!(w, "    → {suggestion}")?;
            }
            if self.verbose {
                for detail in &result.details {
                    writeln!(w, "    · {}", detail.dimmed())?;
                }
            }
        }

        writeln!(w)?;
        let summary = format!(
            "Passed: {}  Warnings: {}  Errors: {}",
            self.tally.passed, self.tally.warnings, self.tally.errors
        );
        if self.passed {
            writeln!(w, "{}", summary.green().bold())?;
        } else {
            writeln!(w, "{}", summary.red().bold())?;
        }

        Ok(())
    }
}
