//! `preflight init` command handler -- write a starter preflight.yml

use crate::cli::InitArgs;
use crate::error::CliError;

/// Starter configuration template with commented-out options.
const STARTER_CONFIG: &str = r#"# preflight.yml -- launch readiness scanner configuration
# Every key is optional; uncomment what you need.

# urls:
#   staging: https://staging.example.com
#   production: https://example.com

# checks:
#   seoMeta:
#     mainLayout: app/views/layouts/application.html.erb
#   healthEndpoint:
#     path: /healthz
#   stripeWebhook:
#     url: https://example.com/webhooks/stripe

# Force service declarations on or off regardless of detection:
# services:
#   stripe: true

# Check IDs to skip (see 'preflight checks' for the full list):
ignore: []

# Per-check timeout in seconds (default: 30):
# timeoutSecs: 30
"#;

/// Execute the `init` command.
pub async fn execute(args: InitArgs) -> Result<(), CliError> {
    let config_path = args.path.join("preflight.yml");

    if config_path.exists() {
        return Err(CliError::Command(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    tokio::fs::write(&config_path, STARTER_CONFIG).await?;
    println!("Created {}", config_path.display());
    println!("Run 'preflight scan' to check your project");
    Ok(())
}
