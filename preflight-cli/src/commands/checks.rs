//! `preflight checks` command handler -- list check and service IDs

use std::io::Write;

use serde::Serialize;

use preflight_checks::registry;
use preflight_detect::KNOWN_SERVICES;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `checks` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let checks = registry()
        .iter()
        .map(|check| CheckEntry {
            id: check.id().to_owned(),
            title: check.title().to_owned(),
        })
        .collect();

    let payload = ChecksList {
        checks,
        services: KNOWN_SERVICES.iter().map(|s| (*s).to_owned()).collect(),
    };
    writer.render(&payload)
}

#[derive(Serialize)]
struct CheckEntry {
    id: String,
    title: String,
}

#[derive(Serialize)]
struct ChecksList {
    checks: Vec<CheckEntry>,
    services: Vec<String>,
}

impl Render for ChecksList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Checks:")?;
        for check in &self.checks {
            writeln!(w, "  {:<18} {}", check.id, check.title)?;
        }
        writeln!(w)?;
        writeln!(w, "Services (with validation checks):")?;
        for service in &self.services {
            writeln!(w, "  {service}")?;
        }
        writeln!(w)?;
        writeln!(w, "Use 'preflight ignore <id>' to silence a check")?;
        writeln!(w, "Use 'preflight unignore <id>' to re-enable it")?;
        Ok(())
    }
}
