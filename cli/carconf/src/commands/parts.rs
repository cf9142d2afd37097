//! `carconf parts` — list the catalog.

use std::io::Write;

use anyhow::Result;
use carconf_core::PartRegistry;

use super::OutputFormat;

/// Print the catalog in catalog order.
pub fn run(registry: &PartRegistry, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, registry.all_parts())?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{:<14}  {:>11}  NAME", "ID", "EXTERNAL ID")?;
            writeln!(out, "{}", "-".repeat(44))?;
            for part in registry.all_parts() {
                writeln!(
                    out,
                    "{:<14}  {:>11}  {}",
                    part.id.as_str(),
                    part.external_id,
                    part.name
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{} parts", registry.len())?;
        }
    }
    Ok(())
}
