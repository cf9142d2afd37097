//! CLI command implementations.

pub mod assemble;
pub mod init;
pub mod parts;
pub mod session;

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value. `None` means text.
    pub fn parse(value: Option<&str>) -> anyhow::Result<Self> {
        match value {
            None | Some("text") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => anyhow::bail!("unknown format '{other}' (expected text or json)"),
        }
    }
}
