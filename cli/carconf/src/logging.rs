//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the presentation output.
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for the given verbosity.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "carconf=debug,carconf_core=debug,info"
    } else {
        "carconf=info,carconf_core=info,warn"
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()
        .context("initializing logging")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
        assert!(default_directives(true).contains("carconf_core=debug"));
    }
}
