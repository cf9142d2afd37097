//! `carconf assemble` — run one session over a fixed list of toggles.

use std::io::Write;

use anyhow::{Context, Result};
use carconf_core::{Configurator, ExternalId, PartRegistry, SessionReport};
use serde::Serialize;

use super::OutputFormat;
use crate::manifest::PresentationConfig;
use crate::presenter::{ConsoleHost, LocalCart};

/// Final state of an `assemble` run, as printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct AssembleReport {
    #[serde(flatten)]
    pub session: SessionReport,
    /// External ids in the local cart mirror.
    pub external_cart: Vec<ExternalId>,
}

/// Toggle each id in order on a fresh session.
///
/// Stops at the first unknown id.
pub fn run(
    registry: PartRegistry,
    presentation: &PresentationConfig,
    ids: &[String],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = assemble_report(registry, ids)?;
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let host = ConsoleHost::new(&mut *out, presentation.clone());
            let mut cfg = Configurator::new(registry, host);
            for id in ids {
                writeln!(cfg.hooks_mut().writer(), "> toggle {id}")?;
                cfg.toggle_part(id)
                    .with_context(|| format!("toggling '{id}'"))?;
                cfg.hooks_mut().play_pending();
            }
            let summary = format!(
                "\nState: {}  Parts: {}/{}",
                cfg.completion_state(),
                cfg.selected_count(),
                cfg.total_parts()
            );
            writeln!(cfg.hooks_mut().writer(), "{summary}")?;
        }
    }
    Ok(())
}

/// Run the toggles with only the local cart attached and summarize.
pub fn assemble_report(registry: PartRegistry, ids: &[String]) -> Result<AssembleReport> {
    let mut cfg = Configurator::new(registry, LocalCart::new());
    for id in ids {
        cfg.toggle_part(id)
            .with_context(|| format!("toggling '{id}'"))?;
    }
    let session = cfg.report();
    let external_cart = cfg.into_hooks().items().to_vec();
    Ok(AssembleReport {
        session,
        external_cart,
    })
}

#[cfg(test)]
mod tests {
    use carconf_core::CompletionState;

    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn report_after_full_assembly() {
        let all = ids(&["car-body", "car-roof", "car-window", "wheel-rear", "wheel-front"]);
        let report = assemble_report(PartRegistry::car_default().unwrap(), &all).unwrap();
        assert_eq!(report.session.state, CompletionState::Completed);
        assert_eq!(report.session.episodes, 1);
        assert_eq!(report.external_cart.len(), 5);
        assert_eq!(report.external_cart[1], 96397398);
    }

    #[test]
    fn report_after_revert_and_readd() {
        let steps = ids(&[
            "car-body",
            "car-roof",
            "car-window",
            "wheel-rear",
            "wheel-front",
            "car-body",
            "car-body",
        ]);
        let report = assemble_report(PartRegistry::car_default().unwrap(), &steps).unwrap();
        assert_eq!(report.session.episodes, 2);
        assert_eq!(report.session.transitions.len(), 3);
        assert_eq!(report.session.selection[4], "car-body");
    }

    #[test]
    fn unknown_id_stops_run() {
        let registry = PartRegistry::car_default().unwrap();
        let err = assemble_report(registry, &ids(&["car-body", "spoiler"])).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("toggling 'spoiler'"));
        assert!(msg.contains("unknown part 'spoiler'"));
    }

    #[test]
    fn json_output_flattens_session() {
        let mut out = Vec::new();
        run(
            PartRegistry::car_default().unwrap(),
            &PresentationConfig::default(),
            &ids(&["wheel-front"]),
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["selection"][0], "wheel-front");
        assert_eq!(value["state"], "Configuring");
        assert_eq!(value["external_cart"][0], 264156021);
    }

    #[test]
    fn text_output_shows_session() {
        let mut out = Vec::new();
        run(
            PartRegistry::car_default().unwrap(),
            &PresentationConfig::default().immediate(),
            &ids(&["car-window", "car-body"]),
            OutputFormat::Text,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("> toggle car-window"));
        assert!(text.contains("  1. Car Window\n  2. Car Body"));
        assert!(text.contains("State: CONFIGURING  Parts: 2/5"));
    }
}
