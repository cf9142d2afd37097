//! `carconf.toml` parsing and host configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carconf_core::{Part, PartRegistry};
use serde::{Deserialize, Serialize};

/// File name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "carconf.toml";

/// The top-level host configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarconfManifest {
    /// Presentation timing and titles.
    #[serde(default)]
    pub presentation: PresentationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog override. Empty means the built-in car.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Presentation section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Title shown while configuring.
    pub title: String,
    /// Delay before the success banner, in milliseconds.
    pub success_delay_ms: u64,
    /// Whether to flash the title on completion.
    pub flash_title: bool,
    /// Number of title frames to flash.
    pub flash_frames: u32,
    /// Delay between title frames, in milliseconds.
    pub flash_interval_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: "Car Configurator".to_string(),
            success_delay_ms: 300,
            flash_title: true,
            flash_frames: 7,
            flash_interval_ms: 500,
        }
    }
}

impl PresentationConfig {
    /// Same titles with every delay removed.
    pub fn immediate(&self) -> Self {
        Self {
            success_delay_ms: 0,
            flash_interval_ms: 0,
            ..self.clone()
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Debug-level logging for the configurator crates.
    #[serde(default)]
    pub verbose: bool,
}

impl CarconfManifest {
    /// Search upward from `start_dir` for `carconf.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let manifest = Self::load(&candidate)?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest at an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing carconf.toml")
    }

    /// Build the part catalog for a session.
    pub fn registry(&self) -> Result<PartRegistry> {
        if self.parts.is_empty() {
            return PartRegistry::car_default().context("built-in catalog");
        }
        PartRegistry::new(self.parts.clone()).context("invalid [[parts]] catalog")
    }

    /// Generate the default template for `carconf init`.
    pub fn template() -> String {
        let mut out = String::from(
            r#"[presentation]
title = "Car Configurator"
success_delay_ms = 300
flash_title = true
flash_frames = 7
flash_interval_ms = 500

[logging]
verbose = false
"#,
        );
        for part in carconf_core::default_parts() {
            out.push_str(&format!(
                "\n[[parts]]\nid = \"{}\"\nexternal_id = {}\nname = \"{}\"\n",
                part.id, part.external_id, part.name
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[presentation]
title = "Truck Builder"
success_delay_ms = 0
flash_title = false

[logging]
verbose = true

[[parts]]
id = "cab"
external_id = 1
name = "Cab"

[[parts]]
id = "bed"
external_id = 2
name = "Bed"
"#;
        let manifest = CarconfManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.presentation.title, "Truck Builder");
        assert_eq!(manifest.presentation.success_delay_ms, 0);
        assert!(!manifest.presentation.flash_title);
        // Unset keys keep their defaults.
        assert_eq!(manifest.presentation.flash_frames, 7);
        assert!(manifest.logging.verbose);

        let registry = manifest.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_of("bed"), Some("Bed"));
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = CarconfManifest::from_str("").unwrap();
        assert_eq!(manifest.presentation, PresentationConfig::default());
        assert!(!manifest.logging.verbose);
        assert_eq!(manifest.registry().unwrap().len(), 5);
    }

    #[test]
    fn duplicate_parts_rejected() {
        let toml_str = r#"
[[parts]]
id = "cab"
external_id = 1
name = "Cab"

[[parts]]
id = "cab"
external_id = 2
name = "Cab again"
"#;
        let manifest = CarconfManifest::from_str(toml_str).unwrap();
        let err = manifest.registry().unwrap_err();
        assert!(format!("{err:#}").contains("duplicate part id 'cab'"));
    }

    #[test]
    fn template_round_trips() {
        let manifest = CarconfManifest::from_str(&CarconfManifest::template()).unwrap();
        assert_eq!(manifest.presentation, PresentationConfig::default());
        let registry = manifest.registry().unwrap();
        assert_eq!(
            registry.all_parts(),
            PartRegistry::car_default().unwrap().all_parts()
        );
    }

    #[test]
    fn immediate_drops_delays() {
        let presentation = PresentationConfig::default().immediate();
        assert_eq!(presentation.success_delay_ms, 0);
        assert_eq!(presentation.flash_interval_ms, 0);
        assert_eq!(presentation.flash_frames, 7);
    }

    #[test]
    fn find_and_load_searches_upward() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[presentation]\ntitle = \"Found\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_in) = CarconfManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.presentation.title, "Found");
        assert_eq!(found_in, dir.path());
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "[presentation\n").unwrap();
        let err = CarconfManifest::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
