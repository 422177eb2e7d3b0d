use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use photosynthesis_core::FilterColor;
use serde::Deserialize;

/// Run settings loaded from a TOML file and overridden by command-line flags.
///
/// Light and co2 are kept as raw integers so out-of-range values reach the
/// resolver and are clamped with a notice rather than rejected here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    /// Filter placed in front of the light.
    pub(crate) filter: FilterColor,
    /// Requested light level.
    pub(crate) light: i32,
    /// Requested co2 level.
    pub(crate) co2: i32,
    /// Seed for every random draw of the run.
    pub(crate) seed: Option<u64>,
    /// Picture drawn inside the plant container.
    pub(crate) plant_image: Option<PathBuf>,
    /// Whether presentation waits for the display refresh.
    pub(crate) vsync: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            filter: FilterColor::Colorless,
            light: 5,
            co2: 5,
            seed: None,
            plant_image: None,
            vsync: true,
        }
    }
}

impl SimulationConfig {
    /// Reads a configuration file. Missing keys fall back to their defaults.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid simulation config toml")
    }
}
