//! Run configuration: TOML file values merged with command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geodome_analyze::AnalysisSettings;
use geodome_mesh::Seed;
use serde::Deserialize;

use crate::output::Format;

/// Values that may be supplied by a `--config` TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub radius: Option<f64>,
    pub frequencies: Option<Vec<u32>>,
    pub seed: Option<Seed>,
    pub max_frequency: Option<u32>,
    pub parallel: Option<bool>,
    pub format: Option<Format>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Fully resolved parameters for an `analyze` run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub radius: f64,
    pub frequencies: Vec<u32>,
    pub settings: AnalysisSettings,
    pub parallel: bool,
    pub format: Format,
}

/// Command-line values for an `analyze` run; `None` defers to the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub radius: Option<f64>,
    pub frequencies: Option<Vec<u32>>,
    pub seed: Option<Seed>,
    pub max_frequency: Option<u32>,
    pub parallel: bool,
    pub format: Option<Format>,
}

impl RunConfig {
    /// Merge flags over file values. Radius and frequencies must come from one of them.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let defaults = AnalysisSettings::default();
        let Some(radius) = cli.radius.or(file.radius) else {
            bail!("no radius given (use --radius or set `radius` in the config file)");
        };
        let Some(frequencies) = cli.frequencies.or(file.frequencies) else {
            bail!("no frequencies given (use --frequencies, --range, or set `frequencies` in the config file)");
        };
        Ok(Self {
            radius,
            frequencies,
            settings: AnalysisSettings {
                seed: cli.seed.or(file.seed).unwrap_or(defaults.seed),
                max_frequency: cli
                    .max_frequency
                    .or(file.max_frequency)
                    .unwrap_or(defaults.max_frequency),
            },
            parallel: cli.parallel || file.parallel.unwrap_or(false),
            format: cli.format.or(file.format).unwrap_or_default(),
        })
    }
}

/// Parse an inclusive frequency range: `START..END` or `START..=END`.
pub fn parse_range(s: &str) -> Result<Vec<u32>> {
    let Some((start, end)) = s.split_once("..") else {
        bail!("expected a range like 1..16, got '{s}'");
    };
    let end = end.strip_prefix('=').unwrap_or(end);
    let start: u32 = start
        .trim()
        .parse()
        .with_context(|| format!("invalid range start in '{s}'"))?;
    let end: u32 = end
        .trim()
        .parse()
        .with_context(|| format!("invalid range end in '{s}'"))?;
    if end < start {
        bail!("range '{s}' is empty");
    }
    Ok((start..=end).collect())
}
