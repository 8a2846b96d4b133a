//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod inspect;

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use lotscan_core::{ExtractionConfig, LotscanConfig, LotscanError, SegmentationMode, ValidityGate};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lotscan")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LotscanConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            if !default_path.exists() {
                return Ok(LotscanConfig::default());
            }
            default_path
        }
    };

    debug!("Using config file {}", path.display());
    LotscanConfig::from_file(&path)
        .map_err(|e| LotscanError::Config(format!("{}: {}", path.display(), e)).into())
}

/// Boundary detection strategy.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Lots start at roster artist names
    NameAnchored,
    /// Lots start at "<index> <Name>" lines
    IndexAnchored,
}

impl From<ModeArg> for SegmentationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::NameAnchored => SegmentationMode::NameAnchored,
            ModeArg::IndexAnchored => SegmentationMode::IndexAnchored,
        }
    }
}

/// Record validity gate.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GateArg {
    /// Keep lots with both an artist and a title
    ArtistAndTitle,
    /// Keep lots with an artist or a title
    ArtistOrTitle,
}

impl From<GateArg> for ValidityGate {
    fn from(gate: GateArg) -> Self {
        match gate {
            GateArg::ArtistAndTitle => ValidityGate::ArtistAndTitle,
            GateArg::ArtistOrTitle => ValidityGate::ArtistOrTitle,
        }
    }
}

/// Extraction settings that override the config file.
#[derive(Args, Debug, Default)]
pub struct ExtractionOverrides {
    /// Boundary detection strategy
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Which lots become records
    #[arg(long, value_enum)]
    gate: Option<GateArg>,

    /// Artist roster entry (repeatable, replaces the configured roster)
    #[arg(long = "artist", value_name = "NAME")]
    artists: Vec<String>,
}

impl ExtractionOverrides {
    pub fn apply(&self, config: &mut ExtractionConfig) {
        if let Some(mode) = self.mode {
            config.segmentation_mode = mode.into();
        }
        if let Some(gate) = self.gate {
            config.field_validity_gate = gate.into();
        }
        if !self.artists.is_empty() {
            config.artist_roster = self.artists.clone();
        }
    }
}
