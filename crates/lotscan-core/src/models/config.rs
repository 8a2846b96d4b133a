//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::table::TableFormat;

/// Main configuration for the lotscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LotscanConfig {
    /// Lot extraction configuration.
    pub extraction: ExtractionConfig,

    /// Input discovery configuration.
    pub input: InputConfig,

    /// Output table configuration.
    pub output: OutputConfig,
}

/// How lot boundaries are found in catalog text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// A lot starts at each occurrence of a roster artist name.
    #[default]
    NameAnchored,
    /// A lot starts at each line holding a numeric lot index and a name.
    IndexAnchored,
}

/// Which segments become records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityGate {
    /// Artist and title must both be present.
    #[default]
    ArtistAndTitle,
    /// Either artist or title is enough.
    ArtistOrTitle,
}

impl ValidityGate {
    /// Whether a record with these artist/title values passes the gate.
    pub fn admits(&self, artist: &str, title: &str) -> bool {
        match self {
            ValidityGate::ArtistAndTitle => !artist.is_empty() && !title.is_empty(),
            ValidityGate::ArtistOrTitle => !artist.is_empty() || !title.is_empty(),
        }
    }
}

/// Lot extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Artist names used as lot anchors in name-anchored mode.
    pub artist_roster: Vec<String>,

    /// Boundary detection strategy.
    pub segmentation_mode: SegmentationMode,

    /// Record validity gate, applied to every segment of a run.
    pub field_validity_gate: ValidityGate,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            artist_roster: default_roster(),
            segmentation_mode: SegmentationMode::default(),
            field_validity_gate: ValidityGate::default(),
        }
    }
}

fn default_roster() -> Vec<String> {
    [
        "Avery Singer",
        "Harold Ancart",
        "Hernan Bas",
        "Jonas Wood",
        "Lisa Yuskavage",
        "Lucas Arruda",
        "Lucy Bull",
        "Scott Kahn",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Input discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File extensions (without dot, case-insensitive) treated as documents.
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string(), "txt".to_string()],
        }
    }
}

/// Output table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table serialization format.
    pub format: TableFormat,

    /// Output file name, used when no explicit path is given.
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: TableFormat::Csv,
            file_name: "auction_data.csv".to_string(),
        }
    }
}

impl LotscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gate_strict_and_loose() {
        assert!(ValidityGate::ArtistAndTitle.admits("Jonas Wood", "Untitled"));
        assert!(!ValidityGate::ArtistAndTitle.admits("Jonas Wood", ""));
        assert!(ValidityGate::ArtistOrTitle.admits("Jonas Wood", ""));
        assert!(ValidityGate::ArtistOrTitle.admits("", "Untitled"));
        assert!(!ValidityGate::ArtistOrTitle.admits("", ""));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "extraction": { "segmentation_mode": "index_anchored" } }"#;
        let config: LotscanConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extraction.segmentation_mode, SegmentationMode::IndexAnchored);
        assert_eq!(config.extraction.field_validity_gate, ValidityGate::ArtistAndTitle);
        assert_eq!(config.extraction.artist_roster.len(), 8);
        assert_eq!(config.input.extensions, vec!["pdf", "txt"]);
        assert_eq!(config.output.format, TableFormat::Csv);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LotscanConfig::default();
        config.extraction.field_validity_gate = ValidityGate::ArtistOrTitle;
        config.extraction.artist_roster = vec!["Scott Kahn".to_string()];
        config.save(&path).unwrap();

        let loaded = LotscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.field_validity_gate, ValidityGate::ArtistOrTitle);
        assert_eq!(loaded.extraction.artist_roster, vec!["Scott Kahn"]);
    }
}
