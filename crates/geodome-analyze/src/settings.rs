//! Analysis settings.

use geodome_mesh::Seed;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Default upper bound on the analyzed frequency.
///
/// A frequency-512 icosahedral mesh has about 2.6 million vertices.
pub const DEFAULT_MAX_FREQUENCY: u32 = 512;

/// Convergence analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Seed polyhedron to subdivide.
    pub seed: Seed,
    /// Largest frequency the analyzer will build. Bounds memory and time,
    /// since vertex and face counts grow quadratically.
    pub max_frequency: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            seed: Seed::Icosahedron,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }
}

impl AnalysisSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_frequency < 1 {
            return Err(AnalysisError::InvalidSettings(
                "max_frequency must be at least 1".into(),
            ));
        }
        if self.seed.vertex_count(self.max_frequency) > u64::from(u32::MAX) {
            return Err(AnalysisError::InvalidSettings(format!(
                "max_frequency {} exceeds the addressable mesh size",
                self.max_frequency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        assert!(AnalysisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_frequency() {
        let settings = AnalysisSettings {
            max_frequency: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AnalysisError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_huge_max_frequency() {
        let settings = AnalysisSettings {
            max_frequency: 1_000_000,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings: AnalysisSettings = toml::from_str("seed = \"octahedron\"").unwrap();
        assert_eq!(settings.seed, Seed::Octahedron);
        assert_eq!(settings.max_frequency, DEFAULT_MAX_FREQUENCY);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = AnalysisSettings {
            seed: Seed::Tetrahedron,
            max_frequency: 64,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"tetrahedron\""));
        let back: AnalysisSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
