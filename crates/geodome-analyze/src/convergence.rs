//! Per-frequency convergence samples and the lazy sequence that yields them.

use std::iter::FusedIterator;
use std::vec;

use geodome_math::SphereReference;
use geodome_measure::measure;
use geodome_mesh::build_with_seed;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::settings::AnalysisSettings;

/// Measurements of one geodesic sphere against the ideal sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSample {
    /// Subdivision frequency ν.
    pub frequency: u32,
    /// Number of mesh vertices.
    pub vertices: usize,
    /// Number of mesh faces.
    pub faces: usize,
    /// Surface area S(ν).
    pub surface_area: f64,
    /// Enclosed volume V(ν).
    pub volume: f64,
    /// ε(ν) = S(ν) − S_sphere. Negative: inscribed facets are chords.
    pub area_error: f64,
    /// V(ν) − V_sphere.
    pub volume_error: f64,
    /// 36πV²/S³.
    pub isoperimetric_quotient: f64,
}

impl ConvergenceSample {
    /// |ε(ν)| / S_sphere.
    pub fn relative_area_error(&self) -> f64 {
        (self.area_error / (self.surface_area - self.area_error)).abs()
    }

    /// |V(ν) − V_sphere| / V_sphere.
    pub fn relative_volume_error(&self) -> f64 {
        (self.volume_error / (self.volume - self.volume_error)).abs()
    }
}

/// Build, measure and compare a single frequency.
pub(crate) fn sample_frequency(
    settings: &AnalysisSettings,
    reference: &SphereReference,
    frequency: u32,
) -> Result<ConvergenceSample> {
    if frequency < 1 {
        return Err(AnalysisError::InvalidFrequency {
            frequency,
            reason: "frequency must be at least 1".into(),
        });
    }
    if frequency > settings.max_frequency {
        return Err(AnalysisError::InvalidFrequency {
            frequency,
            reason: format!("exceeds the limit of {}", settings.max_frequency),
        });
    }

    let mesh = build_with_seed(settings.seed, frequency, reference.radius)
        .map_err(|source| AnalysisError::Build { frequency, source })?;
    let m = measure(&mesh).map_err(|source| AnalysisError::DegenerateMesh { frequency, source })?;

    let sample = ConvergenceSample {
        frequency,
        vertices: mesh.num_vertices(),
        faces: mesh.num_faces(),
        surface_area: m.surface_area,
        volume: m.volume,
        area_error: m.surface_area - reference.surface_area(),
        volume_error: m.volume - reference.volume(),
        isoperimetric_quotient: m.isoperimetric_quotient(),
    };
    debug!(
        frequency,
        area_error = sample.area_error,
        volume_error = sample.volume_error,
        "sampled frequency"
    );
    Ok(sample)
}

/// Lazy, finite sequence of convergence samples in ascending frequency.
///
/// Each item is built and measured only when requested. A failed frequency
/// yields an `Err` item and the sequence continues with the next one.
/// Re-run the analysis to regenerate the sequence; it is deterministic.
#[derive(Debug, Clone)]
pub struct Convergence {
    settings: AnalysisSettings,
    reference: SphereReference,
    frequencies: vec::IntoIter<u32>,
}

impl Convergence {
    pub(crate) fn new(
        settings: AnalysisSettings,
        reference: SphereReference,
        frequencies: Vec<u32>,
    ) -> Self {
        Self {
            settings,
            reference,
            frequencies: frequencies.into_iter(),
        }
    }

    /// The ideal sphere the samples are compared against.
    pub fn reference(&self) -> &SphereReference {
        &self.reference
    }

    /// Frequencies not yet sampled.
    pub fn remaining(&self) -> &[u32] {
        self.frequencies.as_slice()
    }
}

impl Iterator for Convergence {
    type Item = Result<ConvergenceSample>;

    fn next(&mut self) -> Option<Self::Item> {
        let frequency = self.frequencies.next()?;
        let result = sample_frequency(&self.settings, &self.reference, frequency);
        if let Err(e) = &result {
            warn!(frequency, error = %e, "frequency failed");
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frequencies.size_hint()
    }
}

impl ExactSizeIterator for Convergence {}

impl FusedIterator for Convergence {}
