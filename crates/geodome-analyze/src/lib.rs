#![warn(missing_docs)]

//! Convergence analysis for geodome.
//!
//! Builds geodesic spheres at increasing frequency, measures them, and
//! compares the results with the ideal sphere's closed-form surface area
//! and volume.
//!
//! # Example
//!
//! ```
//! use geodome_analyze::{analyze, verify_convergence};
//!
//! let samples: Vec<_> = analyze(10.0, [1, 2, 4, 8])
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! let report = verify_convergence(&samples, 1e-9);
//! assert!(report.is_monotonic());
//! assert!(report.approaches_from_below);
//! ```

pub mod convergence;
pub mod error;
pub mod settings;
pub mod verify;

pub use convergence::{Convergence, ConvergenceSample};
pub use error::{AnalysisError, Result};
pub use settings::{AnalysisSettings, DEFAULT_MAX_FREQUENCY};
pub use verify::{verify_convergence, ConvergenceReport, Quantity, Violation};

use geodome_math::SphereReference;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::convergence::sample_frequency;

/// Runs convergence analyses with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    settings: AnalysisSettings,
}

impl Analyzer {
    /// Create an analyzer after validating `settings`.
    pub fn new(settings: AnalysisSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The analyzer's settings.
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze the sphere of `radius` at each of `frequencies`.
    ///
    /// Frequencies are sorted ascending and deduplicated. Nothing is built
    /// until the returned sequence is iterated. Fails up front only for an
    /// invalid radius; bad frequencies surface as per-item errors.
    pub fn analyze(
        &self,
        radius: f64,
        frequencies: impl IntoIterator<Item = u32>,
    ) -> Result<Convergence> {
        let reference = reference_sphere(radius)?;
        let frequencies = ascending(frequencies);
        debug!(radius, count = frequencies.len(), seed = %self.settings.seed, "starting analysis");
        Ok(Convergence::new(self.settings, reference, frequencies))
    }

    /// Analyze all `frequencies` concurrently on the rayon pool.
    ///
    /// Results are collated in ascending frequency order regardless of
    /// completion order, one entry per distinct frequency.
    pub fn analyze_parallel(
        &self,
        radius: f64,
        frequencies: impl IntoIterator<Item = u32>,
    ) -> Result<Vec<Result<ConvergenceSample>>> {
        let reference = reference_sphere(radius)?;
        let frequencies = ascending(frequencies);
        debug!(radius, count = frequencies.len(), "starting parallel analysis");

        Ok(frequencies
            .par_iter()
            .map(|&nu| sample_frequency(&self.settings, &reference, nu))
            .collect())
    }

    /// Analyze a single frequency.
    pub fn sample(&self, radius: f64, frequency: u32) -> Result<ConvergenceSample> {
        let reference = reference_sphere(radius)?;
        sample_frequency(&self.settings, &reference, frequency)
    }

    /// Smallest frequency whose surface area is within `relative_tolerance`
    /// of the sphere's, i.e. `|ε(ν)| / S_sphere < relative_tolerance`.
    ///
    /// Tries ν = 1, 2, ... up to `max_frequency`, failing with
    /// [`AnalysisError::NotConverged`] if none qualifies.
    pub fn frequency_for_tolerance(
        &self,
        radius: f64,
        relative_tolerance: f64,
    ) -> Result<ConvergenceSample> {
        if !(relative_tolerance.is_finite() && relative_tolerance > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "tolerance must be positive and finite, got {relative_tolerance}"
            )));
        }
        let reference = reference_sphere(radius)?;

        for nu in 1..=self.settings.max_frequency {
            let sample = sample_frequency(&self.settings, &reference, nu)?;
            if sample.relative_area_error() < relative_tolerance {
                info!(
                    frequency = nu,
                    relative_error = sample.relative_area_error(),
                    "tolerance met"
                );
                return Ok(sample);
            }
        }

        Err(AnalysisError::NotConverged {
            tolerance: relative_tolerance,
            max_frequency: self.settings.max_frequency,
        })
    }
}

/// Analyze the icosahedral geodesic sphere of `radius` at each of
/// `frequencies` with default settings.
///
/// See [`Analyzer::analyze`].
pub fn analyze(radius: f64, frequencies: impl IntoIterator<Item = u32>) -> Result<Convergence> {
    Analyzer::default().analyze(radius, frequencies)
}

fn reference_sphere(radius: f64) -> Result<SphereReference> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "radius must be positive and finite, got {radius}"
        )));
    }
    Ok(SphereReference::new(radius))
}

fn ascending(frequencies: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut frequencies: Vec<u32> = frequencies.into_iter().collect();
    frequencies.sort_unstable();
    frequencies.dedup();
    frequencies
}
