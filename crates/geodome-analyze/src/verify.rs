//! Empirical convergence checks over a sequence of samples.

use serde::{Deserialize, Serialize};

use crate::convergence::ConvergenceSample;

/// Which measured quantity a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Surface area.
    Area,
    /// Enclosed volume.
    Volume,
}

/// A step where the absolute error grew instead of shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Quantity whose error grew.
    pub quantity: Quantity,
    /// Lower frequency of the step.
    pub from_frequency: u32,
    /// Higher frequency of the step.
    pub to_frequency: u32,
    /// Absolute error at `from_frequency`.
    pub from_error: f64,
    /// Absolute error at `to_frequency`.
    pub to_error: f64,
}

/// Outcome of [`verify_convergence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Number of samples checked.
    pub samples: usize,
    /// |ε(ν)| never grew by more than the tolerance.
    pub area_monotonic: bool,
    /// |V(ν) − V_sphere| never grew by more than the tolerance.
    pub volume_monotonic: bool,
    /// Every sample's surface area was below the sphere's.
    pub approaches_from_below: bool,
    /// Steps that broke monotonicity.
    pub violations: Vec<Violation>,
    /// Fitted `p` in |ε| ≈ Cν^−p, if at least two samples have nonzero error.
    pub area_order: Option<f64>,
    /// Same fit for the volume error.
    pub volume_order: Option<f64>,
}

impl ConvergenceReport {
    /// Both errors shrink monotonically.
    pub fn is_monotonic(&self) -> bool {
        self.area_monotonic && self.volume_monotonic
    }
}

/// Check that |ε(ν)| and |V(ν) − V_sphere| are non-increasing in ν.
///
/// Samples are ordered by frequency before checking. A step violates
/// monotonicity when the later error exceeds the earlier one by more than
/// `tolerance` (absolute).
pub fn verify_convergence(samples: &[ConvergenceSample], tolerance: f64) -> ConvergenceReport {
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.frequency);

    let mut violations = Vec::new();
    for pair in sorted.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let steps = [
            (Quantity::Area, prev.area_error.abs(), next.area_error.abs()),
            (Quantity::Volume, prev.volume_error.abs(), next.volume_error.abs()),
        ];
        for (quantity, from_error, to_error) in steps {
            if to_error > from_error + tolerance {
                violations.push(Violation {
                    quantity,
                    from_frequency: prev.frequency,
                    to_frequency: next.frequency,
                    from_error,
                    to_error,
                });
            }
        }
    }

    let area_order = fit_order(sorted.iter().map(|s| (s.frequency, s.area_error)));
    let volume_order = fit_order(sorted.iter().map(|s| (s.frequency, s.volume_error)));

    ConvergenceReport {
        samples: sorted.len(),
        area_monotonic: !violations.iter().any(|v| v.quantity == Quantity::Area),
        volume_monotonic: !violations.iter().any(|v| v.quantity == Quantity::Volume),
        approaches_from_below: sorted.iter().all(|s| s.area_error < 0.0),
        violations,
        area_order,
        volume_order,
    }
}

/// Least-squares slope of `ln|error|` against `ln ν`, negated.
fn fit_order(points: impl Iterator<Item = (u32, f64)>) -> Option<f64> {
    let logs: Vec<(f64, f64)> = points
        .filter(|&(_, e)| e != 0.0 && e.is_finite())
        .map(|(n, e)| (f64::from(n).ln(), e.abs().ln()))
        .collect();
    if logs.len() < 2 {
        return None;
    }

    let count = logs.len() as f64;
    let mean_x = logs.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_y = logs.iter().map(|p| p.1).sum::<f64>() / count;
    let sxx: f64 = logs.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = logs.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
    Some(-sxy / sxx)
}
