//! Strut (edge) statistics.
//!
//! In a built dome every mesh edge is a strut. The number of distinct strut
//! lengths drives fabrication cost, so it is reported alongside the
//! length range.

use geodome_mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Edge length statistics over the unique edges of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStats {
    /// Number of unique edges.
    pub count: usize,
    /// Shortest edge.
    pub min: f64,
    /// Longest edge.
    pub max: f64,
    /// Mean edge length.
    pub mean: f64,
}

impl EdgeStats {
    /// Ratio of longest to shortest edge (1 for a regular polyhedron).
    pub fn spread(&self) -> f64 {
        if self.min > 0.0 {
            self.max / self.min
        } else {
            f64::INFINITY
        }
    }
}

/// A group of struts sharing one length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrutClass {
    /// Representative (shortest) length of the class.
    pub length: f64,
    /// Number of struts in the class.
    pub count: usize,
}

/// Edge length statistics, or `None` for a mesh without edges.
pub fn edge_stats(mesh: &Mesh) -> Option<EdgeStats> {
    let lengths = edge_lengths(mesh);
    if lengths.is_empty() {
        return None;
    }
    let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let max = lengths.iter().copied().fold(0.0, f64::max);
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    Some(EdgeStats {
        count: lengths.len(),
        min,
        max,
        mean,
    })
}

/// Group edges into classes of equal length, ascending.
///
/// An edge joins the current class when it is within `tolerance` of the
/// class's first (shortest) length, so a class never spans more than
/// `tolerance`.
pub fn strut_classes(mesh: &Mesh, tolerance: f64) -> Vec<StrutClass> {
    let mut lengths = edge_lengths(mesh);
    lengths.sort_by(f64::total_cmp);

    let mut classes: Vec<StrutClass> = Vec::new();
    for len in lengths {
        match classes.last_mut() {
            Some(class) if len - class.length <= tolerance => class.count += 1,
            _ => classes.push(StrutClass {
                length: len,
                count: 1,
            }),
        }
    }
    classes
}

fn edge_lengths(mesh: &Mesh) -> Vec<f64> {
    let verts = mesh.vertices();
    mesh.edges()
        .into_iter()
        .map(|(a, b)| (verts[a as usize] - verts[b as usize]).norm())
        .collect()
}
