//! Seed polyhedra for geodesic subdivision.
//!
//! Every seed is a regular polyhedron centered at the origin with faces
//! wound counter-clockwise when viewed from outside.

use std::fmt;
use std::str::FromStr;

use geodome_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Golden ratio, used by the icosahedron's vertex coordinates.
const PHI: f64 = 1.618_033_988_749_895;

/// Regular polyhedron whose faces are subdivided into a geodesic sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// 12 vertices, 30 edges, 20 faces. The classic geodesic dome seed.
    #[default]
    Icosahedron,
    /// 6 vertices, 12 edges, 8 faces.
    Octahedron,
    /// 4 vertices, 6 edges, 4 faces.
    Tetrahedron,
}

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

const OCTAHEDRON_FACES: [[u32; 3]; 8] = [
    [0, 2, 4],
    [2, 1, 4],
    [1, 3, 4],
    [3, 0, 4],
    [2, 0, 5],
    [1, 2, 5],
    [3, 1, 5],
    [0, 3, 5],
];

const TETRAHEDRON_FACES: [[u32; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

impl Seed {
    /// All seeds, in declaration order.
    pub const ALL: [Seed; 3] = [Seed::Icosahedron, Seed::Octahedron, Seed::Tetrahedron];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Seed::Icosahedron => "icosahedron",
            Seed::Octahedron => "octahedron",
            Seed::Tetrahedron => "tetrahedron",
        }
    }

    /// Corner positions. Not normalized: callers project them onto their sphere.
    pub fn vertices(&self) -> Vec<Point3> {
        match self {
            Seed::Icosahedron => vec![
                Point3::new(-1.0, PHI, 0.0),
                Point3::new(1.0, PHI, 0.0),
                Point3::new(-1.0, -PHI, 0.0),
                Point3::new(1.0, -PHI, 0.0),
                Point3::new(0.0, -1.0, PHI),
                Point3::new(0.0, 1.0, PHI),
                Point3::new(0.0, -1.0, -PHI),
                Point3::new(0.0, 1.0, -PHI),
                Point3::new(PHI, 0.0, -1.0),
                Point3::new(PHI, 0.0, 1.0),
                Point3::new(-PHI, 0.0, -1.0),
                Point3::new(-PHI, 0.0, 1.0),
            ],
            Seed::Octahedron => vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, -1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, -1.0),
            ],
            Seed::Tetrahedron => vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(-1.0, 1.0, -1.0),
                Point3::new(-1.0, -1.0, 1.0),
            ],
        }
    }

    /// Faces as outward-wound vertex index triples.
    pub fn faces(&self) -> &'static [[u32; 3]] {
        match self {
            Seed::Icosahedron => &ICOSAHEDRON_FACES,
            Seed::Octahedron => &OCTAHEDRON_FACES,
            Seed::Tetrahedron => &TETRAHEDRON_FACES,
        }
    }

    fn base_counts(&self) -> (u64, u64, u64) {
        match self {
            Seed::Icosahedron => (12, 30, 20),
            Seed::Octahedron => (6, 12, 8),
            Seed::Tetrahedron => (4, 6, 4),
        }
    }

    /// Vertex count after subdividing at `frequency`:
    /// `V₀ + E₀(ν−1) + F₀(ν−1)(ν−2)/2`. Saturates at `u64::MAX`.
    pub fn vertex_count(&self, frequency: u32) -> u64 {
        let (v, e, f) = self.base_counts();
        let n = u64::from(frequency.max(1));
        // (ν−1)(ν−2) is always even.
        let interior = ((n - 1) * n.saturating_sub(2) / 2).saturating_mul(f);
        v.saturating_add(e * (n - 1)).saturating_add(interior)
    }

    /// Edge count after subdividing at `frequency`: `E₀ν²`. Saturates at `u64::MAX`.
    pub fn edge_count(&self, frequency: u32) -> u64 {
        let n = u64::from(frequency);
        (n * n).saturating_mul(self.base_counts().1)
    }

    /// Face count after subdividing at `frequency`: `F₀ν²`. Saturates at `u64::MAX`.
    pub fn face_count(&self, frequency: u32) -> u64 {
        let n = u64::from(frequency);
        (n * n).saturating_mul(self.base_counts().2)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Seed {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icosahedron" | "ico" => Ok(Seed::Icosahedron),
            "octahedron" | "oct" => Ok(Seed::Octahedron),
            "tetrahedron" | "tet" => Ok(Seed::Tetrahedron),
            other => Err(MeshError::InvalidParameter(format!(
                "unknown seed polyhedron '{other}'"
            ))),
        }
    }
}
