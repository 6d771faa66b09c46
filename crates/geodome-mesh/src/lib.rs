#![warn(missing_docs)]

//! Geodesic sphere construction for geodome.
//!
//! Builds a closed triangle mesh approximating a sphere by:
//! 1. Projecting a seed polyhedron's corners onto the sphere
//! 2. Subdividing each seed face into ν² triangles by barycentric interpolation
//! 3. Projecting every interpolated point radially onto the sphere
//! 4. Welding the points shared by adjacent seed faces
//!
//! # Example
//!
//! ```
//! use geodome_mesh::build;
//!
//! let mesh = build(4, 10.0).unwrap();
//! assert_eq!(mesh.num_faces(), 20 * 4 * 4);
//! assert_eq!(mesh.num_vertices(), 10 * 4 * 4 + 2);
//! ```

pub mod error;
pub mod seed;
mod subdivide;
mod weld;

pub use error::{MeshError, Result};
pub use seed::Seed;
pub use subdivide::{build, build_with_seed};

use std::collections::{BTreeSet, HashMap};

use geodome_math::Point3;

/// Closed triangle mesh with shared vertices.
///
/// Immutable once constructed: the builder and [`Mesh::from_parts`] are the
/// only ways to make one.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh from raw vertices and faces.
    ///
    /// Only checks that every face index refers to an existing vertex; use
    /// [`Mesh::validate_manifold`] for topological checks.
    pub fn from_parts(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Faces as vertex index triples, wound counter-clockwise seen from outside.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Iterate over faces as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.faces
            .iter()
            .map(|f| f.map(|i| self.vertices[i as usize]))
    }

    /// Unique undirected edges as `(low, high)` vertex index pairs, sorted.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges = BTreeSet::new();
        for f in &self.faces {
            for k in 0..3 {
                let (a, b) = (f[k], f[(k + 1) % 3]);
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().collect()
    }

    /// Number of unique undirected edges.
    pub fn num_edges(&self) -> usize {
        self.edges().len()
    }

    /// Euler characteristic `V − E + F`; 2 for any closed genus-0 mesh.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    /// Largest distance of any vertex from the sphere of `radius` at the origin.
    ///
    /// Norms are taken in units of `radius` so radii near the ends of the
    /// `f64` range do not overflow. `radius` must be positive.
    pub fn max_radial_deviation(&self, radius: f64) -> f64 {
        self.vertices
            .iter()
            .map(|v| ((v.coords / radius).norm() - 1.0).abs())
            .fold(0.0, f64::max)
            * radius
    }

    /// Check that the mesh is a closed, consistently oriented 2-manifold.
    ///
    /// Every directed edge must occur exactly once and its reverse must also
    /// occur, so each undirected edge borders exactly two faces that agree
    /// on orientation.
    pub fn validate_manifold(&self) -> Result<()> {
        if self.faces.is_empty() {
            return Err(MeshError::NonManifold("mesh has no faces".into()));
        }

        let mut directed: HashMap<(u32, u32), usize> = HashMap::with_capacity(self.faces.len() * 3);
        for (face, f) in self.faces.iter().enumerate() {
            if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
                return Err(MeshError::NonManifold(format!(
                    "face {face} repeats a vertex: {f:?}"
                )));
            }
            for k in 0..3 {
                let edge = (f[k], f[(k + 1) % 3]);
                if let Some(other) = directed.insert(edge, face) {
                    return Err(MeshError::NonManifold(format!(
                        "directed edge {edge:?} used by faces {other} and {face}"
                    )));
                }
            }
        }

        if let Some(&(a, b)) = directed.keys().find(|&&(a, b)| !directed.contains_key(&(b, a))) {
            return Err(MeshError::NonManifold(format!(
                "edge ({a}, {b}) borders only one face"
            )));
        }

        Ok(())
    }
}
