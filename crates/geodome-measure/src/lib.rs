#![warn(missing_docs)]

//! Mesh measurement for geodome.
//!
//! Computes the surface area and enclosed volume of closed triangle meshes,
//! and the strut (edge) statistics that describe how buildable a geodesic
//! dome is.

pub mod error;
pub mod struts;

pub use error::{MeasureError, Result};
pub use struts::{edge_stats, strut_classes, EdgeStats, StrutClass};

use geodome_math::{isoperimetric_quotient, signed_volume, triangle_area};
use geodome_mesh::Mesh;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A face is degenerate when its area is at most this fraction of the
/// squared mesh scale (largest vertex distance from the origin).
pub const DEGENERATE_AREA_EPS: f64 = 1e-12;

/// Surface area and enclosed volume of a closed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Sum of face areas.
    pub surface_area: f64,
    /// Absolute value of the summed signed tetrahedron volumes.
    pub volume: f64,
}

impl Measurement {
    /// Isoperimetric quotient `36πV²/S³`: 1 for a sphere, less otherwise.
    pub fn isoperimetric_quotient(&self) -> f64 {
        isoperimetric_quotient(self.surface_area, self.volume)
    }
}

/// Measure the surface area and enclosed volume of `mesh`.
///
/// Area is `Σ ½‖(B−A)×(C−A)‖`. Volume uses the divergence theorem: the sum
/// of the signed volumes of the tetrahedra joining each face to the origin,
/// which is positive for a closed mesh with outward winding.
///
/// Fails with [`MeasureError::DegenerateMesh`] on the first face whose area
/// is at or below [`DEGENERATE_AREA_EPS`] times the squared mesh scale.
pub fn measure(mesh: &Mesh) -> Result<Measurement> {
    if mesh.num_faces() == 0 {
        return Err(MeasureError::EmptyMesh);
    }

    let scale = mesh
        .vertices()
        .iter()
        .map(|v| v.coords.norm())
        .fold(0.0, f64::max);
    let min_area = DEGENERATE_AREA_EPS * scale * scale;

    let mut surface_area = 0.0;
    let mut volume = 0.0;
    for (face, [a, b, c]) in mesh.triangles().enumerate() {
        let area = triangle_area(&a, &b, &c);
        if area <= min_area {
            return Err(MeasureError::DegenerateMesh { face, area });
        }
        surface_area += area;
        volume += signed_volume(&a, &b, &c);
    }

    let measurement = Measurement {
        surface_area,
        volume: volume.abs(),
    };
    debug!(
        faces = mesh.num_faces(),
        surface_area, volume = measurement.volume, "measured mesh"
    );
    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geodome_math::Point3;

    fn make_cube_mesh(size: f64) -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
            Point3::new(0.0, 0.0, size),
            Point3::new(size, 0.0, size),
            Point3::new(size, size, size),
            Point3::new(0.0, size, size),
        ];
        #[rustfmt::skip]
        let faces = vec![
            [0, 2, 1], [0, 3, 2],
            [4, 5, 6], [4, 6, 7],
            [0, 1, 5], [0, 5, 4],
            [2, 3, 7], [2, 7, 6],
            [0, 4, 7], [0, 7, 3],
            [1, 2, 6], [1, 6, 5],
        ];
        Mesh::from_parts(vertices, faces).unwrap()
    }

    /// Edge length of the icosahedron inscribed in a sphere of radius `r`.
    fn icosahedron_edge(r: f64) -> f64 {
        4.0 * r / (10.0 + 2.0 * 5f64.sqrt()).sqrt()
    }

    #[test]
    fn test_cube() {
        let m = measure(&make_cube_mesh(10.0)).unwrap();
        assert_relative_eq!(m.surface_area, 600.0, epsilon = 1e-9);
        // Volume is independent of the cube not being centered at the origin.
        assert_relative_eq!(m.volume, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inverted_winding_volume_positive() {
        let cube = make_cube_mesh(2.0);
        let flipped: Vec<[u32; 3]> = cube.faces().iter().map(|&[a, b, c]| [a, c, b]).collect();
        let mesh = Mesh::from_parts(cube.vertices().to_vec(), flipped).unwrap();
        let m = measure(&mesh).unwrap();
        assert_relative_eq!(m.volume, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_base_icosahedron() {
        let mesh = geodome_mesh::build(1, 1.0).unwrap();
        let m = measure(&mesh).unwrap();
        let a = icosahedron_edge(1.0);
        let expected_area = 5.0 * 3f64.sqrt() * a * a;
        let expected_volume = 5.0 / 12.0 * (3.0 + 5f64.sqrt()) * a.powi(3);
        assert!((m.surface_area - expected_area).abs() < 1e-6);
        assert!((m.volume - expected_volume).abs() < 1e-6);
        assert!((m.surface_area - 9.574541383).abs() < 1e-6);
        assert!((m.volume - 2.536150710).abs() < 1e-6);
        // Below the unit sphere's 4π: the facets are chords.
        assert!(m.surface_area < 4.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_isoperimetric_quotient_below_one() {
        for n in [1, 2, 4, 8] {
            let q = measure(&geodome_mesh::build(n, 3.0).unwrap())
                .unwrap()
                .isoperimetric_quotient();
            assert!(q > 0.6 && q < 1.0, "frequency {n}: Q = {q}");
        }
    }

    #[test]
    fn test_deterministic() {
        let a = measure(&geodome_mesh::build(7, 2.0).unwrap()).unwrap();
        let b = measure(&geodome_mesh::build(7, 2.0).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_face() {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::from_parts(vertices, vec![[0, 3, 1], [0, 1, 2]]).unwrap();
        let err = measure(&mesh).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateMesh { face: 1, .. }));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::from_parts(Vec::new(), Vec::new()).unwrap();
        assert_eq!(measure(&mesh), Err(MeasureError::EmptyMesh));
    }
}
