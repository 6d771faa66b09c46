//! Barycentric subdivision of seed faces with radial projection.

use geodome_math::{project_to_sphere, Point3, Tolerance};
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::seed::Seed;
use crate::weld::VertexWelder;
use crate::Mesh;

/// Build an icosahedral geodesic sphere of `frequency` and `radius`.
///
/// The result has exactly `20ν²` faces and `10ν² + 2` vertices, all on the
/// sphere of `radius` centered at the origin. Frequency 1 is the icosahedron
/// itself.
pub fn build(frequency: u32, radius: f64) -> Result<Mesh> {
    build_with_seed(Seed::Icosahedron, frequency, radius)
}

/// Build a geodesic sphere by subdividing the faces of `seed`.
///
/// Each seed face `(A, B, C)` is split into `ν²` triangles over the lattice
/// points `(A(ν−i−j) + Bi + Cj)/ν`, each projected radially onto the sphere.
/// Points on seed edges and corners are shared with the neighboring faces.
pub fn build_with_seed(seed: Seed, frequency: u32, radius: f64) -> Result<Mesh> {
    if frequency < 1 {
        return Err(MeshError::InvalidParameter(format!(
            "frequency must be at least 1, got {frequency}"
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::InvalidParameter(format!(
            "radius must be positive and finite, got {radius}"
        )));
    }
    let expected_vertices = seed.vertex_count(frequency);
    if expected_vertices > u64::from(u32::MAX) || seed.face_count(frequency) > u64::from(u32::MAX)
    {
        return Err(MeshError::InvalidParameter(format!(
            "frequency {frequency} exceeds the addressable mesh size"
        )));
    }

    // Subdivide and weld on the unit sphere, then scale by `radius`.
    let corners = seed
        .vertices()
        .iter()
        .map(project_unit)
        .collect::<Result<Vec<_>>>()?;

    let n = frequency as usize;
    let nf = f64::from(frequency);
    let weld_tolerance = Tolerance::DEFAULT.at_scale(1.0);
    let mut welder = VertexWelder::with_capacity(weld_tolerance, expected_vertices as usize);
    let mut faces: Vec<[u32; 3]> = Vec::with_capacity(seed.face_count(frequency) as usize);
    let mut lattice: Vec<u32> = vec![0; (n + 1) * (n + 2) / 2];

    for tri in seed.faces() {
        let [a, b, c] = tri.map(|i| corners[i as usize].coords);

        for i in 0..=n {
            for j in 0..=(n - i) {
                let w = (n - i - j) as f64;
                let p = Point3::from((a * w + b * i as f64 + c * j as f64) / nf);
                lattice[lattice_index(n, i, j)] = welder.insert(project_unit(&p)?);
            }
        }

        for i in 0..n {
            for j in 0..(n - i) {
                let p00 = lattice[lattice_index(n, i, j)];
                let p10 = lattice[lattice_index(n, i + 1, j)];
                let p01 = lattice[lattice_index(n, i, j + 1)];
                faces.push([p00, p10, p01]);
                if i + j + 1 < n {
                    let p11 = lattice[lattice_index(n, i + 1, j + 1)];
                    faces.push([p10, p11, p01]);
                }
            }
        }
    }

    debug!(
        %seed,
        frequency,
        radius,
        vertices = welder.len(),
        faces = faces.len(),
        "built geodesic mesh"
    );

    if welder.len() as u64 != expected_vertices {
        return Err(MeshError::NonManifold(format!(
            "welding produced {} vertices, expected {expected_vertices}",
            welder.len()
        )));
    }

    let vertices = welder
        .into_vertices()
        .into_iter()
        .map(|v| Point3::from(v.coords * radius))
        .collect();
    Mesh::from_parts(vertices, faces)
}

/// Index of lattice point `(i, j)` (with `i + j ≤ n`) in a row-major triangle.
fn lattice_index(n: usize, i: usize, j: usize) -> usize {
    i * (n + 1) - i * i.saturating_sub(1) / 2 + j
}

fn project_unit(p: &Point3) -> Result<Point3> {
    project_to_sphere(p, 1.0).ok_or(MeshError::DegenerateProjection(p.x, p.y, p.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geodome_math::signed_volume;

    #[test]
    fn test_lattice_index_dense() {
        for n in 1..=6 {
            let mut seen = Vec::new();
            for i in 0..=n {
                for j in 0..=(n - i) {
                    seen.push(lattice_index(n, i, j));
                }
            }
            let expected: Vec<usize> = (0..(n + 1) * (n + 2) / 2).collect();
            assert_eq!(seen, expected, "frequency {n}");
        }
    }

    #[test]
    fn test_frequency_one_is_icosahedron() {
        let mesh = build(1, 1.0).unwrap();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_faces(), 20);
        assert_eq!(mesh.num_edges(), 30);
    }

    #[test]
    fn test_icosahedral_counts() {
        for n in 1..=12u32 {
            let mesh = build(n, 2.5).unwrap();
            let n = n as usize;
            assert_eq!(mesh.num_faces(), 20 * n * n);
            assert_eq!(mesh.num_vertices(), 10 * n * n + 2);
            assert_eq!(mesh.num_edges(), 30 * n * n);
            assert_eq!(mesh.euler_characteristic(), 2);
        }
    }

    #[test]
    fn test_vertices_on_sphere() {
        for &(n, r) in &[(1, 1.0), (3, 0.01), (7, 10.0), (16, 1234.5)] {
            let mesh = build(n, r).unwrap();
            let tol = Tolerance::DEFAULT;
            for v in mesh.vertices() {
                assert!(tol.on_sphere(v, r), "vertex {v:?} off sphere r={r}");
            }
            assert!(mesh.max_radial_deviation(r) < 1e-9 * r);
        }
    }

    #[test]
    fn test_closed_manifold() {
        for seed in Seed::ALL {
            for n in 1..=6 {
                let mesh = build_with_seed(seed, n, 1.0).unwrap();
                mesh.validate_manifold()
                    .unwrap_or_else(|e| panic!("{seed} frequency {n}: {e}"));
            }
        }
    }

    #[test]
    fn test_seed_counts() {
        for seed in Seed::ALL {
            for n in 1..=8 {
                let mesh = build_with_seed(seed, n, 3.0).unwrap();
                assert_eq!(mesh.num_vertices() as u64, seed.vertex_count(n));
                assert_eq!(mesh.num_faces() as u64, seed.face_count(n));
                assert_eq!(mesh.num_edges() as u64, seed.edge_count(n));
            }
        }
    }

    #[test]
    fn test_faces_wound_outward() {
        let mesh = build(5, 1.0).unwrap();
        for [a, b, c] in mesh.triangles() {
            assert!(signed_volume(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn test_no_coincident_vertices() {
        let mesh = build(6, 1.0).unwrap();
        let verts = mesh.vertices();
        let mut min_dist = f64::MAX;
        for i in 0..verts.len() {
            for j in (i + 1)..verts.len() {
                min_dist = min_dist.min((verts[i] - verts[j]).norm());
            }
        }
        assert!(min_dist > 0.1, "closest vertex pair only {min_dist} apart");
    }

    #[test]
    fn test_deterministic() {
        let a = build(9, 4.0).unwrap();
        let b = build(9, 4.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scales_with_radius() {
        let unit = build(3, 1.0).unwrap();
        let big = build(3, 7.0).unwrap();
        for (u, b) in unit.vertices().iter().zip(big.vertices()) {
            assert_relative_eq!((u.coords * 7.0 - b.coords).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_extreme_radii() {
        for r in [1e-13, 1e-12, 1e160, 1e200] {
            for n in [1, 2, 4] {
                let mesh = build(n, r).unwrap_or_else(|e| panic!("radius {r}, frequency {n}: {e}"));
                let n = n as usize;
                assert_eq!(mesh.num_vertices(), 10 * n * n + 2, "radius {r}");
                assert_eq!(mesh.num_faces(), 20 * n * n, "radius {r}");
                mesh.validate_manifold().unwrap();
                // Compare in units of the radius; the raw norm overflows above ~1e154.
                for v in mesh.vertices() {
                    assert!(((v.coords / r).norm() - 1.0).abs() < 1e-12, "radius {r}");
                }
            }
        }
    }

    #[test]
    fn test_small_radius_matches_unit_shape() {
        let unit = build(4, 1.0).unwrap();
        let tiny = build(4, 1e-12).unwrap();
        assert_eq!(unit.faces(), tiny.faces());
        for (u, t) in unit.vertices().iter().zip(tiny.vertices()) {
            assert_relative_eq!((t.coords / 1e-12 - u.coords).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_frequency() {
        assert!(matches!(build(0, 1.0), Err(MeshError::InvalidParameter(_))));
    }

    #[test]
    fn test_invalid_radius() {
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(build(2, r), Err(MeshError::InvalidParameter(_))),
                "radius {r} accepted"
            );
        }
    }

    #[test]
    fn test_oversized_frequency_rejected() {
        assert!(matches!(
            build(u32::MAX, 1.0),
            Err(MeshError::InvalidParameter(_))
        ));
    }
}
