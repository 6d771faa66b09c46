//! Vertex welding: merge points that coincide within a distance tolerance.
//!
//! Adjacent faces are subdivided independently, so the points on a shared
//! edge are computed twice and may differ in the last few bits. Points are
//! bucketed into a uniform grid whose cell size equals the tolerance; a
//! candidate within tolerance can only live in the 27 surrounding cells.

use std::collections::HashMap;

use geodome_math::Point3;

/// Key for a grid cell (quantized coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellKey {
    x: i64,
    y: i64,
    z: i64,
}

impl CellKey {
    fn from_point(p: &Point3, cell: f64) -> Self {
        Self {
            x: (p.x / cell).floor() as i64,
            y: (p.y / cell).floor() as i64,
            z: (p.z / cell).floor() as i64,
        }
    }

    fn offset(&self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Accumulates unique vertices, returning a stable index for each inserted point.
#[derive(Debug)]
pub(crate) struct VertexWelder {
    tolerance: f64,
    cells: HashMap<CellKey, Vec<u32>>,
    vertices: Vec<Point3>,
}

impl VertexWelder {
    /// Create a welder merging points closer than `tolerance`.
    pub(crate) fn with_capacity(tolerance: f64, capacity: usize) -> Self {
        Self {
            tolerance,
            cells: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Index of an existing vertex within tolerance of `p`, inserting `p` if none.
    ///
    /// The first inserted position of a welded vertex is kept.
    pub(crate) fn insert(&mut self, p: Point3) -> u32 {
        let key = CellKey::from_point(&p, self.tolerance);
        let tol2 = self.tolerance * self.tolerance;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&key.offset(dx, dy, dz)) else {
                        continue;
                    };
                    for &idx in bucket {
                        if (self.vertices[idx as usize] - p).norm_squared() < tol2 {
                            return idx;
                        }
                    }
                }
            }
        }

        let idx = self.vertices.len() as u32;
        self.vertices.push(p);
        self.cells.entry(key).or_default().push(idx);
        idx
    }

    /// Number of unique vertices so far.
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Consume the welder, returning the unique vertices in insertion order.
    pub(crate) fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }
}
