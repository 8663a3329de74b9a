//! Geodesic direction sets built by subdividing an icosahedron.

use crate::mesh::Mesh;
use crate::vector::{add, normalize, scale};
use std::collections::HashMap;

/// Unit directions on the sphere together with the triangles connecting them.
///
/// Depth `k` has `10·4^k + 2` directions and `20·4^k` faces.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionSet {
    depth: usize,
    directions: Vec<[f64; 3]>,
    faces: Vec<[usize; 3]>,
}

impl DirectionSet {
    /// Icosphere after `depth` subdivision passes.
    pub fn icosphere(depth: usize) -> Self {
        let (directions, faces) = generate(depth);
        log::debug!(
            "icosphere depth {}: {} directions, {} faces",
            depth,
            directions.len(),
            faces.len()
        );
        Self {
            depth,
            directions,
            faces,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn directions(&self) -> &[[f64; 3]] {
        &self.directions
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Places each direction at the matching radius, reusing the face list.
    ///
    /// `radii` must hold one entry per direction.
    pub fn scaled_mesh(&self, radii: &[f64]) -> Mesh {
        debug_assert_eq!(radii.len(), self.directions.len());
        let vertices = self
            .directions
            .iter()
            .zip(radii)
            .map(|(&d, &r)| scale(d, r))
            .collect();
        Mesh::new(vertices, self.faces.clone())
    }
}

/// Expected `(directions, faces)` counts after `depth` passes.
pub fn icosphere_counts(depth: usize) -> (usize, usize) {
    let factor = 4usize.pow(depth as u32);
    (10 * factor + 2, 20 * factor)
}

fn icosahedron() -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
    let t = (1.0 + 5.0f64.sqrt()) / 2.0;
    let vertices = vec![
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .into_iter()
    .map(normalize)
    .collect();

    // Counter-clockwise seen from outside
    let faces = vec![
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
    (vertices, faces)
}

/// Edge midpoints created during one subdivision pass.
///
/// Keys are unordered endpoint pairs, valid only for the vertex numbering of
/// the pass that owns the cache.
struct MidpointCache<'a> {
    vertices: &'a mut Vec<[f64; 3]>,
    midpoints: HashMap<(usize, usize), usize>,
}

impl<'a> MidpointCache<'a> {
    fn new(vertices: &'a mut Vec<[f64; 3]>) -> Self {
        Self {
            vertices,
            midpoints: HashMap::new(),
        }
    }

    /// Index of the unit-sphere midpoint of edge `a`-`b`, created on first use.
    fn midpoint(&mut self, a: usize, b: usize) -> usize {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&index) = self.midpoints.get(&key) {
            return index;
        }
        let m = normalize(scale(add(self.vertices[a], self.vertices[b]), 0.5));
        self.vertices.push(m);
        let index = self.vertices.len() - 1;
        self.midpoints.insert(key, index);
        index
    }
}

/// Unit directions and faces of the icosphere after `depth` passes.
pub fn generate(depth: usize) -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
    let (mut vertices, mut faces) = icosahedron();
    let (expected_vertices, expected_faces) = icosphere_counts(depth);
    vertices.reserve(expected_vertices - vertices.len());

    for _ in 0..depth {
        let mut cache = MidpointCache::new(&mut vertices);
        let mut next = Vec::with_capacity(faces.len() * 4);
        for &[a, b, c] in &faces {
            let ab = cache.midpoint(a, b);
            let bc = cache.midpoint(b, c);
            let ca = cache.midpoint(c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    debug_assert_eq!(vertices.len(), expected_vertices);
    debug_assert_eq!(faces.len(), expected_faces);
    (vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_cache_reuses_shared_edges() {
        let (mut vertices, _) = icosahedron();
        let mut cache = MidpointCache::new(&mut vertices);
        let m1 = cache.midpoint(0, 11);
        let m2 = cache.midpoint(11, 0);
        assert_eq!(m1, m2);
        assert_eq!(m1, 12);
        let m3 = cache.midpoint(0, 5);
        assert_eq!(m3, 13);
        assert_eq!(vertices.len(), 14);
    }

    #[test]
    fn test_base_icosahedron_is_unit() {
        let (vertices, faces) = generate(0);
        assert_eq!(vertices.len(), 12);
        assert_eq!(faces.len(), 20);
        for v in &vertices {
            assert!((crate::vector::norm(*v) - 1.0).abs() < 1e-12);
        }
    }
}
