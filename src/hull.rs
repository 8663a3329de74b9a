//! Incremental 3-D convex hull.
//!
//! Only the hull vertices matter for support sampling: an interior point can
//! never raise `max(p · u)` for any direction `u`.

use crate::vector::{cross, dot, norm, scale, sub};
use std::collections::HashSet;

/// Fewest points that can enclose a volume.
pub const MIN_HULL_POINTS: usize = 4;

/// Relative tolerance, scaled by the extent of the cloud.
const RELATIVE_EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, Debug)]
struct HullFace {
    v: [usize; 3],
    normal: [f64; 3],
    offset: f64,
}

impl HullFace {
    /// Plane through `a`, `b`, `c`, oriented so `inner` lies on its negative side.
    fn new(points: &[[f64; 3]], a: usize, b: usize, c: usize, inner: [f64; 3]) -> Self {
        let n = cross(sub(points[b], points[a]), sub(points[c], points[a]));
        let len = norm(n);
        let normal = if len == 0.0 { n } else { scale(n, 1.0 / len) };
        let offset = dot(normal, points[a]);

        if dot(normal, inner) - offset > 0.0 {
            HullFace {
                v: [a, c, b],
                normal: scale(normal, -1.0),
                offset: -offset,
            }
        } else {
            HullFace {
                v: [a, b, c],
                normal,
                offset,
            }
        }
    }

    #[inline]
    fn distance(&self, p: [f64; 3]) -> f64 {
        dot(self.normal, p) - self.offset
    }
}

/// Convex hull of a point cloud, as outward-oriented triangles over the
/// original point indices.
#[derive(Clone, Debug)]
pub struct ConvexHull {
    faces: Vec<[usize; 3]>,
    vertex_indices: Vec<usize>,
    vertices: Vec<[f64; 3]>,
}

fn tolerance(points: &[[f64; 3]]) -> f64 {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in points {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    let extent = (0..3).map(|k| max[k] - min[k]).fold(0.0, f64::max);
    RELATIVE_EPSILON * extent
}

fn argmax_by<F: Fn(&[f64; 3]) -> f64>(points: &[[f64; 3]], key: F) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, p) in points.iter().enumerate() {
        let value = key(p);
        if value > best.1 {
            best = (i, value);
        }
    }
    best
}

/// Four points spanning a tetrahedron of non-zero volume, or `None` when the
/// cloud has fewer than four points or is (numerically) coplanar.
pub fn initial_simplex(points: &[[f64; 3]]) -> Option<[usize; 4]> {
    if points.len() < MIN_HULL_POINTS {
        return None;
    }
    let eps = tolerance(points);

    let (i0, _) = argmax_by(points, |p| -p[0]);
    let p0 = points[i0];

    let (i1, d1) = argmax_by(points, |p| norm(sub(*p, p0)));
    if d1 <= eps {
        return None;
    }
    let axis = scale(sub(points[i1], p0), 1.0 / d1);

    let (i2, d2) = argmax_by(points, |p| norm(cross(sub(*p, p0), axis)));
    if d2 <= eps {
        return None;
    }
    let n = cross(sub(points[i1], p0), sub(points[i2], p0));
    let n = scale(n, 1.0 / norm(n));

    let (i3, d3) = argmax_by(points, |p| dot(n, sub(*p, p0)).abs());
    if d3 <= eps {
        return None;
    }
    Some([i0, i1, i2, i3])
}

/// Whether the cloud encloses a volume, so a hull can be built from it.
pub fn spans_volume(points: &[[f64; 3]]) -> bool {
    initial_simplex(points).is_some()
}

impl ConvexHull {
    /// Builds the hull, or returns `None` when the cloud has no volume.
    pub fn new(points: &[[f64; 3]]) -> Option<Self> {
        initial_simplex(points).map(|simplex| Self::from_simplex(points, simplex))
    }

    /// Grows the hull from a starting tetrahedron found by [`initial_simplex`].
    pub fn from_simplex(points: &[[f64; 3]], simplex: [usize; 4]) -> Self {
        let eps = tolerance(points);
        let [a, b, c, d] = simplex;

        let mut inner = [0.0; 3];
        for &i in &simplex {
            for k in 0..3 {
                inner[k] += 0.25 * points[i][k];
            }
        }

        let mut faces = vec![
            HullFace::new(points, a, b, c, inner),
            HullFace::new(points, a, b, d, inner),
            HullFace::new(points, a, c, d, inner),
            HullFace::new(points, b, c, d, inner),
        ];

        let mut edges: HashSet<(usize, usize)> = HashSet::new();
        let mut horizon: Vec<(usize, usize)> = Vec::new();

        for (index, &p) in points.iter().enumerate() {
            if simplex.contains(&index) {
                continue;
            }
            if !faces.iter().any(|f| f.distance(p) > eps) {
                continue;
            }

            // Directed edges of all visible faces; an edge whose reverse is not
            // visible lies on the horizon.
            edges.clear();
            for f in faces.iter().filter(|f| f.distance(p) > eps) {
                edges.insert((f.v[0], f.v[1]));
                edges.insert((f.v[1], f.v[2]));
                edges.insert((f.v[2], f.v[0]));
            }
            horizon.clear();
            horizon.extend(edges.iter().copied().filter(|&(u, v)| !edges.contains(&(v, u))));

            faces.retain(|f| f.distance(p) <= eps);
            for &(u, v) in &horizon {
                faces.push(HullFace::new(points, u, v, index, inner));
            }
        }

        let mut vertex_indices: Vec<usize> = faces.iter().flat_map(|f| f.v).collect();
        vertex_indices.sort_unstable();
        vertex_indices.dedup();
        let vertices = vertex_indices.iter().map(|&i| points[i]).collect();

        log::debug!(
            "convex hull of {} points: {} vertices, {} faces",
            points.len(),
            vertex_indices.len(),
            faces.len()
        );

        Self {
            faces: faces.into_iter().map(|f| f.v).collect(),
            vertex_indices,
            vertices,
        }
    }

    /// Outward-oriented triangles over the input point indices.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Sorted indices of the input points on the hull boundary.
    ///
    /// Every extreme corner is listed, but points lying on a hull face or edge
    /// may be listed too; they never change [`Self::support`].
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertex_indices
    }

    /// Positions of the boundary points, in the order of [`Self::vertex_indices`].
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// `max(p · direction)` over the boundary points.
    pub fn support(&self, direction: [f64; 3]) -> f64 {
        self.vertices
            .iter()
            .map(|&p| dot(p, direction))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
