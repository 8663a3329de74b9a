//! Tube surfaces swept around a trajectory.
//!
//! The frame at every sample is built independently from the local tangent and
//! a fixed reference axis. No parallel transport is done, so neighbouring rings
//! can twist against each other where the tangent turns quickly.

use crate::error::{Result, TrajectoidError};
use crate::mesh::Mesh;
use crate::trajectory::Trajectory;
use crate::vector::{add, cross, norm, normalize, scale, sub};

/// Below this length the normal is recomputed against the alternate axis.
pub const PARALLEL_EPSILON: f64 = 1e-8;

const REFERENCE_AXIS: [f64; 3] = [0.0, 0.0, 1.0];
const ALTERNATE_AXIS: [f64; 3] = [0.0, 1.0, 0.0];

/// Three `ring × sample` grids holding the x, y and z coordinates of the
/// swept surface. Row `j` is the `j`-th point of every ring; column `i` is the
/// ring around sample `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct SweptSurface {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
}

/// Moving frame at one sample of the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub tangent: [f64; 3],
    pub normal: [f64; 3],
    pub binormal: [f64; 3],
}

/// Unit tangents by central differences, one-sided at both ends.
pub fn tangents(points: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let d = if n < 2 {
                [0.0; 3]
            } else if i == 0 {
                sub(points[1], points[0])
            } else if i == n - 1 {
                sub(points[n - 1], points[n - 2])
            } else {
                scale(sub(points[i + 1], points[i - 1]), 0.5)
            };
            normalize(d)
        })
        .collect()
}

/// Frame for a unit tangent: the normal is `tangent × z`, or `tangent × y`
/// when the tangent is (nearly) parallel to z.
pub fn frame(tangent: [f64; 3]) -> Frame {
    let mut normal = cross(tangent, REFERENCE_AXIS);
    if norm(normal) < PARALLEL_EPSILON {
        normal = cross(tangent, ALTERNATE_AXIS);
    }
    let normal = normalize(normal);
    Frame {
        tangent,
        normal,
        binormal: cross(tangent, normal),
    }
}

/// Sweeps a circle of `radius` around every sample of `trajectory`.
///
/// Each ring has `ring_points` points at angles `2π·j / (ring_points - 1)`,
/// so the first and last points coincide and the grid closes.
pub fn sweep(trajectory: &Trajectory, radius: f64, ring_points: usize) -> Result<SweptSurface> {
    if trajectory.len() < 2 {
        return Err(TrajectoidError::EmptyInput("a tube needs at least two samples"));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(TrajectoidError::invalid(
            "radius",
            format!("must be positive and finite, got {}", radius),
        ));
    }
    if ring_points < 3 {
        return Err(TrajectoidError::invalid(
            "ring_points",
            format!("needs at least 3 points per ring, got {}", ring_points),
        ));
    }

    let points = trajectory.points();
    let frames: Vec<Frame> = tangents(points).into_iter().map(frame).collect();
    let step = std::f64::consts::TAU / (ring_points - 1) as f64;

    let mut x = Vec::with_capacity(ring_points);
    let mut y = Vec::with_capacity(ring_points);
    let mut z = Vec::with_capacity(ring_points);
    for j in 0..ring_points {
        let (sin, cos) = (j as f64 * step).sin_cos();
        let mut row_x = Vec::with_capacity(points.len());
        let mut row_y = Vec::with_capacity(points.len());
        let mut row_z = Vec::with_capacity(points.len());
        for (&p, f) in points.iter().zip(&frames) {
            let offset = add(scale(f.normal, radius * cos), scale(f.binormal, radius * sin));
            let q = add(p, offset);
            row_x.push(q[0]);
            row_y.push(q[1]);
            row_z.push(q[2]);
        }
        x.push(row_x);
        y.push(row_y);
        z.push(row_z);
    }

    log::debug!("swept {} rings of {} points", points.len(), ring_points);
    Ok(SweptSurface { x, y, z })
}

impl SweptSurface {
    /// Points per ring.
    pub fn ring_points(&self) -> usize {
        self.x.len()
    }

    /// Number of rings (trajectory samples).
    pub fn samples(&self) -> usize {
        self.x.first().map_or(0, Vec::len)
    }

    pub fn point(&self, ring_index: usize, sample: usize) -> [f64; 3] {
        [
            self.x[ring_index][sample],
            self.y[ring_index][sample],
            self.z[ring_index][sample],
        ]
    }

    /// Splits every grid quad into two triangles.
    ///
    /// Vertex `j * samples + i` is grid point `(j, i)`.
    pub fn to_mesh(&self) -> Mesh {
        let rows = self.ring_points();
        let cols = self.samples();
        let mut vertices = Vec::with_capacity(rows * cols);
        for j in 0..rows {
            for i in 0..cols {
                vertices.push(self.point(j, i));
            }
        }

        let mut faces = Vec::with_capacity(2 * rows.saturating_sub(1) * cols.saturating_sub(1));
        for j in 0..rows.saturating_sub(1) {
            for i in 0..cols.saturating_sub(1) {
                let a = j * cols + i;
                let b = a + 1;
                let c = a + cols;
                let d = c + 1;
                faces.push([a, b, d]);
                faces.push([a, d, c]);
            }
        }
        Mesh::new(vertices, faces)
    }
}
