use crate::vector::{cross, dot, norm, sub};

/// A triangulated surface: vertex positions and triangles indexing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<[f64; 3]>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Flat array of vertices [x, y, z, x, y, z, ...].
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flatten().copied().collect()
    }

    /// Flattened triangle indices.
    pub fn flat_faces(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flatten()
            .map(|&i| i as u32)
            .collect()
    }

    /// Enclosed volume of a closed mesh, summing signed tetrahedra against the origin.
    pub fn volume(&self) -> f64 {
        let mut volume: f64 = 0.0;
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];
            volume += dot(v0, cross(v1, v2));
        }
        (volume / 6.0).abs()
    }

    pub fn centroid(&self) -> [f64; 3] {
        let mut centroid = [0.0; 3];
        let mut total_volume: f64 = 0.0;

        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];

            let det = dot(v0, cross(v1, v2));
            total_volume += det;
            for k in 0..3 {
                centroid[k] += det * (v0[k] + v1[k] + v2[k]);
            }
        }

        if total_volume.abs() < 1e-9 {
            return [0.0, 0.0, 0.0];
        }

        let factor: f64 = 1.0 / (4.0 * total_volume);
        [
            centroid[0] * factor,
            centroid[1] * factor,
            centroid[2] * factor,
        ]
    }

    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let p0 = self.vertices[face[0]];
                let e1 = sub(self.vertices[face[1]], p0);
                let e2 = sub(self.vertices[face[2]], p0);
                0.5 * norm(cross(e1, e2))
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tetrahedron() -> Mesh {
        Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    #[test]
    fn test_tetrahedron_metrics() {
        let mesh = unit_tetrahedron();
        assert!((mesh.volume() - 1.0 / 6.0).abs() < 1e-12);
        let c = mesh.centroid();
        for k in 0..3 {
            assert!((c[k] - 0.25).abs() < 1e-12, "centroid {:?}", c);
        }
        let expected_area = 1.5 + 0.5 * 3.0f64.sqrt();
        assert!((mesh.surface_area() - expected_area).abs() < 1e-12);
    }

    #[test]
    fn test_flat_export() {
        let mesh = unit_tetrahedron();
        assert_eq!(mesh.flat_vertices().len(), 12);
        assert_eq!(mesh.flat_faces()[..3], [0, 2, 1]);
    }
}
