//! Procedural geometry.
//!
//! [`GridMesh`] is the line grid the height-field demo displaces;
//! [`SphereMesh`] is the triangle sphere the texture demo wraps.

use std::f32::consts::PI;

use crate::error::PipelineError;

/// A regular `(R+1) x (R+1)` grid of 2-D points spanning `[-1, 1]`, drawn as
/// line segments between horizontal and vertical neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    resolution: u32,
    vertices: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl GridMesh {
    /// Build the grid for `resolution` cells per side.
    pub fn new(resolution: u32) -> Result<Self, PipelineError> {
        if resolution == 0 {
            return Err(PipelineError::InvalidMesh(
                "grid resolution must be at least 1".into(),
            ));
        }
        let side = resolution
            .checked_add(1)
            .filter(|side| side.checked_mul(*side).is_some())
            .ok_or_else(|| {
                PipelineError::InvalidMesh(format!("grid resolution {resolution} is too large"))
            })?;

        let half = resolution as f32 / 2.0;
        let mut vertices = Vec::with_capacity((side * side) as usize);
        for i in 0..side {
            for j in 0..side {
                vertices.push([(j as f32 - half) / half, (i as f32 - half) / half]);
            }
        }

        let mut indices = Vec::with_capacity(4 * resolution as usize * side as usize);
        // Horizontal segments.
        for y in 0..side {
            for x in 0..resolution {
                indices.push(y * side + x);
                indices.push(y * side + x + 1);
            }
        }
        // Vertical segments.
        for x in 0..side {
            for y in 0..resolution {
                indices.push(y * side + x);
                indices.push((y + 1) * side + x);
            }
        }

        Ok(Self {
            resolution,
            vertices,
            indices,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Row-major positions.
    pub fn vertices(&self) -> &[[f32; 2]] {
        &self.vertices
    }

    /// Pairs of indices, one pair per line segment.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// A UV sphere centred on the origin with its poles on the Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a sphere of `radius` split into `slices` around Z and `stacks`
    /// from pole to pole. Triangles wind counter-clockwise seen from outside.
    pub fn new(radius: f32, slices: u32, stacks: u32) -> Result<Self, PipelineError> {
        if slices < 3 || stacks < 2 {
            return Err(PipelineError::InvalidMesh(format!(
                "sphere needs at least 3 slices and 2 stacks, got {slices}x{stacks}"
            )));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PipelineError::InvalidMesh(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }

        let ring = slices + 1;
        let vertex_count = (stacks as usize + 1) * ring as usize;
        if vertex_count > u32::MAX as usize {
            return Err(PipelineError::InvalidMesh(format!(
                "sphere {slices}x{stacks} is too large"
            )));
        }

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        for i in 0..=stacks {
            let phi = PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let theta = 2.0 * PI * j as f32 / slices as f32;
                let normal = [phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()];
                positions.push(normal.map(|c| c * radius));
                normals.push(normal);
            }
        }

        let mut indices = Vec::with_capacity(stacks as usize * slices as usize * 6);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * ring + j;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Unit normals, parallel to `positions`.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Triangle list.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_grid_counts_for_visualized_resolution() {
        let mesh = GridMesh::new(100).unwrap();
        assert_eq!(mesh.vertices().len(), 10201);
        assert_eq!(mesh.indices().len(), 40400);
    }

    #[test]
    fn test_grid_counts_and_ranges() {
        for r in [1u32, 2, 3, 7, 16, 33] {
            let mesh = GridMesh::new(r).unwrap();
            let side = (r + 1) as usize;
            assert_eq!(mesh.vertices().len(), side * side, "R={r}");
            assert_eq!(mesh.indices().len(), 4 * r as usize * side, "R={r}");
            let count = mesh.vertices().len() as u32;
            assert!(mesh.indices().iter().all(|&i| i < count), "R={r}");
        }
    }

    #[test]
    fn test_grid_spans_unit_square() {
        let mesh = GridMesh::new(4).unwrap();
        let v = mesh.vertices();
        assert_eq!(v[0], [-1.0, -1.0]);
        assert_eq!(v[4], [1.0, -1.0]);
        assert_eq!(v[12], [0.0, 0.0]);
        assert_eq!(*v.last().unwrap(), [1.0, 1.0]);
    }

    #[test]
    fn test_grid_odd_resolution_still_spans_unit_square() {
        let mesh = GridMesh::new(3).unwrap();
        assert_eq!(mesh.vertices()[0], [-1.0, -1.0]);
        assert_eq!(*mesh.vertices().last().unwrap(), [1.0, 1.0]);
    }

    #[test]
    fn test_grid_segments_join_neighbours() {
        let r = 5;
        let side = r + 1;
        let mesh = GridMesh::new(r).unwrap();
        let (horizontal, vertical) = mesh.indices().split_at((2 * r * side) as usize);
        for pair in horizontal.chunks(2) {
            assert_eq!(pair[1], pair[0] + 1);
            assert_eq!(pair[0] / side, pair[1] / side, "segment wraps a row");
        }
        for pair in vertical.chunks(2) {
            assert_eq!(pair[1], pair[0] + side);
        }
    }

    #[test]
    fn test_grid_is_deterministic() {
        assert_eq!(GridMesh::new(12).unwrap(), GridMesh::new(12).unwrap());
    }

    #[test]
    fn test_grid_rejects_zero_and_overflow() {
        assert!(matches!(GridMesh::new(0), Err(PipelineError::InvalidMesh(_))));
        assert!(matches!(
            GridMesh::new(u32::MAX),
            Err(PipelineError::InvalidMesh(_))
        ));
        assert!(matches!(
            GridMesh::new(70_000),
            Err(PipelineError::InvalidMesh(_))
        ));
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = SphereMesh::new(1.0, 30, 30).unwrap();
        assert_eq!(mesh.positions().len(), 31 * 31);
        assert_eq!(mesh.normals().len(), 31 * 31);
        assert_eq!(mesh.indices().len(), 30 * 30 * 6);
        let count = mesh.positions().len() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn test_sphere_normals_are_unit_and_radial() {
        let mesh = SphereMesh::new(2.5, 12, 8).unwrap();
        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            let n = Vec3::from_array(*n);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(Vec3::from_array(*p).abs_diff_eq(n * 2.5, 1e-5));
        }
    }

    #[test]
    fn test_sphere_triangles_face_outwards() {
        let mesh = SphereMesh::new(1.0, 16, 16).unwrap();
        let p = mesh.positions();
        for tri in mesh.indices().chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(p[i as usize]));
            let normal = (b - a).cross(c - a);
            // Triangles touching a pole collapse to zero area.
            if normal.length() > 1e-6 {
                assert!(normal.dot(a + b + c) > 0.0, "inward triangle {tri:?}");
            }
        }
    }

    #[test]
    fn test_sphere_rejects_degenerate_input() {
        assert!(SphereMesh::new(1.0, 2, 10).is_err());
        assert!(SphereMesh::new(1.0, 10, 1).is_err());
        assert!(SphereMesh::new(0.0, 10, 10).is_err());
        assert!(SphereMesh::new(f32::NAN, 10, 10).is_err());
    }
}
