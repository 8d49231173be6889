//! Triangle soup occluder for line-of-sight checks against the product model.

use crate::error::HotspotError;
use crate::scene::Occluder;
use glam::{Mat4, Vec3};

const PARALLEL_EPS: f32 = 1e-8;

/// Which triangle faces stop a ray. Front faces wind counter-clockwise when
/// seen from outside, as in three.js `FrontSide`/`BackSide`/`DoubleSide`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshSide {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Clone, Debug)]
pub struct TriangleMesh {
    triangles: Vec<[Vec3; 3]>,
    min: Vec3,
    max: Vec3,
    side: MeshSide,
}

impl TriangleMesh {
    /// Build from flat `xyz` positions and optional triangle indices.
    ///
    /// With empty `indices` every three consecutive vertices form a triangle.
    pub fn from_buffers(positions: &[f32], indices: &[u32]) -> Result<Self, HotspotError> {
        if positions.len() % 3 != 0 {
            return Err(HotspotError::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        let vertices: Vec<Vec3> = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();

        let triangles = if indices.is_empty() {
            if vertices.len() % 3 != 0 {
                return Err(HotspotError::InvalidMesh(format!(
                    "{} vertices do not form whole triangles",
                    vertices.len()
                )));
            }
            vertices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect()
        } else {
            if indices.len() % 3 != 0 {
                return Err(HotspotError::InvalidMesh(format!(
                    "index buffer length {} is not a multiple of 3",
                    indices.len()
                )));
            }
            let mut tris = Vec::with_capacity(indices.len() / 3);
            for t in indices.chunks_exact(3) {
                let mut tri = [Vec3::ZERO; 3];
                for (slot, &i) in tri.iter_mut().zip(t) {
                    *slot = *vertices.get(i as usize).ok_or_else(|| {
                        HotspotError::InvalidMesh(format!(
                            "index {i} out of range for {} vertices",
                            vertices.len()
                        ))
                    })?;
                }
                tris.push(tri);
            }
            tris
        };
        Ok(Self::from_triangles(triangles))
    }

    pub fn from_triangles(triangles: Vec<[Vec3; 3]>) -> Self {
        let (min, max) = triangles.iter().flatten().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| (lo.min(*v), hi.max(*v)),
        );
        Self {
            triangles,
            min,
            max,
            side: MeshSide::default(),
        }
    }

    pub fn with_side(mut self, side: MeshSide) -> Self {
        self.side = side;
        self
    }

    pub fn side(&self) -> MeshSide {
        self.side
    }

    /// Move every vertex by `m` (a local-to-world matrix). A mirroring
    /// matrix reverses winding so faces keep their local-space sidedness.
    pub fn transformed(self, m: Mat4) -> Self {
        let mirrored = m.determinant() < 0.0;
        let triangles = self
            .triangles
            .into_iter()
            .map(|t| {
                let [a, b, c] = t.map(|v| m.transform_point3(v));
                if mirrored {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .collect();
        Self::from_triangles(triangles).with_side(self.side)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    // Slab test against the mesh bounds.
    fn ray_hits_bounds(&self, origin: Vec3, dir: Vec3) -> bool {
        if self.triangles.is_empty() {
            return false;
        }
        let inv = dir.recip();
        let t0 = (self.min - origin) * inv;
        let t1 = (self.max - origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        !(t_near > t_far || t_far < 0.0)
    }
}

/// Möller–Trumbore intersection. Returns the ray parameter.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, tri: &[Vec3; 3], side: MeshSide) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = dir.cross(e2);
    // Positive when the ray travels against the face normal, i.e. it meets
    // the front face.
    let det = e1.dot(p);
    let facing = match side {
        MeshSide::Front => det > PARALLEL_EPS,
        MeshSide::Back => det < -PARALLEL_EPS,
        MeshSide::Double => det.abs() > PARALLEL_EPS,
    };
    if !facing {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

impl Occluder for TriangleMesh {
    fn nearest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        if !self.ray_hits_bounds(origin, dir) {
            return None;
        }
        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle(origin, dir, tri, self.side))
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit quad in the z = 0 plane, two triangles.
    fn quad() -> TriangleMesh {
        let positions = [
            -1.0, -1.0, 0.0, //
            1.0, -1.0, 0.0, //
            1.0, 1.0, 0.0, //
            -1.0, 1.0, 0.0,
        ];
        TriangleMesh::from_buffers(&positions, &[0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn hits_quad_head_on() {
        let mesh = quad();
        let t = mesh
            .nearest_hit(Vec3::new(0.2, 0.3, 5.0), Vec3::NEG_Z)
            .unwrap();
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn front_side_ignores_back_faces() {
        let mesh = quad();
        assert_eq!(mesh.side(), MeshSide::Front);
        assert!(mesh.nearest_hit(Vec3::new(0.0, 0.0, -2.0), Vec3::Z).is_none());
    }

    #[test]
    fn double_side_hits_back_face() {
        let mesh = quad().with_side(MeshSide::Double);
        let t = mesh.nearest_hit(Vec3::new(0.0, 0.0, -2.0), Vec3::Z).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn back_side_only_hits_from_behind() {
        let mesh = quad().with_side(MeshSide::Back);
        assert!(mesh.nearest_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
        assert!(mesh.nearest_hit(Vec3::new(0.0, 0.0, -2.0), Vec3::Z).is_some());
    }

    #[test]
    fn transform_moves_mesh_into_world_space() {
        let mesh = quad().transformed(Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)));
        let t = mesh.nearest_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let scaled = quad().transformed(Mat4::from_scale(Vec3::splat(3.0)));
        assert!(scaled.nearest_hit(Vec3::new(2.5, 0.0, 5.0), Vec3::NEG_Z).is_some());
    }

    #[test]
    fn mirroring_transform_keeps_front_faces_front() {
        // Mirror in x: the +z face must still be hit from +z.
        let mesh = quad().transformed(Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
        assert!(mesh.nearest_hit(Vec3::new(0.2, 0.3, 5.0), Vec3::NEG_Z).is_some());
        assert!(mesh.nearest_hit(Vec3::new(0.2, 0.3, -5.0), Vec3::Z).is_none());
    }

    #[test]
    fn misses_outside_and_behind() {
        let mesh = quad();
        assert!(mesh.nearest_hit(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
        assert!(mesh.nearest_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).is_none());
        assert!(mesh.nearest_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::X).is_none());
    }

    #[test]
    fn reports_nearest_of_stacked_surfaces() {
        let near = [Vec3::new(-1.0, -1.0, 1.0), Vec3::new(1.0, -1.0, 1.0), Vec3::new(0.0, 1.0, 1.0)];
        let far = [Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, -1.0, -1.0), Vec3::new(0.0, 1.0, -1.0)];
        let mesh = TriangleMesh::from_triangles(vec![far, near]);
        let t = mesh.nearest_hit(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn non_indexed_soup_is_accepted() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = TriangleMesh::from_buffers(&positions, &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn rejects_malformed_buffers() {
        assert!(matches!(
            TriangleMesh::from_buffers(&[0.0, 1.0], &[]),
            Err(HotspotError::InvalidMesh(_))
        ));
        assert!(matches!(
            TriangleMesh::from_buffers(&[0.0; 9], &[0, 1]),
            Err(HotspotError::InvalidMesh(_))
        ));
        assert!(matches!(
            TriangleMesh::from_buffers(&[0.0; 9], &[0, 1, 7]),
            Err(HotspotError::InvalidMesh(_))
        ));
    }

    #[test]
    fn empty_mesh_never_hits() {
        let mesh = TriangleMesh::from_triangles(Vec::new());
        assert!(mesh.nearest_hit(Vec3::ZERO, Vec3::X).is_none());
    }
}
