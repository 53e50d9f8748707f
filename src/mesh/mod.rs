use thiserror::Error;

pub mod image;
mod tri;

pub use glm::{Vec2, Vec3};
pub use tri::*;

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Vec3,
    pub tex: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct GlVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex: [f32; 2],
}

impl From<Vertex> for GlVertex {
    fn from(value: Vertex) -> Self {
        GlVertex {
            position: value.pos.into(),
            normal: value.normal.into(),
            tex: value.tex.into(),
        }
    }
}

/// vertex and index data ready to be uploaded
pub struct MeshDataBuffs<Vtx>
where
    Vtx: std::convert::From<Vertex>,
{
    pub verts: Vec<Vtx>,
    pub indices: Vec<u32>,
}

impl<Vtx> From<MeshData> for MeshDataBuffs<Vtx>
where
    Vtx: std::convert::From<Vertex>,
{
    fn from(value: MeshData) -> Self {
        let verts = (0..value.vertex_cnt())
            .map(|i| value.vertex(i).into())
            .collect();

        Self {
            verts,
            indices: value.f,
        }
    }
}

/// An indexed triangle list.
///
/// Normals and texture coordinates are optional, but when present there is one per
/// position.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    v: Vec<Vec3>,
    vn: Vec<Vec3>,
    vt: Vec<Vec2>,
    f: Vec<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("triangle references vertex {tried}, but there are only {count}")]
    VertexIndexInvalid { tried: u32, count: usize },

    #[error("{attribute} has {found} entries for {expected} positions")]
    AttributeCountMismatch {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// adds a new vertex position, and returns the index
    pub fn add_vertex_pos(&mut self, pos: Vec3) -> usize {
        self.v.push(pos);
        self.v.len() - 1
    }

    /// adds a new vertex normal, and returns the index
    pub fn add_vertex_normal(&mut self, norm: Vec3) -> usize {
        self.vn.push(norm);
        self.vn.len() - 1
    }

    /// adds a new vertex texture coordinate, and returns the index
    pub fn add_vertex_uv(&mut self, uv: Vec2) -> usize {
        self.vt.push(uv);
        self.vt.len() - 1
    }

    pub fn vertex_cnt(&self) -> usize {
        self.v.len()
    }

    pub fn tri_cnt(&self) -> usize {
        self.f.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.vn.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.vt.is_empty()
    }

    /// adds a tri to the index buffer, and returns its index
    pub fn add_tri(&mut self, tri: [u32; 3]) -> Result<usize, MeshError> {
        // validate first so a bad triangle leaves nothing behind
        if let Some(&tried) = tri.iter().find(|&&i| i as usize >= self.v.len()) {
            return Err(MeshError::VertexIndexInvalid {
                tried,
                count: self.v.len(),
            });
        }
        self.f.extend_from_slice(&tri);
        Ok(self.f.len() / 3 - 1)
    }

    /// adds every triangle of a flat index list
    pub fn add_tris(&mut self, indices: &[u32]) -> Result<(), MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(indices.len()));
        }
        for tri in indices.chunks_exact(3) {
            self.add_tri([tri[0], tri[1], tri[2]])?;
        }
        Ok(())
    }

    /// triangulates the positions in order, for meshes without an index list
    pub fn add_sequential_tris(&mut self) -> Result<(), MeshError> {
        let indices: Vec<u32> = (0..self.v.len() as u32).collect();
        self.add_tris(&indices)
    }

    /// checks that every optional attribute has one entry per position
    pub fn validate(&self) -> Result<(), MeshError> {
        for (attribute, found) in [("normals", self.vn.len()), ("uvs", self.vt.len())] {
            if found != 0 && found != self.v.len() {
                return Err(MeshError::AttributeCountMismatch {
                    attribute,
                    expected: self.v.len(),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Fills in smooth normals when the source had none.
    ///
    /// Each vertex gets the normalized sum of the area-weighted normals of the
    /// triangles around it, assuming counter-clockwise winding. Vertices that only
    /// touch degenerate triangles point up.
    pub fn generate_missing_normals(&mut self) {
        if self.has_normals() {
            return;
        }
        let mut acc = vec![Vec3::zeros(); self.v.len()];
        for (idx, tri) in self.tris().enumerate() {
            let n = tri.weighted_normal();
            for &vtx in &self.f[3 * idx..3 * idx + 3] {
                acc[vtx as usize] += n;
            }
        }
        self.vn = acc
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y))
            .collect();
        log::debug!("generated {} vertex normals", self.vn.len());
    }

    /// Vertex `idx` with defaults filled in for absent attributes.
    ///
    /// panics if `idx` is out of bounds
    pub fn vertex(&self, idx: usize) -> Vertex {
        Vertex {
            pos: self.v[idx],
            normal: self.vn.get(idx).copied().unwrap_or_else(Vec3::y),
            tex: self.vt.get(idx).copied().unwrap_or_else(Vec2::zeros),
        }
    }

    pub fn tris(&self) -> impl Iterator<Item = Tri> + '_ {
        self.f.chunks_exact(3).map(|t| {
            Tri::from([
                self.v[t[0] as usize],
                self.v[t[1] as usize],
                self.v[t[2] as usize],
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// unit quad in the xz plane facing up, as two ccw triangles
    fn quad() -> MeshData {
        let mut m = MeshData::new();
        m.add_vertex_pos(glm::vec3(0.0, 0.0, 0.0));
        m.add_vertex_pos(glm::vec3(0.0, 0.0, 1.0));
        m.add_vertex_pos(glm::vec3(1.0, 0.0, 1.0));
        m.add_vertex_pos(glm::vec3(1.0, 0.0, 0.0));
        m.add_tris(&[0, 1, 2, 0, 2, 3]).unwrap();
        m
    }

    #[test]
    fn bad_triangle_leaves_mesh_untouched() {
        let mut m = quad();
        let err = m.add_tri([0, 1, 9]).unwrap_err();
        assert_eq!(err, MeshError::VertexIndexInvalid { tried: 9, count: 4 });
        assert_eq!(m.tri_cnt(), 2);
    }

    #[test]
    fn partial_triangles_are_rejected() {
        let mut m = quad();
        assert_eq!(m.add_tris(&[0, 1]), Err(MeshError::PartialTriangle(2)));
    }

    #[test]
    fn sequential_tris_cover_all_positions() {
        let mut m = MeshData::new();
        for i in 0..6 {
            m.add_vertex_pos(glm::vec3(i as f32, 0.0, 0.0));
        }
        m.add_sequential_tris().unwrap();
        assert_eq!(m.f, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(m.tri_cnt(), 2);
    }

    #[test]
    fn missing_normals_are_generated_from_faces() {
        let mut m = quad();
        assert!(!m.has_normals());
        m.generate_missing_normals();
        for i in 0..m.vertex_cnt() {
            assert_relative_eq!(m.vertex(i).normal, glm::vec3(0.0, 1.0, 0.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn existing_normals_are_kept() {
        let mut m = quad();
        for _ in 0..4 {
            m.add_vertex_normal(glm::vec3(1.0, 0.0, 0.0));
        }
        m.generate_missing_normals();
        assert_eq!(m.vertex(2).normal, glm::vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn attribute_counts_must_match_positions() {
        let mut m = quad();
        m.add_vertex_uv(glm::vec2(0.0, 0.0));
        assert_eq!(
            m.validate(),
            Err(MeshError::AttributeCountMismatch {
                attribute: "uvs",
                expected: 4,
                found: 1,
            })
        );
    }

    #[test]
    fn buffers_keep_indices_and_fill_defaults() {
        let m = quad();
        let buffs: MeshDataBuffs<GlVertex> = m.into();
        assert_eq!(buffs.verts.len(), 4);
        assert_eq!(buffs.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(buffs.verts[2].position, [1.0, 0.0, 1.0]);
        assert_eq!(buffs.verts[2].tex, [0.0, 0.0]);
    }
}
