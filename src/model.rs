//! Loads the textured mesh from a binary glTF file.
//!
//! Only the first primitive of the first mesh is read; that is all the duck has.

use std::path::Path;

use thiserror::Error;

use crate::glm;
use crate::mesh::image::{Image, TextureError};
use crate::mesh::{MeshData, MeshError};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Import(#[from] gltf::Error),

    #[error("file has no meshes")]
    NoMesh,

    #[error("mesh has no primitives")]
    NoPrimitive,

    #[error("primitive is drawn as {0:?}, only triangle lists are supported")]
    UnsupportedMode(gltf::mesh::Mode),

    #[error("primitive has no POSITION attribute")]
    MissingPositions,

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// mesh data plus the images embedded in the file
pub struct Model {
    pub mesh: MeshData,
    images: Vec<gltf::image::Data>,
}

impl Model {
    pub fn from_parts(mesh: MeshData, images: Vec<gltf::image::Data>) -> Self {
        Self { mesh, images }
    }

    /// the first embedded image, converted for upload
    pub fn embedded_texture(&self) -> Option<Result<Image, TextureError>> {
        self.images.first().map(Image::from_gltf)
    }
}

/// reads the first triangle primitive into a [`MeshData`]
fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<MeshData, ModelError> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return Err(ModelError::UnsupportedMode(primitive.mode()));
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));
    let mut mesh = MeshData::new();

    let positions = reader.read_positions().ok_or(ModelError::MissingPositions)?;
    for p in positions {
        mesh.add_vertex_pos(p.into());
    }

    if let Some(normals) = reader.read_normals() {
        for n in normals {
            mesh.add_vertex_normal(n.into());
        }
    }

    if let Some(uvs) = reader.read_tex_coords(0) {
        for uv in uvs.into_f32() {
            mesh.add_vertex_uv(glm::vec2(uv[0], uv[1]));
        }
    }

    mesh.validate()?;
    if !mesh.has_uvs() {
        log::warn!("mesh has no texture coordinates, sampling the texture's corner");
    }

    match reader.read_indices() {
        Some(indices) => {
            let indices: Vec<u32> = indices.into_u32().collect();
            mesh.add_tris(&indices)?;
        }
        None => mesh.add_sequential_tris()?,
    }

    if !mesh.has_normals() {
        log::warn!("mesh has no normals, generating smooth ones");
        mesh.generate_missing_normals();
    }

    Ok(mesh)
}

pub fn load(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let (document, buffers, images) = gltf::import(path.as_ref())?;

    let gltf_mesh = document.meshes().next().ok_or(ModelError::NoMesh)?;
    let primitive = gltf_mesh.primitives().next().ok_or(ModelError::NoPrimitive)?;
    let mesh = read_primitive(&primitive, &buffers)?;

    log::info!(
        "{:?} loaded with {} vertices, {} triangles, {} embedded images",
        path.as_ref().file_name().unwrap_or_default(),
        mesh.vertex_cnt(),
        mesh.tri_cnt(),
        images.len()
    );

    Ok(Model::from_parts(mesh, images))
}
