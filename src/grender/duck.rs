//! The textured, lit mesh.

use glium::draw_parameters::{BackfaceCullingMode, DepthTest};
use glium::index::PrimitiveType;
use glium::texture::SrgbTexture2d;
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction};
use glium::{implement_vertex, uniform, Depth, Display, DrawError, DrawParameters, Frame};
use glium::{IndexBuffer, Program, Surface, VertexBuffer};

use super::{mat4_uniform, FrameState};
use crate::config::AssetConfig;
use crate::error::ViewerError;
use crate::glm::{self, Mat4};
use crate::mesh::image::Image;
use crate::mesh::{GlVertex, MeshDataBuffs};
use crate::model::Model;

implement_vertex!(GlVertex, position, normal, tex);

const VERTEX_SHADER: &str = include_str!("../../shaders/diffuse.vert");
const FRAGMENT_SHADER: &str = include_str!("../../shaders/diffuse.frag");

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELLS: u32 = 8;

/// Picks the configured texture, then the one embedded in the model, then a
/// checkerboard. Failures along the way are logged and skipped.
fn pick_texture(assets: &AssetConfig, model: &Model) -> Image {
    if let Some(path) = &assets.texture {
        match Image::load(path) {
            Ok(img) => {
                log::info!("using texture {}", path.display());
                return img;
            }
            Err(e) => log::warn!("texture {}: {e}", path.display()),
        }
    }

    match model.embedded_texture() {
        Some(Ok(img)) => return img,
        Some(Err(e)) => log::warn!("embedded texture: {e}"),
        None => log::warn!("model has no embedded texture"),
    }

    log::warn!("falling back to a checkerboard texture");
    Image::checkerboard(CHECKER_SIZE, CHECKER_CELLS)
}

pub struct DuckRenderer {
    vertices: VertexBuffer<GlVertex>,
    indices: IndexBuffer<u32>,
    program: Program,
    texture: SrgbTexture2d,
    model: Mat4,
}

impl DuckRenderer {
    pub fn new(display: &Display, model: Model, assets: &AssetConfig) -> Result<Self, ViewerError> {
        let image = pick_texture(assets, &model);
        let texture = SrgbTexture2d::new(display, image)?;

        let buffers: MeshDataBuffs<GlVertex> = model.mesh.into();
        let vertices = VertexBuffer::immutable(display, &buffers.verts)?;
        let indices = IndexBuffer::immutable(display, PrimitiveType::TrianglesList, &buffers.indices)?;

        let program = Program::from_source(display, VERTEX_SHADER, FRAGMENT_SHADER, None)?;

        let s = assets.model_scale;
        Ok(Self {
            vertices,
            indices,
            program,
            texture,
            model: glm::scaling(&glm::vec3(s, s, s)),
        })
    }

    pub fn draw(&self, target: &mut Frame, state: &FrameState) -> Result<(), DrawError> {
        let lighting = state.lighting;
        let sampler = self
            .texture
            .sampled()
            .minify_filter(MinifySamplerFilter::Linear)
            .magnify_filter(MagnifySamplerFilter::Linear)
            .wrap_function(SamplerWrapFunction::Repeat);

        let dot_light_pos: [f32; 3] = lighting.dot_light_position().into();
        let spot_light_pos: [f32; 3] = lighting.spot_light_position().into();
        let spot_light_dir: [f32; 3] = lighting.spot_light_direction().into();
        let user_pos: [f32; 3] = state.camera_pos.into();

        let uniforms = uniform! {
            mvp: mat4_uniform(&(state.view_projection * self.model)),
            model: mat4_uniform(&self.model),
            user_pos: user_pos,
            dot_light_pos: dot_light_pos,
            enable_dot_light: lighting.enable_dot_light,
            spot_light_pos: spot_light_pos,
            spot_light_dir: spot_light_dir,
            enable_spot_light: lighting.enable_spot_light,
            tex: sampler,
        };

        let params = DrawParameters {
            depth: Depth {
                test: DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            backface_culling: BackfaceCullingMode::CullClockwise,
            ..Default::default()
        };

        target.draw(&self.vertices, &self.indices, &self.program, &uniforms, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshData;

    fn red_pixel() -> gltf::image::Data {
        gltf::image::Data {
            pixels: vec![255, 0, 0, 255],
            format: gltf::image::Format::R8G8B8A8,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn embedded_texture_is_used_without_override() {
        let model = Model::from_parts(MeshData::new(), vec![red_pixel()]);
        let img = pick_texture(&AssetConfig::default(), &model);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.data, vec![255, 0, 0, 255]);
    }

    #[test]
    fn unreadable_override_falls_back_to_embedded() {
        let model = Model::from_parts(MeshData::new(), vec![red_pixel()]);
        let assets = AssetConfig {
            texture: Some("no/such/texture.png".into()),
            ..Default::default()
        };
        assert_eq!(pick_texture(&assets, &model).data, vec![255, 0, 0, 255]);
    }

    #[test]
    fn checkerboard_when_nothing_else_is_available() {
        let model = Model::from_parts(MeshData::new(), Vec::new());
        let img = pick_texture(&AssetConfig::default(), &model);
        assert_eq!(img, Image::checkerboard(CHECKER_SIZE, CHECKER_CELLS));
    }
}
