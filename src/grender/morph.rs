use glium::draw_parameters::DepthTest;
use glium::index::{NoIndices, PrimitiveType};
use glium::{implement_vertex, uniform, Depth, Display, DrawError, DrawParameters, Frame};
use glium::{Program, Surface, VertexBuffer};

use super::{mat4_uniform, FrameState};
use crate::config::MorphConfig;
use crate::error::ViewerError;
use crate::glm::{self, Mat4};
use crate::morph::{self, MorphVertex};

implement_vertex!(MorphVertex, sphere_pos, sphere_normal, cube_pos, cube_normal);

const VERTEX_SHADER: &str = include_str!("../../shaders/morph.vert");
const FRAGMENT_SHADER: &str = include_str!("../../shaders/morph.frag");

/// places the unit-sized morph in the scene: scaled about its centre, then moved
fn model_matrix(config: &MorphConfig) -> Mat4 {
    let translated = glm::translate(&Mat4::identity(), &config.position.into());
    glm::scale(&translated, &glm::vec3(config.scale, config.scale, config.scale))
}

/// Point cloud blending between a sphere and a cube.
pub struct MorphRenderer {
    vertices: VertexBuffer<MorphVertex>,
    program: Program,
    model: Mat4,
    point_size: f32,
}

impl MorphRenderer {
    pub fn new(display: &Display, config: &MorphConfig) -> Result<Self, ViewerError> {
        let geometry = morph::generate(config.resolution);
        log::info!(
            "morph at resolution {} has {} points",
            geometry.resolution(),
            geometry.len()
        );

        let vertices = VertexBuffer::immutable(display, geometry.records())?;
        let program = Program::from_source(display, VERTEX_SHADER, FRAGMENT_SHADER, None)?;

        Ok(Self {
            vertices,
            program,
            model: model_matrix(config),
            point_size: config.point_size,
        })
    }

    pub fn point_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn draw(&self, target: &mut Frame, state: &FrameState) -> Result<(), DrawError> {
        let morph = state.morph;
        let uniforms = uniform! {
            mvp: mat4_uniform(&(state.view_projection * self.model)),
            time: state.time,
            lerp: morph.lerp,
            mode: morph.mode.uniform(),
            enable_manual: morph.manual,
        };

        let params = DrawParameters {
            depth: Depth {
                test: DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            point_size: Some(self.point_size),
            ..Default::default()
        };

        target.draw(
            &self.vertices,
            NoIndices(PrimitiveType::Points),
            &self.program,
            &uniforms,
            &params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn model_matrix_scales_before_translating() {
        let config = MorphConfig::default();
        let m = model_matrix(&config);

        let origin = m * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.xyz(), glm::vec3(0.0, 10.0, 20.0));

        let corner = m * glm::vec4(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(corner.xyz(), glm::vec3(5.0, 15.0, 25.0));
    }
}
