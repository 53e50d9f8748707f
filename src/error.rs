use thiserror::Error;

use crate::config::ConfigError;
use crate::mesh::image::TextureError;
use crate::model::ModelError;

/// Anything that can stop the viewer from starting or from drawing a frame.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not load model: {0}")]
    Model(#[from] ModelError),

    #[error("could not load texture: {0}")]
    Texture(#[from] TextureError),

    #[error("could not create display: {0}")]
    Display(#[from] glium::backend::glutin::DisplayCreationError),

    #[error("could not build shader program: {0}")]
    Program(#[from] glium::ProgramCreationError),

    #[error("could not upload vertices: {0}")]
    VertexBuffer(#[from] glium::vertex::BufferCreationError),

    #[error("could not upload indices: {0}")]
    IndexBuffer(#[from] glium::index::BufferCreationError),

    #[error("could not upload texture: {0}")]
    TextureUpload(#[from] glium::texture::TextureCreationError),

    #[error("draw call failed: {0}")]
    Draw(#[from] glium::DrawError),

    #[error("could not present frame: {0}")]
    SwapBuffers(#[from] glium::SwapBuffersError),
}
