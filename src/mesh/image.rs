use std::path::Path;

use glium::texture::RawImage2d;
use glium::texture::Texture2dDataSource;
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not open image: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("embedded image format {0:?} is not supported")]
    UnsupportedFormat(gltf::image::Format),

    #[error("{width}x{height} image needs {expected} bytes, got {found}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

/// uncompressed rgba8 image, rows top to bottom.
///
/// using our own struct here in case we need to move away from glium
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Image {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let img = image::io::Reader::open(path)?
            .with_guessed_format()?
            .decode()?
            .to_rgba8();
        Ok(img.into())
    }

    /// converts an image decoded by the glTF importer
    pub fn from_gltf(src: &gltf::image::Data) -> Result<Self, TextureError> {
        use gltf::image::Format;

        let texels = (src.width * src.height) as usize;
        let channels = match src.format {
            Format::R8G8B8A8 => 4,
            Format::R8G8B8 => 3,
            Format::R8 => 1,
            other => return Err(TextureError::UnsupportedFormat(other)),
        };
        if src.pixels.len() != texels * channels {
            return Err(TextureError::SizeMismatch {
                width: src.width,
                height: src.height,
                expected: texels * channels,
                found: src.pixels.len(),
            });
        }

        let data = match channels {
            4 => src.pixels.clone(),
            3 => src
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
                .collect(),
            _ => src.pixels.iter().flat_map(|&l| [l, l, l, u8::MAX]).collect(),
        };

        Ok(Self {
            width: src.width,
            height: src.height,
            data,
        })
    }

    /// two-tone checkerboard for when no texture can be found
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let img = RgbaImage::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                image::Rgba([255, 0, 255, 255])
            } else {
                image::Rgba([32, 32, 32, 255])
            }
        });
        img.into()
    }
}

impl From<RgbaImage> for Image {
    fn from(value: RgbaImage) -> Self {
        Self {
            width: value.width(),
            height: value.height(),
            data: value.into_raw(),
        }
    }
}

impl<'a> Texture2dDataSource<'a> for Image {
    type Data = u8;

    #[inline]
    fn into_raw(self) -> RawImage2d<'a, u8> {
        // glTF puts uv (0, 0) at the top-left texel, which is the first row we
        // upload, so the rows go up unflipped
        RawImage2d {
            data: std::borrow::Cow::Owned(self.data),
            width: self.width,
            height: self.height,
            format: glium::texture::ClientFormat::U8U8U8U8,
        }
    }
}
