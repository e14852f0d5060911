//! Texture and cube-map upload.
//!
//! Image decoding is the `image` crate's business; this module only moves the
//! resulting pixel buffers into GPU texture objects. Pixel rows are flipped
//! vertically on the way in so that uv `(0, 0)` lands at the bottom-left.

use std::path::Path;

use anyhow::Context as _;
use log::info;

use crate::graphics::{Filter, GraphicsApi, PixelFormat, TextureId, TextureSettings, Wrap};

/// A 2D texture. Owns its GPU texture object.
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads a raw pixel buffer in the declared channel order.
    pub fn from_pixels(
        api: &mut dyn GraphicsApi,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
        settings: TextureSettings,
    ) -> Self {
        let id = api.create_texture();
        api.upload_texture(id, width, height, format, pixels, &settings);
        Self { id, width, height }
    }

    /// Decodes an image file and uploads it as RGBA.
    pub fn from_file(
        api: &mut dyn GraphicsApi,
        path: impl AsRef<Path>,
        settings: TextureSettings,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("loading texture from {}", path.display());
        let image = image::open(path)
            .with_context(|| format!("failed to load image {}", path.display()))?
            .flipv()
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self::from_pixels(
            api,
            width,
            height,
            PixelFormat::Rgba,
            &image.into_raw(),
            settings,
        ))
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Releases the GPU texture object.
    pub fn dispose(self, api: &mut dyn GraphicsApi) {
        api.delete_texture(self.id);
    }
}

/// A 6-face cube-map texture for skyboxes and reflections. The handle is
/// freely shared across every material that samples it.
#[derive(Debug)]
pub struct CubeMap {
    id: TextureId,
}

impl CubeMap {
    fn settings() -> TextureSettings {
        TextureSettings {
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            wrap: Wrap::ClampToEdge,
        }
    }

    /// Uploads six equally-sized raw face buffers, ordered +X,-X,+Y,-Y,+Z,-Z.
    pub fn from_face_pixels(
        api: &mut dyn GraphicsApi,
        width: u32,
        height: u32,
        format: PixelFormat,
        faces: [&[u8]; 6],
    ) -> Self {
        let id = api.create_texture();
        for (face, pixels) in faces.into_iter().enumerate() {
            api.upload_cube_face(id, face, width, height, format, pixels);
        }
        api.finish_cube_map(id, &Self::settings());
        Self { id }
    }

    /// Decodes six image files, ordered +X,-X,+Y,-Y,+Z,-Z, and uploads them
    /// as RGB faces.
    pub fn from_files(
        api: &mut dyn GraphicsApi,
        paths: [impl AsRef<Path>; 6],
    ) -> anyhow::Result<Self> {
        let id = api.create_texture();
        for (face, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            info!("loading cube-map face from {}", path.display());
            let image = image::open(path)
                .with_context(|| format!("failed to load cube-map face {}", path.display()))?
                .flipv()
                .to_rgb8();
            let (width, height) = image.dimensions();
            api.upload_cube_face(id, face, width, height, PixelFormat::Rgb, &image.into_raw());
        }
        api.finish_cube_map(id, &Self::settings());
        Ok(Self { id })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Releases the GPU texture object.
    pub fn dispose(self, api: &mut dyn GraphicsApi) {
        api.delete_texture(self.id);
    }
}
