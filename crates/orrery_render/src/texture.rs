//! Image textures loaded by path
//!
//! Files are decoded with `image` into RGBA8 and uploaded as sRGB textures.
//! A missing or undecodable file degrades to a 1x1 placeholder so the body
//! still draws.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use orrery_core::AssetError;

/// Color of the fallback texel
pub const PLACEHOLDER_RGBA: [u8; 4] = [128, 128, 128, 255];

/// Decode an image file into RGBA8
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.display().to_string()));
    }
    let img = image::open(path)
        .map_err(|e| AssetError::Decode(format!("{}: {}", path.display(), e)))?;
    Ok(img.to_rgba8())
}

/// A sampled 2D texture
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: (u32, u32),
}

impl Texture {
    /// Upload RGBA8 pixels
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size: (width, height),
        }
    }

    /// Decode and upload an image file
    pub fn from_file(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self, AssetError> {
        let rgba = load_rgba(path)?;
        let (width, height) = rgba.dimensions();
        let label = path.display().to_string();
        Ok(Self::from_rgba(device, queue, rgba.as_raw(), width, height, &label))
    }

    /// 1x1 fallback texture
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba(device, queue, &PLACEHOLDER_RGBA, 1, 1, "Placeholder Texture")
    }
}

/// Textures keyed by file name, resolved against one directory
pub struct TextureCache {
    dir: PathBuf,
    entries: HashMap<String, Rc<Texture>>,
    placeholder: Rc<Texture>,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            entries: HashMap::new(),
            placeholder: Rc::new(Texture::placeholder(device, queue)),
        }
    }

    /// Full path for a texture name
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Fetch a texture, loading it on first use
    ///
    /// Failures are logged once and the placeholder is cached under the name.
    pub fn get_or_load(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, name: Option<&str>) -> Rc<Texture> {
        let Some(name) = name else {
            return Rc::clone(&self.placeholder);
        };
        if let Some(texture) = self.entries.get(name) {
            return Rc::clone(texture);
        }

        let path = self.resolve(name);
        let texture = match Texture::from_file(device, queue, &path) {
            Ok(texture) => {
                log::debug!("Loaded texture {} ({}x{})", path.display(), texture.size.0, texture.size.1);
                Rc::new(texture)
            }
            Err(e) => {
                log::warn!("Using placeholder texture: {}", e);
                Rc::clone(&self.placeholder)
            }
        };
        self.entries.insert(name.to_string(), Rc::clone(&texture));
        texture
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
