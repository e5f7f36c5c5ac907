use crate::error::MinimapError;
use crate::raster::RasterBuffer;
use macroquad::prelude::*;

/// Image-space rectangle of pixels, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRegion {
    /// A single pixel.
    pub const fn pixel(x: u32, y: u32) -> Self {
        PixelRegion { x, y, width: 1, height: 1 }
    }
}

/// Upload capability the raster depends on.
///
/// Textures are released by dropping them.
pub trait TextureBackend {
    /// Handle to a backend-resident texture.
    type Texture;

    /// Allocates a texture of exactly `width x height` pixels.
    fn allocate(&mut self, width: u32, height: u32) -> Result<Self::Texture, MinimapError>;

    /// Copies the whole buffer into the texture.
    fn upload(&mut self, texture: &mut Self::Texture, buffer: &RasterBuffer);

    /// Copies only `region` of the buffer into the same region of the texture.
    fn upload_region(&mut self, texture: &mut Self::Texture, buffer: &RasterBuffer, region: PixelRegion);
}

/// GPU textures through macroquad. Needs a live macroquad context.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadBackend;

impl TextureBackend for MacroquadBackend {
    type Texture = Texture2D;

    fn allocate(&mut self, width: u32, height: u32) -> Result<Texture2D, MinimapError> {
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(MinimapError::RasterTooLarge { width, height }),
        };
        let tex = Texture2D::from_image(&Image::gen_image_color(w, h, BLANK));
        tex.set_filter(FilterMode::Nearest);
        Ok(tex)
    }

    fn upload(&mut self, texture: &mut Texture2D, buffer: &RasterBuffer) {
        let image = Image {
            bytes: buffer.to_rgba_bytes(),
            width: buffer.width() as u16,
            height: buffer.height() as u16,
        };
        texture.update(&image);
    }

    fn upload_region(&mut self, texture: &mut Texture2D, buffer: &RasterBuffer, region: PixelRegion) {
        let image = Image {
            bytes: buffer.region_rgba_bytes(region),
            width: region.width as u16,
            height: region.height as u16,
        };
        texture.update_part(
            &image,
            region.x as i32,
            region.y as i32,
            region.width as i32,
            region.height as i32,
        );
    }
}

/// CPU-side mirror texture, for headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTexture {
    /// Mirrored pixels, `[r, g, b, a]` per pixel, image-space row-major.
    pub bytes: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of full uploads received.
    pub full_uploads: usize,
    /// Every partial upload received, in order.
    pub region_uploads: Vec<PixelRegion>,
}

impl MemoryTexture {
    /// Packed color of an image-space pixel.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        u32::from_be_bytes([self.bytes[i], self.bytes[i + 1], self.bytes[i + 2], self.bytes[i + 3]])
    }
}

/// Backend producing [`MemoryTexture`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend {
    /// Textures allocated so far.
    pub allocations: usize,
}

impl TextureBackend for MemoryBackend {
    type Texture = MemoryTexture;

    fn allocate(&mut self, width: u32, height: u32) -> Result<MemoryTexture, MinimapError> {
        self.allocations += 1;
        Ok(MemoryTexture {
            bytes: vec![0; width as usize * height as usize * 4],
            width,
            height,
            full_uploads: 0,
            region_uploads: Vec::new(),
        })
    }

    fn upload(&mut self, texture: &mut MemoryTexture, buffer: &RasterBuffer) {
        texture.bytes = buffer.to_rgba_bytes();
        texture.full_uploads += 1;
    }

    fn upload_region(&mut self, texture: &mut MemoryTexture, buffer: &RasterBuffer, region: PixelRegion) {
        let src = buffer.region_rgba_bytes(region);
        let row_len = region.width as usize * 4;
        for row in 0..region.height as usize {
            let dst = ((region.y as usize + row) * texture.width as usize + region.x as usize) * 4;
            texture.bytes[dst..dst + row_len].copy_from_slice(&src[row * row_len..(row + 1) * row_len]);
        }
        texture.region_uploads.push(region);
    }
}
