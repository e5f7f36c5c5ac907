mod texture;

pub use texture::{MacroquadBackend, MemoryBackend, MemoryTexture, PixelRegion, TextureBackend};

use crate::classify::classify;
use crate::color::PackedColor;
use crate::error::MinimapError;
use crate::grid::TileGrid;
use crate::palette::Palette;

/// Full-world pixel buffer in image space: row 0 is the northern edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<PackedColor>,
}

impl RasterBuffer {
    fn new(width: u32, height: u32) -> Self {
        RasterBuffer {
            width,
            height,
            pixels: vec![PackedColor::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[inline] pub fn width(&self) -> u32 { self.width }
    /// Height in pixels.
    #[inline] pub fn height(&self) -> u32 { self.height }

    /// Image row holding world row `y`.
    #[inline]
    pub fn image_row(&self, y: u32) -> u32 {
        self.height - 1 - y
    }

    /// Color at image-space pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> PackedColor {
        self.pixels[self.idx(x, y)]
    }

    /// Color of world cell `(x, y)`.
    #[inline]
    pub fn world_pixel(&self, x: u32, y: u32) -> PackedColor {
        self.pixel(x, self.image_row(y))
    }

    /// All pixels, image-space row-major.
    pub fn pixels(&self) -> &[PackedColor] {
        &self.pixels
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32, color: PackedColor) {
        let i = self.idx(x, y);
        self.pixels[i] = color;
    }

    /// `[r, g, b, a]` bytes of the whole buffer.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// `[r, g, b, a]` bytes of `region`, row-major.
    pub fn region_rgba_bytes(&self, region: PixelRegion) -> Vec<u8> {
        let mut out = Vec::with_capacity(region.width as usize * region.height as usize * 4);
        for y in region.y..region.y + region.height {
            let start = self.idx(region.x, y);
            let end = start + region.width as usize;
            out.extend(self.pixels[start..end].iter().flat_map(|c| c.to_bytes()));
        }
        out
    }
}

struct Live<T> {
    buffer: RasterBuffer,
    texture: T,
}

enum State<T> {
    Empty,
    Live(Live<T>),
    Disposed,
}

/// Owns the world raster and its uploaded texture.
///
/// The texture is always derived from the buffer: a full upload after
/// [`rebuild_all`](Self::rebuild_all), a single-pixel upload after
/// [`update_one`](Self::update_one).
pub struct RasterStore<B: TextureBackend> {
    backend: B,
    state: State<B::Texture>,
}

impl<B: TextureBackend> RasterStore<B> {
    /// Creates an empty store; nothing is allocated until the first rebuild.
    pub fn new(backend: B) -> Self {
        RasterStore {
            backend,
            state: State::Empty,
        }
    }

    /// The texture backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True between a rebuild and the next dispose.
    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    /// Raster dimensions, if a world is loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match &self.state {
            State::Live(live) => Some((live.buffer.width, live.buffer.height)),
            _ => None,
        }
    }

    /// Rebuilds the whole raster from `grid` and uploads it once.
    ///
    /// Any previous buffer and texture are released first.
    pub fn rebuild_all(&mut self, grid: &impl TileGrid, palette: &Palette) -> Result<(), MinimapError> {
        let (width, height) = (grid.width(), grid.height());
        if width == 0 || height == 0 {
            return Err(MinimapError::EmptyWorld { width, height });
        }

        // drop the old texture before allocating its replacement
        self.state = State::Empty;

        let mut texture = self.backend.allocate(width, height)?;
        let mut buffer = RasterBuffer::new(width, height);
        for y in 0..height {
            let row = buffer.image_row(y);
            for x in 0..width {
                buffer.set(x, row, classify(&grid.cell(x, y), palette));
            }
        }
        self.backend.upload(&mut texture, &buffer);
        self.state = State::Live(Live { buffer, texture });

        log::info!("minimap raster rebuilt: {}x{}", width, height);
        Ok(())
    }

    /// Reclassifies world cell `(x, y)` and uploads that one pixel.
    pub fn update_one(
        &mut self,
        grid: &impl TileGrid,
        palette: &Palette,
        x: u32,
        y: u32,
    ) -> Result<PackedColor, MinimapError> {
        let State::Live(live) = &mut self.state else {
            return Err(MinimapError::NotInitialized);
        };
        let (width, height) = (live.buffer.width, live.buffer.height);
        if grid.width() != width || grid.height() != height {
            return Err(MinimapError::DimensionMismatch {
                raster_width: width,
                raster_height: height,
                grid_width: grid.width(),
                grid_height: grid.height(),
            });
        }
        if x >= width || y >= height {
            return Err(MinimapError::CellOutOfBounds { x, y, width, height });
        }

        let color = classify(&grid.cell(x, y), palette);
        let row = live.buffer.image_row(y);
        live.buffer.set(x, row, color);
        self.backend
            .upload_region(&mut live.texture, &live.buffer, PixelRegion::pixel(x, row));

        log::trace!("minimap cell ({}, {}) -> {:#010x}", x, y, color.raw());
        Ok(color)
    }

    /// The live texture handle for sampling.
    pub fn current_texture(&self) -> Result<&B::Texture, MinimapError> {
        match &self.state {
            State::Live(live) => Ok(&live.texture),
            _ => Err(MinimapError::NotInitialized),
        }
    }

    /// The live pixel buffer.
    pub fn buffer(&self) -> Result<&RasterBuffer, MinimapError> {
        match &self.state {
            State::Live(live) => Ok(&live.buffer),
            _ => Err(MinimapError::NotInitialized),
        }
    }

    /// Releases the buffer and texture.
    ///
    /// A no-op on a store that was never built; disposing twice without a
    /// rebuild in between is an error.
    pub fn dispose(&mut self) -> Result<(), MinimapError> {
        match std::mem::replace(&mut self.state, State::Disposed) {
            State::Empty => {
                self.state = State::Empty;
                Ok(())
            }
            State::Live(live) => {
                log::debug!("minimap raster disposed ({}x{})", live.buffer.width, live.buffer.height);
                Ok(())
            }
            State::Disposed => Err(MinimapError::AlreadyDisposed),
        }
    }
}
