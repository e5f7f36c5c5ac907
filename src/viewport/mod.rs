mod overlay;

pub use overlay::{entities_in_window, Entity, EntityMarker, SpatialIndex};

use crate::config::MinimapConfig;
use macroquad::prelude::*;

/// Square sub-region of the raster centered near the camera.
///
/// `center` is in cell units with world orientation (y grows north). The
/// window spans `center ± half_size` on both axes and always lies inside
/// the raster it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Center in cell units.
    pub center: Vec2,
    /// Half the side length, in cells.
    pub half_size: u32,
    /// World distance per cell, used to map back to world space.
    pub world_units_per_cell: f32,
}

impl Window {
    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> u32 {
        self.half_size * 2
    }

    /// Bottom-left corner in cell units.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.half_size as f32)
    }

    /// Top-right corner in cell units.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.half_size as f32)
    }

    /// The window in world-distance units.
    pub fn world_rect(&self) -> Rect {
        let min = self.min() * self.world_units_per_cell;
        let side = self.size() as f32 * self.world_units_per_cell;
        Rect::new(min.x, min.y, side, side)
    }

    /// Normalized texture coordinates of this window on a `width x height` raster.
    ///
    /// The vertical axis is flipped the same way the raster rows are, so
    /// `v0` is the window's northern edge.
    pub fn to_normalized_region(&self, width: u32, height: u32) -> NormalizedRegion {
        let side = self.size() as f32;
        let x = self.center.x - self.half_size as f32;
        let y = height as f32 - self.center.y - self.half_size as f32;
        let (w, h) = (width as f32, height as f32);
        NormalizedRegion {
            u0: x / w,
            v0: y / h,
            u1: (x + side) / w,
            v1: (y + side) / h,
        }
    }

    /// Size of one cell when the window is drawn into `overlay` pixels.
    #[inline]
    pub fn cell_size_on(&self, overlay: Vec2) -> Vec2 {
        overlay / self.size() as f32
    }
}

/// Texture-space rectangle in `[0, 1]`, image orientation (v grows south).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRegion {
    /// Left edge.
    pub u0: f32,
    /// Top edge.
    pub v0: f32,
    /// Right edge.
    pub u1: f32,
    /// Bottom edge.
    pub v1: f32,
}

impl NormalizedRegion {
    /// The region in pixels of a `tex_w x tex_h` texture.
    pub fn to_source_rect(&self, tex_w: f32, tex_h: f32) -> Rect {
        Rect::new(
            self.u0 * tex_w,
            self.v0 * tex_h,
            (self.u1 - self.u0) * tex_w,
            (self.v1 - self.v0) * tex_h,
        )
    }
}

/// Zoom state and window math for the minimap view.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: MinimapConfig,
    zoom: u32,
}

impl ViewportController {
    /// Starts at `config.initial_zoom`.
    pub fn new(config: MinimapConfig) -> Self {
        ViewportController {
            zoom: config.initial_zoom.max(1),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    /// Current zoom level, always at least 1.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Largest zoom whose window fits a `width x height` world.
    pub fn max_zoom(&self, width: u32, height: u32) -> u32 {
        (width.min(height) / self.config.base_tile_unit / 2).max(1)
    }

    /// Adds `delta` to the zoom and clamps it to `[1, max_zoom]`.
    pub fn zoom_by(&mut self, delta: i32, width: u32, height: u32) -> u32 {
        let max = self.max_zoom(width, height) as i64;
        let zoom = (self.zoom as i64 + delta as i64).clamp(1, max) as u32;
        if zoom != self.zoom {
            log::debug!("minimap zoom {} -> {}", self.zoom, zoom);
        }
        self.zoom = zoom;
        zoom
    }

    /// Re-clamps the current zoom after the world changed size.
    pub fn fit_to(&mut self, width: u32, height: u32) -> u32 {
        self.zoom_by(0, width, height)
    }

    /// Window half-size for `zoom` on a `width x height` world.
    ///
    /// This is `base_tile_unit * zoom`; it only shrinks for worlds narrower
    /// than a zoom-1 window, where it becomes half the short side.
    pub fn half_size(&self, zoom: u32, width: u32, height: u32) -> u32 {
        self.config
            .base_tile_unit
            .saturating_mul(zoom.max(1))
            .min(width.min(height) / 2)
    }

    /// Window for `camera` (world units) at an explicit zoom.
    ///
    /// The center is clamped per axis so the window never leaves
    /// `[0, width) x [0, height)`; the half-size is never reduced to fit.
    pub fn compute_window(&self, camera: Vec2, width: u32, height: u32, zoom: u32) -> Window {
        let half = self.half_size(zoom, width, height);
        let cells = camera / self.config.world_units_per_cell;
        Window {
            center: vec2(clamp_axis(cells.x, half, width), clamp_axis(cells.y, half, height)),
            half_size: half,
            world_units_per_cell: self.config.world_units_per_cell,
        }
    }

    /// Window for `camera` at the current zoom.
    pub fn window(&self, camera: Vec2, width: u32, height: u32) -> Window {
        self.compute_window(camera, width, height, self.zoom)
    }
}

#[inline]
fn clamp_axis(v: f32, half: u32, dim: u32) -> f32 {
    let lo = half as f32;
    let hi = (dim - half) as f32;
    if v.is_nan() {
        lo
    } else {
        v.clamp(lo, hi)
    }
}
