use crate::config::MinimapConfig;
use crate::error::MinimapError;
use crate::grid::TileGrid;
use crate::palette::Palette;
use crate::raster::{RasterStore, TextureBackend};
use crate::viewport::{entities_in_window, EntityMarker, NormalizedRegion, SpatialIndex, ViewportController, Window};
use macroquad::prelude::Vec2;

/// World notifications the minimap reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimapEvent {
    /// A new world is active; the grid passed alongside is the new one.
    WorldLoaded,
    /// The structure or occupancy of cell `(x, y)` changed.
    TileChanged {
        /// Column.
        x: u32,
        /// Row, 0 at the south edge.
        y: u32,
    },
}

/// Raster, zoom and window queries for one active world.
///
/// Events are applied serially; a host receiving them elsewhere queues them
/// and calls [`drain`](Self::drain) before the frame's queries.
pub struct Minimap<B: TextureBackend> {
    raster: RasterStore<B>,
    viewport: ViewportController,
    palette: Palette,
}

impl<B: TextureBackend> Minimap<B> {
    /// An empty minimap; call [`handle`](Self::handle) with `WorldLoaded` to build it.
    pub fn new(backend: B, palette: Palette, config: MinimapConfig) -> Result<Self, MinimapError> {
        let config = config.validate()?;
        Ok(Minimap {
            raster: RasterStore::new(backend),
            viewport: ViewportController::new(config),
            palette,
        })
    }

    /// Applies one world notification.
    pub fn handle(&mut self, event: MinimapEvent, grid: &impl TileGrid) -> Result<(), MinimapError> {
        match event {
            MinimapEvent::WorldLoaded => {
                self.raster.rebuild_all(grid, &self.palette)?;
                let zoom = self.viewport.fit_to(grid.width(), grid.height());
                log::info!("minimap ready for {}x{} world at zoom {}", grid.width(), grid.height(), zoom);
                Ok(())
            }
            MinimapEvent::TileChanged { x, y } => {
                self.raster.update_one(grid, &self.palette, x, y)?;
                Ok(())
            }
        }
    }

    /// Applies queued notifications in order, stopping at the first error.
    pub fn drain<I>(&mut self, events: I, grid: &impl TileGrid) -> Result<usize, MinimapError>
    where
        I: IntoIterator<Item = MinimapEvent>,
    {
        let mut applied = 0;
        for event in events {
            self.handle(event, grid)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn dimensions(&self) -> Result<(u32, u32), MinimapError> {
        self.raster.dimensions().ok_or(MinimapError::NotInitialized)
    }

    /// Adjusts the zoom against the loaded world; returns the new level.
    pub fn zoom_by(&mut self, delta: i32) -> Result<u32, MinimapError> {
        let (w, h) = self.dimensions()?;
        Ok(self.viewport.zoom_by(delta, w, h))
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u32 {
        self.viewport.zoom()
    }

    /// The raster store.
    pub fn raster(&self) -> &RasterStore<B> {
        &self.raster
    }

    /// The viewport controller.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Live texture for sampling.
    pub fn texture(&self) -> Result<&B::Texture, MinimapError> {
        self.raster.current_texture()
    }

    /// Window centered on `camera` at the current zoom.
    pub fn window(&self, camera: Vec2) -> Result<Window, MinimapError> {
        let (w, h) = self.dimensions()?;
        Ok(self.viewport.window(camera, w, h))
    }

    /// Texture region to sample for `camera`.
    pub fn region(&self, camera: Vec2) -> Result<NormalizedRegion, MinimapError> {
        let (w, h) = self.dimensions()?;
        Ok(self.viewport.window(camera, w, h).to_normalized_region(w, h))
    }

    /// Entity markers visible around `camera`.
    pub fn markers<'a, I>(
        &self,
        camera: Vec2,
        index: &'a I,
    ) -> Result<impl Iterator<Item = EntityMarker> + 'a, MinimapError>
    where
        I: SpatialIndex + ?Sized,
    {
        Ok(entities_in_window(self.window(camera)?, index))
    }

    /// Releases the raster; see [`RasterStore::dispose`].
    pub fn dispose(&mut self) -> Result<(), MinimapError> {
        self.raster.dispose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;
    use crate::grid::{BlockId, Cell, FloorId, GridMap};
    use crate::raster::MemoryBackend;
    use macroquad::prelude::vec2;

    fn minimap() -> Minimap<MemoryBackend> {
        let palette = Palette::new()
            .with_floor(FloorId(0), PackedColor::opaque(0, 80, 0))
            .with_block(BlockId(1), PackedColor::opaque(90, 90, 90));
        Minimap::new(MemoryBackend::default(), palette, MinimapConfig::with_world_units_per_cell(10.0))
            .unwrap()
    }

    #[test]
    fn queries_before_world_load_fail() {
        let mut m = minimap();
        assert!(matches!(m.zoom_by(1), Err(MinimapError::NotInitialized)));
        assert!(matches!(m.window(vec2(0.0, 0.0)), Err(MinimapError::NotInitialized)));
        assert!(matches!(m.texture(), Err(MinimapError::NotInitialized)));
    }

    #[test]
    fn world_load_reclamps_zoom() {
        let mut m = minimap();
        m.handle(MinimapEvent::WorldLoaded, &GridMap::new(512, 512, FloorId(0))).unwrap();
        assert_eq!(m.zoom_by(100).unwrap(), 16);

        m.handle(MinimapEvent::WorldLoaded, &GridMap::new(64, 64, FloorId(0))).unwrap();
        assert_eq!(m.zoom(), 2);
        assert_eq!(m.window(vec2(0.0, 0.0)).unwrap().half_size, 32);
    }

    #[test]
    fn drain_applies_tile_changes_in_order() {
        let mut m = minimap();
        let mut grid = GridMap::new(32, 32, FloorId(0));
        m.handle(MinimapEvent::WorldLoaded, &grid).unwrap();

        grid.set(3, 4, Cell::with_block(FloorId(0), BlockId(1)));
        grid.set(5, 6, Cell::with_block(FloorId(0), BlockId(1)));
        let events = [MinimapEvent::TileChanged { x: 3, y: 4 }, MinimapEvent::TileChanged { x: 5, y: 6 }];
        assert_eq!(m.drain(events, &grid).unwrap(), 2);

        let buf = m.raster().buffer().unwrap();
        assert_eq!(buf.world_pixel(3, 4), PackedColor::opaque(90, 90, 90));
        assert_eq!(buf.world_pixel(5, 6), PackedColor::opaque(90, 90, 90));
        assert_eq!(m.texture().unwrap().region_uploads.len(), 2);
    }

    #[test]
    fn drain_stops_at_first_bad_event() {
        let mut m = minimap();
        let grid = GridMap::new(32, 32, FloorId(0));
        let events = [
            MinimapEvent::WorldLoaded,
            MinimapEvent::TileChanged { x: 40, y: 0 },
            MinimapEvent::TileChanged { x: 0, y: 0 },
        ];
        let err = m.drain(events, &grid).unwrap_err();
        assert!(matches!(err, MinimapError::CellOutOfBounds { x: 40, .. }));
        assert!(m.texture().unwrap().region_uploads.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MinimapConfig {
            world_units_per_cell: 0.0,
            ..MinimapConfig::default()
        };
        assert!(matches!(
            Minimap::new(MemoryBackend::default(), Palette::new(), config),
            Err(MinimapError::InvalidConfig(_))
        ));
    }
}
