#![warn(missing_docs)]

//! Incremental world minimap for Macroquad tile games.
//!
//! A [`RasterStore`] keeps one pixel per world cell, rebuilt on world load
//! and patched one pixel at a time on tile changes. A [`ViewportController`]
//! picks the clamped window around the camera and projects entities into it.

mod classify;
mod color;
mod config;
mod error;
mod grid;
mod loader {
    pub mod json_loader;
}
mod minimap;
mod palette;
mod raster;
mod render;
mod spatial;
mod viewport;

pub use classify::classify;
pub use color::PackedColor;
pub use config::MinimapConfig;
pub use error::MinimapError;
pub use grid::{BlockId, Cell, FloorId, GridMap, Structure, TeamId, TileGrid};
pub use loader::json_loader::{decode_world, load_world};
pub use minimap::{Minimap, MinimapEvent};
pub use palette::Palette;
pub use raster::{
    MacroquadBackend, MemoryBackend, MemoryTexture, PixelRegion, RasterBuffer, RasterStore, TextureBackend,
};
pub use render::draw_minimap;
pub use spatial::{EntityIndex, CHUNK_SIZE};
pub use viewport::{entities_in_window, Entity, EntityMarker, NormalizedRegion, SpatialIndex, ViewportController, Window};
