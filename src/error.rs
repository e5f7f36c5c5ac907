use std::path::PathBuf;
use thiserror::Error;

/// Error type for raster, viewport and loader operations.
#[derive(Debug, Error)]
pub enum MinimapError {
    /// The raster was queried or updated before `rebuild_all`, or after `dispose`.
    #[error("minimap raster is not initialized")]
    NotInitialized,
    /// `dispose` was called twice without a rebuild in between.
    #[error("minimap raster was already disposed")]
    AlreadyDisposed,
    /// A cell coordinate outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} world")]
    CellOutOfBounds {
        /// Column of the offending cell.
        x: u32,
        /// Row of the offending cell.
        y: u32,
        /// Raster width in cells.
        width: u32,
        /// Raster height in cells.
        height: u32,
    },
    /// A world with no cells cannot back a raster.
    #[error("world dimensions {width}x{height} are empty")]
    EmptyWorld {
        /// Width in cells.
        width: u32,
        /// Height in cells.
        height: u32,
    },
    /// The grid changed size without a world load.
    #[error("grid is {grid_width}x{grid_height} but the raster is {raster_width}x{raster_height}")]
    DimensionMismatch {
        /// Width of the allocated raster.
        raster_width: u32,
        /// Height of the allocated raster.
        raster_height: u32,
        /// Width reported by the grid.
        grid_width: u32,
        /// Height reported by the grid.
        grid_height: u32,
    },
    /// The texture backend cannot hold a raster this large.
    #[error("raster {width}x{height} exceeds the texture size limit")]
    RasterTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Rejected configuration value.
    #[error("invalid minimap config: {0}")]
    InvalidConfig(String),
    /// A color string that is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    /// Structurally invalid world file.
    #[error("invalid world: {0}")]
    InvalidWorld(String),
    /// File I/O error.
    #[error("failed to read {path}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// JSON parse error.
    #[error("failed to parse {path}")]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}
