// src/loader/json_loader.rs
use crate::error::MinimapError;
use crate::grid::{BlockId, Cell, FloorId, GridMap, Structure, TeamId};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct JsonLayer {
    name: String,
    #[serde(default)]
    data: Vec<u32>,
}

#[derive(Deserialize)]
struct JsonWorld {
    width: u32,
    height: u32,
    layers: Vec<JsonLayer>,
}

fn layer_ids<T: TryFrom<u32>>(layer: &JsonLayer) -> Result<Vec<T>, MinimapError> {
    layer
        .data
        .iter()
        .map(|&v| {
            T::try_from(v).map_err(|_| {
                MinimapError::InvalidWorld(format!("layer '{}' has out-of-range id {v}", layer.name))
            })
        })
        .collect()
}

/// Decodes a world from JSON text.
///
/// Layers are row-major with row 0 at the south edge. `floor` is required;
/// `block` (0 = empty) and `team` (0 = unowned) are optional. Other layers
/// are ignored.
pub fn decode_world(txt: &str, path: &Path) -> Result<GridMap, MinimapError> {
    let j: JsonWorld = serde_json::from_str(txt).map_err(|source| MinimapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if j.width == 0 || j.height == 0 {
        return Err(MinimapError::EmptyWorld {
            width: j.width,
            height: j.height,
        });
    }
    let len = j.width as usize * j.height as usize;

    let (mut floors, mut blocks, mut teams) = (None, None, None);
    for l in &j.layers {
        if l.data.len() != len {
            return Err(MinimapError::InvalidWorld(format!(
                "layer '{}' has {} cells, expected {}x{}",
                l.name,
                l.data.len(),
                j.width,
                j.height
            )));
        }
        match l.name.as_str() {
            "floor" => floors = Some(layer_ids::<u16>(l)?),
            "block" => blocks = Some(layer_ids::<u16>(l)?),
            "team" => teams = Some(layer_ids::<u8>(l)?),
            other => log::warn!("{}: ignoring unknown layer '{}'", path.display(), other),
        }
    }

    let floors = floors.ok_or_else(|| MinimapError::InvalidWorld("missing 'floor' layer".into()))?;
    let blocks = blocks.unwrap_or_else(|| vec![0; len]);
    let teams = teams.unwrap_or_else(|| vec![0; len]);

    let mut cells = Vec::with_capacity(len);
    for i in 0..len {
        let structure = match (blocks[i], teams[i]) {
            (0, 0) => None,
            (0, _) => {
                return Err(MinimapError::InvalidWorld(format!(
                    "cell ({}, {}) has an owner but no block",
                    i % j.width as usize,
                    i / j.width as usize
                )))
            }
            (b, 0) => Some(Structure {
                block: BlockId(b),
                owner: None,
            }),
            (b, t) => Some(Structure {
                block: BlockId(b),
                owner: Some(TeamId(t)),
            }),
        };
        cells.push(Cell {
            floor: FloorId(floors[i]),
            structure,
        });
    }

    Ok(GridMap::from_cells(j.width, j.height, cells))
}

/// Loads a world file; only `.json` is supported.
pub fn load_world<P: AsRef<Path>>(path: P) -> Result<GridMap, MinimapError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MinimapError::InvalidWorld(format!(
            "world file must be JSON: {}",
            p.display()
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MinimapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let grid = decode_world(&txt, p)?;
    log::debug!("loaded world {}", p.display());
    Ok(grid)
}
