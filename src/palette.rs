use crate::color::PackedColor;
use crate::error::MinimapError;
use crate::grid::{BlockId, FloorId, TeamId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonPalette {
    #[serde(default)]
    default_floor: Option<String>,
    #[serde(default)]
    default_team: Option<String>,
    #[serde(default)]
    blocks: HashMap<u16, String>,
    #[serde(default)]
    floors: HashMap<u16, String>,
    #[serde(default)]
    teams: HashMap<u8, String>,
}

/// Color tables for block, floor and team types.
///
/// Unmapped blocks resolve to [`PackedColor::TRANSPARENT`] so the classifier
/// falls through to the floor; unmapped floors and teams resolve to the
/// palette defaults.
#[derive(Debug, Clone)]
pub struct Palette {
    blocks: HashMap<BlockId, PackedColor>,
    floors: HashMap<FloorId, PackedColor>,
    teams: HashMap<TeamId, PackedColor>,
    default_floor: PackedColor,
    default_team: PackedColor,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            blocks: HashMap::new(),
            floors: HashMap::new(),
            teams: HashMap::new(),
            default_floor: PackedColor::BLACK,
            default_team: PackedColor::opaque(0x80, 0x80, 0x80),
        }
    }
}

impl Palette {
    /// Empty palette with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a block type to a color; `TRANSPARENT` means "show the floor".
    pub fn with_block(mut self, block: BlockId, color: PackedColor) -> Self {
        self.blocks.insert(block, color);
        self
    }

    /// Maps a floor type to a color.
    pub fn with_floor(mut self, floor: FloorId, color: PackedColor) -> Self {
        self.floors.insert(floor, color);
        self
    }

    /// Maps a team to its faction color.
    pub fn with_team(mut self, team: TeamId, color: PackedColor) -> Self {
        self.teams.insert(team, color);
        self
    }

    /// Color used for floors without an entry.
    pub fn with_default_floor(mut self, color: PackedColor) -> Self {
        self.default_floor = color;
        self
    }

    /// Color of a block type.
    #[inline]
    pub fn block_color(&self, block: BlockId) -> PackedColor {
        self.blocks.get(&block).copied().unwrap_or(PackedColor::TRANSPARENT)
    }

    /// Color of a floor type.
    #[inline]
    pub fn floor_color(&self, floor: FloorId) -> PackedColor {
        self.floors.get(&floor).copied().unwrap_or(self.default_floor)
    }

    /// Faction color of a team.
    #[inline]
    pub fn team_color(&self, team: TeamId) -> PackedColor {
        self.teams.get(&team).copied().unwrap_or(self.default_team)
    }

    /// Parses a palette from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, MinimapError> {
        Self::decode(json, Path::new("<inline>"))
    }

    /// Loads a palette from a `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MinimapError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| MinimapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        let palette = Self::decode(&txt, p)?;
        log::debug!(
            "loaded palette {}: {} blocks, {} floors, {} teams",
            p.display(),
            palette.blocks.len(),
            palette.floors.len(),
            palette.teams.len()
        );
        Ok(palette)
    }

    fn decode(txt: &str, path: &Path) -> Result<Self, MinimapError> {
        let j: JsonPalette = serde_json::from_str(txt).map_err(|source| MinimapError::Json {
            path: PathBuf::from(path),
            source,
        })?;

        let mut palette = Palette::default();
        if let Some(c) = j.default_floor {
            palette.default_floor = PackedColor::from_hex(&c)?;
        }
        if let Some(c) = j.default_team {
            palette.default_team = PackedColor::from_hex(&c)?;
        }
        for (id, c) in j.blocks {
            palette.blocks.insert(BlockId(id), PackedColor::from_hex(&c)?);
        }
        for (id, c) in j.floors {
            palette.floors.insert(FloorId(id), PackedColor::from_hex(&c)?);
        }
        for (id, c) in j.teams {
            palette.teams.insert(TeamId(id), PackedColor::from_hex(&c)?);
        }
        Ok(palette)
    }
}
