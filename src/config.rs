use crate::error::MinimapError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_base_tile_unit() -> u32 {
    16
}
fn default_initial_zoom() -> u32 {
    4
}
fn default_world_units_per_cell() -> f32 {
    8.0
}

/// Tunable minimap constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinimapConfig {
    /// Cells per minimap tile at zoom 1; the window half-size is `base_tile_unit * zoom`.
    #[serde(default = "default_base_tile_unit")]
    pub base_tile_unit: u32,
    /// Zoom level before any adjustment.
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u32,
    /// World distance covered by one cell (camera units / cell).
    #[serde(default = "default_world_units_per_cell")]
    pub world_units_per_cell: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        MinimapConfig {
            base_tile_unit: default_base_tile_unit(),
            initial_zoom: default_initial_zoom(),
            world_units_per_cell: default_world_units_per_cell(),
        }
    }
}

impl MinimapConfig {
    /// Default constants with a different cell size.
    pub fn with_world_units_per_cell(units: f32) -> Self {
        MinimapConfig {
            world_units_per_cell: units,
            ..Self::default()
        }
    }

    /// Rejects values the viewport math cannot work with.
    pub fn validate(self) -> Result<Self, MinimapError> {
        if self.base_tile_unit == 0 {
            return Err(MinimapError::InvalidConfig("base_tile_unit must be at least 1".into()));
        }
        if self.initial_zoom == 0 {
            return Err(MinimapError::InvalidConfig("initial_zoom must be at least 1".into()));
        }
        if !(self.world_units_per_cell.is_finite() && self.world_units_per_cell > 0.0) {
            return Err(MinimapError::InvalidConfig(format!(
                "world_units_per_cell must be positive, got {}",
                self.world_units_per_cell
            )));
        }
        Ok(self)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, MinimapError> {
        Self::decode(json, Path::new("<inline>"))
    }

    /// Loads and validates a config from a `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MinimapError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| MinimapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        let config = Self::decode(&txt, p)?;
        log::debug!("loaded minimap config {}: {:?}", p.display(), config);
        Ok(config)
    }

    fn decode(txt: &str, path: &Path) -> Result<Self, MinimapError> {
        let config: MinimapConfig = serde_json::from_str(txt).map_err(|source| MinimapError::Json {
            path: PathBuf::from(path),
            source,
        })?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let c = MinimapConfig::from_json_str(r#"{ "world_units_per_cell": 10.0 }"#).unwrap();
        assert_eq!(c.base_tile_unit, 16);
        assert_eq!(c.initial_zoom, 4);
        assert_eq!(c.world_units_per_cell, 10.0);
        assert_eq!(MinimapConfig::from_json_str("{}").unwrap(), MinimapConfig::default());
    }

    #[test]
    fn rejects_zero_values() {
        for json in [
            r#"{ "base_tile_unit": 0 }"#,
            r#"{ "initial_zoom": 0 }"#,
            r#"{ "world_units_per_cell": 0.0 }"#,
            r#"{ "world_units_per_cell": -8.0 }"#,
        ] {
            let err = MinimapConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, MinimapError::InvalidConfig(_)), "{json}");
        }
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = MinimapConfig::from_json_str(r#"{ "zoom_speed": 2 }"#).unwrap_err();
        assert!(matches!(err, MinimapError::Json { .. }));
    }
}
