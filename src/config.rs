//! Runtime configuration, read from a TOML file.
//!
//! ```toml
//! [board]
//! width = 33
//! height = 33
//! playable_width = 15
//! playable_height = 19
//! iso_ratio = 2.0
//!
//! [layout]
//! tile_snap = "exact"
//!
//! [maps]
//! dir = "assets/maps"
//! unknown_cell_type = "lenient"
//!
//! [window]
//! width = 1280
//! height = 720
//! ```
//!
//! Every table and every field is optional; absent values take the defaults
//! shown above.

use crate::board::BoardShape;
use crate::codec::{CellTypePolicy, LoadOptions, MapStore};
use crate::error::ConfigError;
use crate::layout::TileSnap;
use crate::render::PanelLayout;
use crate::transform::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Board dimensions.
    pub board: BoardSection,
    /// Layout pass settings.
    pub layout: LayoutSection,
    /// Map storage settings.
    pub maps: MapsSection,
    /// Window size used to derive the board panel.
    pub window: WindowSection,
}

/// `[board]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSection {
    /// Columns in the cell array.
    pub width: u16,
    /// Rows in the cell array.
    pub height: u16,
    /// Playable footprint width in tiles.
    pub playable_width: u16,
    /// Playable footprint height in tiles.
    pub playable_height: u16,
    /// Tile width over tile height.
    pub iso_ratio: f64,
}

impl Default for BoardSection {
    fn default() -> Self {
        let shape = BoardShape::REFERENCE;
        Self {
            width: shape.width,
            height: shape.height,
            playable_width: shape.playable_width,
            playable_height: shape.playable_height,
            iso_ratio: shape.iso_ratio,
        }
    }
}

/// `[layout]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    /// Tile size rounding.
    pub tile_snap: TileSnap,
}

/// `[maps]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapsSection {
    /// Directory holding named maps.
    pub dir: PathBuf,
    /// Handling of unrecognized cell types on load.
    pub unknown_cell_type: CellTypePolicy,
}

impl Default for MapsSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets/maps"),
            unknown_cell_type: CellTypePolicy::default(),
        }
    }
}

/// `[window]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl GridConfig {
    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, unknown keys, or an invalid board shape.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.shape().validate()?;
        Ok(config)
    }

    /// Read configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse; see
    /// [`GridConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Read `path` if given, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`GridConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Serialize as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Board shape described by the `[board]` table.
    #[must_use]
    pub fn shape(&self) -> BoardShape {
        BoardShape {
            width: self.board.width,
            height: self.board.height,
            playable_width: self.board.playable_width,
            playable_height: self.board.playable_height,
            iso_ratio: self.board.iso_ratio,
        }
    }

    /// Options to pass to map loads.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            unknown_cell_type: self.maps.unknown_cell_type,
        }
    }

    /// Store over the configured maps directory.
    #[must_use]
    pub fn map_store(&self) -> MapStore {
        MapStore::new(self.maps.dir.clone())
    }

    /// Panel split of the configured window.
    #[must_use]
    pub fn panels(&self) -> PanelLayout {
        PanelLayout::compute(self.window.width, self.window.height)
    }

    /// Size of the board panel, the viewport layout passes run against.
    #[must_use]
    pub fn board_viewport(&self) -> Viewport {
        self.panels().main.viewport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_is_default() {
        let config = GridConfig::from_toml("").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.shape(), BoardShape::REFERENCE);
        assert_eq!(config.board_viewport(), Viewport::new(896.0, 576.0));
        assert_eq!(config.maps.dir, PathBuf::from("assets/maps"));
    }

    #[test]
    fn test_partial_tables() {
        let config = GridConfig::from_toml(
            r#"
            [layout]
            tile_snap = "whole_pixels"

            [maps]
            unknown_cell_type = "strict"

            [window]
            width = 1920
            "#,
        )
        .unwrap();
        assert_eq!(config.layout.tile_snap, TileSnap::WholePixels);
        assert_eq!(config.load_options(), LoadOptions::STRICT);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.shape(), BoardShape::REFERENCE);
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let err = GridConfig::from_toml("[board]\nplayable_width = 20\nplayable_height = 10\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Board(BoardError::WiderThanTall { .. })),
            "got {err}"
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            GridConfig::from_toml("[board]\nwidht = 33\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("isoboard.toml");

        let mut config = GridConfig::default();
        config.board.width = 40;
        config.maps.dir = PathBuf::from("custom/maps");
        fs::write(&path, config.to_toml().unwrap()).unwrap();

        assert_eq!(GridConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(GridConfig::load_or_default(None).unwrap(), GridConfig::default());
    }
}
