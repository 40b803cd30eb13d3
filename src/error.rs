//! Error types for board construction, layout, map persistence and configuration.

use thiserror::Error;

/// Reasons a [`BoardShape`](crate::BoardShape) cannot back a board.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoardError {
    /// Board or playable dimension is zero.
    #[error("board dimensions must be non-zero")]
    ZeroDimension,
    /// Tile width:height ratio is zero, negative or not finite.
    #[error("invalid isometric ratio: {0}")]
    InvalidIsoRatio(f64),
    /// Playable footprint is larger than the board.
    #[error("playable area {playable_width}x{playable_height} exceeds board {width}x{height}")]
    PlayableExceedsBoard {
        /// Board width (columns).
        width: u16,
        /// Board height (rows).
        height: u16,
        /// Playable width.
        playable_width: u16,
        /// Playable height.
        playable_height: u16,
    },
    /// The diamond formula only holds when height >= width.
    #[error("playable height {playable_height} is smaller than playable width {playable_width}")]
    WiderThanTall {
        /// Playable width.
        playable_width: u16,
        /// Playable height.
        playable_height: u16,
    },
    /// The enumerated diamond would index outside the cell array.
    #[error("diamond needs {rows_needed} rows and {cols_needed} columns, board is {height}x{width}")]
    DiamondDoesNotFit {
        /// Rows the diamond occupies.
        rows_needed: u32,
        /// Columns the diamond occupies.
        cols_needed: u32,
        /// Board width (columns).
        width: u16,
        /// Board height (rows).
        height: u16,
    },
}

/// Failures of a layout pass or a rescale request.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// Display area has a zero, negative or non-finite side.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Snapping to whole pixels left a tile with no area.
    #[error("viewport too small: tiles would be {width}x{height} pixels")]
    DegenerateTile {
        /// Tile width after snapping.
        width: f64,
        /// Tile height after snapping.
        height: f64,
    },
    /// Board has never been through a layout pass.
    #[error("board has no canonical layout")]
    NoCanonicalLayout,
}

/// Failures of saving or loading a map file.
#[derive(Debug, Error)]
pub enum MapError {
    /// File could not be read, written or renamed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Content is not valid JSON or does not match the record layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A required top-level field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// Content is structurally valid JSON but describes an impossible board.
    #[error("malformed map: {0}")]
    Malformed(String),
    /// A cell carried a type string outside the known set (strict loads only).
    #[error("unknown cell type {value:?} at row {row}, column {col}")]
    UnknownCellType {
        /// The offending string.
        value: String,
        /// Row of the record.
        row: usize,
        /// Column of the record.
        col: usize,
    },
    /// Map name is empty or would escape the maps directory.
    #[error("invalid map name {0:?}")]
    InvalidName(String),
    /// Stored dimensions cannot back a board.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Failures of loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Content is not valid TOML or has a field of the wrong type.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Configuration could not be written as TOML.
    #[error("TOML write error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Board fields describe an invalid shape.
    #[error("invalid board in config: {0}")]
    Board(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_display_io() {
        let err = MapError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_map_error_display_unknown_type() {
        let err = MapError::UnknownCellType {
            value: "LAVA".to_string(),
            row: 3,
            col: 7,
        };
        assert_eq!(
            err.to_string(),
            "unknown cell type \"LAVA\" at row 3, column 7"
        );
    }

    #[test]
    fn test_board_error_passes_through() {
        let err = MapError::from(BoardError::ZeroDimension);
        assert_eq!(err.to_string(), "board dimensions must be non-zero");
    }

    #[test]
    fn test_config_error_wraps_board() {
        let err = ConfigError::from(BoardError::ZeroDimension);
        assert!(err.to_string().starts_with("invalid board in config"));
    }
}
