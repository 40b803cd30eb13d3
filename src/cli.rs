//! CLI command implementations for isoboard.

pub(crate) mod generate;
pub(crate) mod inspect;
pub(crate) mod pick;
pub(crate) mod project;
pub(crate) mod view;

use clap::ValueEnum;
use isoboard::{Board, BoardError, ConfigError, GridConfig, LayoutError, MapError, TileSnap, Viewport};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Tile rounding for the `generate` and `view` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SnapArg {
    /// Exact quotient of display size over footprint.
    Exact,
    /// Round the constraining tile side to whole pixels.
    WholePixels,
}

impl From<SnapArg> for TileSnap {
    fn from(arg: SnapArg) -> Self {
        match arg {
            SnapArg::Exact => TileSnap::Exact,
            SnapArg::WholePixels => TileSnap::WholePixels,
        }
    }
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InspectFormat {
    /// Human-readable summary.
    Text,
    /// Machine-readable summary.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<LayoutError> for CliError {
    fn from(e: LayoutError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<MapError> for CliError {
    fn from(e: MapError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

/// Parse `WIDTHxHEIGHT` into a viewport.
pub(crate) fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = parse_pair(s, 'x')?;
    let viewport = Viewport::new(w, h);
    if viewport.is_valid() {
        Ok(viewport)
    } else {
        Err(format!("viewport must be positive, got {s}"))
    }
}

/// Parse `A<sep>B` into two floats.
pub(crate) fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected A{sep}B, got {s}"))?;
    let a = a.trim().parse::<f64>().map_err(|e| format!("{a}: {e}"))?;
    let b = b.trim().parse::<f64>().map_err(|e| format!("{b}: {e}"))?;
    Ok((a, b))
}

/// Load a map given either as a file path or as a name in the configured store.
pub(crate) fn open_map(config: &GridConfig, map: &str) -> Result<Board, CliError> {
    let path = Path::new(map);
    if path.is_file() {
        return Ok(isoboard::codec::load(path, config.load_options())?);
    }
    Ok(config.map_store().load(map, config.load_options())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("2000x760"), Ok(Viewport::new(2000.0, 760.0)));
        assert_eq!(parse_viewport(" 896.5 x 576 "), Ok(Viewport::new(896.5, 576.0)));
        assert!(parse_viewport("2000").is_err());
        assert!(parse_viewport("0x760").is_err());
        assert!(parse_viewport("widexhigh").is_err());
    }

    #[test]
    fn test_parse_pair_separator() {
        assert_eq!(parse_pair("3,-4.5", ','), Ok((3.0, -4.5)));
        assert!(parse_pair("3x4", ',').is_err());
    }

    #[test]
    fn test_snap_arg_conversion() {
        assert_eq!(TileSnap::from(SnapArg::WholePixels), TileSnap::WholePixels);
        assert_eq!(TileSnap::from(SnapArg::Exact), TileSnap::Exact);
    }
}
