//! Isoboard CLI - generate, inspect and view isometric board maps.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use isoboard::{GridConfig, ScreenPoint, TileSize, Viewport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Isoboard - isometric tactics board layout engine
#[derive(Parser, Debug)]
#[command(name = "isoboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out a fresh board and save it as a map
    Generate {
        /// Map name in the configured maps directory
        #[arg(short, long, default_value = "default", conflicts_with = "output")]
        name: String,

        /// Write to this file instead of the maps directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Layout viewport as WIDTHxHEIGHT (default: board panel of the configured window)
        #[arg(long, value_parser = cli::parse_viewport)]
        viewport: Option<Viewport>,

        /// Tile rounding (default: from config)
        #[arg(long)]
        snap: Option<cli::SnapArg>,

        /// Print an ASCII preview of the board
        #[arg(short, long)]
        preview: bool,
    },

    /// Summarize a saved map
    Inspect {
        /// Map file path or map name
        #[arg(required = true)]
        map: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::InspectFormat,

        /// Print an ASCII preview of the board
        #[arg(short, long)]
        preview: bool,
    },

    /// Find the cell under a screen point
    Pick {
        /// Map file path or map name
        #[arg(required = true)]
        map: String,

        /// Screen x coordinate
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Screen y coordinate
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Current display size as WIDTHxHEIGHT (default: the map's reference viewport)
        #[arg(long, value_parser = cli::parse_viewport)]
        viewport: Option<Viewport>,
    },

    /// Convert between screen and grid coordinates for a bare isometric projection
    Project {
        /// Tile size as WIDTHxHEIGHT
        #[arg(long, default_value = "64x32", value_parser = parse_tile)]
        tile: TileSize,

        /// Screen position of grid (0, 0) as X,Y
        #[arg(long, default_value = "0,0", value_parser = parse_origin, allow_hyphen_values = true)]
        origin: ScreenPoint,

        /// Grid rows
        #[arg(long, default_value = "33")]
        rows: u16,

        /// Grid columns
        #[arg(long, default_value = "33")]
        cols: u16,

        /// Treat X Y as a grid position and print its screen position
        #[arg(long)]
        inverse: bool,

        /// Screen x (or grid row with --inverse)
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Screen y (or grid column with --inverse)
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Interactive TUI to view a map, or a fresh layout when no map is given
    View {
        /// Map file path or map name
        map: Option<String>,

        /// Tile rounding for a fresh layout (default: from config)
        #[arg(long)]
        snap: Option<cli::SnapArg>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_tile(s: &str) -> Result<TileSize, String> {
    cli::parse_viewport(s).map(|v| TileSize::new(v.width, v.height))
}

fn parse_origin(s: &str) -> Result<ScreenPoint, String> {
    cli::parse_pair(s, ',').map(|(x, y)| ScreenPoint::new(x, y))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "isoboard=debug,info",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match GridConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Commands::Generate {
            name,
            output,
            viewport,
            snap,
            preview,
        } => cli::generate::execute(&config, &name, output, viewport, snap, preview),

        Commands::Inspect { map, format, preview } => cli::inspect::execute(&config, &map, format, preview),

        Commands::Pick { map, x, y, viewport } => cli::pick::execute(&config, &map, ScreenPoint::new(x, y), viewport),

        Commands::Project {
            tile,
            origin,
            rows,
            cols,
            inverse,
            x,
            y,
        } => cli::project::execute(tile, origin, rows, cols, inverse, x, y),

        Commands::View { map, snap } => cli::view::execute(&config, map.as_deref(), snap),

        Commands::Config => config
            .to_toml()
            .map(|text| print!("{text}"))
            .map_err(cli::CliError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
