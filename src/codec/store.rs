//! Named maps in a directory.

use super::{LoadOptions, load, save};
use crate::board::Board;
use crate::error::MapError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// A directory of map files addressed by name.
///
/// `"arena"` and `"arena.json"` name the same file; `"arena.v2"` lives in
/// `arena.v2.json`. Names cannot escape the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapStore {
    dir: PathBuf,
}

impl MapStore {
    /// Store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a map name to its file path.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidName`] for empty names, `.`/`..`, or names
    /// containing a path separator.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, MapError> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(MapError::InvalidName(name.to_string()));
        }
        let path = self.dir.join(name);
        if path.extension().is_some_and(|ext| ext == EXTENSION) {
            return Ok(path);
        }
        // "arena.v2" keeps its dot; only a trailing .json counts as the extension.
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Save `board` under `name`, returning the written path.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid name or a failed write.
    pub fn save(&self, name: &str, board: &Board) -> Result<PathBuf, MapError> {
        let path = self.path_for(name)?;
        save(board, &path)?;
        Ok(path)
    }

    /// Load the map called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid name, a missing file, or a file that
    /// does not decode.
    pub fn load(&self, name: &str, options: LoadOptions) -> Result<Board, MapError> {
        load(&self.path_for(name)?, options)
    }

    /// Names of the stored maps, sorted, without the extension.
    ///
    /// A directory that does not exist yet holds no maps.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>, MapError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file()
                && path.extension().is_some_and(|ext| ext == EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
