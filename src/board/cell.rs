//! Cell and cell type.

use crate::transform::ScreenPoint;

/// What occupies a board location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Floor a unit can stand on.
    Walkable,
    /// Rendered but holds nothing.
    Empty,
    /// Rendered and blocks movement.
    Obstacle,
    /// Array slot outside the playable diamond. Never drawn or picked.
    #[default]
    NotRendered,
}

impl CellType {
    /// All variants, in file-format order.
    pub const ALL: [CellType; 4] = [
        CellType::Walkable,
        CellType::Empty,
        CellType::Obstacle,
        CellType::NotRendered,
    ];

    /// Name used in map files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CellType::Walkable => "WALKABLE",
            CellType::Empty => "EMPTY",
            CellType::Obstacle => "OBSTACLE",
            CellType::NotRendered => "NO_RENDER",
        }
    }

    /// Parse a map file name. `None` for anything unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Whether the cell is part of the drawn board.
    #[must_use]
    pub const fn is_rendered(self) -> bool {
        !matches!(self, CellType::NotRendered)
    }
}

/// A single board location.
///
/// `position` is the top vertex of the cell's diamond in canonical screen
/// space and only means something relative to the reference viewport of
/// the owning board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    /// Terrain kind.
    pub cell_type: CellType,
    /// Canonical top-vertex position.
    pub position: ScreenPoint,
    /// A game entity stands here. Only valid on walkable cells.
    pub occupied: bool,
}

impl Cell {
    /// Create an unoccupied cell.
    #[must_use]
    pub const fn new(cell_type: CellType, position: ScreenPoint) -> Self {
        Self {
            cell_type,
            position,
            occupied: false,
        }
    }

    /// Create a walkable cell at a canonical position.
    #[must_use]
    pub const fn walkable(x: f64, y: f64) -> Self {
        Self::new(CellType::Walkable, ScreenPoint::new(x, y))
    }

    /// Check the occupancy invariant.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        !self.occupied || matches!(self.cell_type, CellType::Walkable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_names_roundtrip() {
        for t in CellType::ALL {
            assert_eq!(CellType::from_name(t.as_str()), Some(t));
        }
        assert_eq!(CellType::from_name("LAVA"), None);
        assert_eq!(CellType::from_name("walkable"), None);
    }

    #[test]
    fn test_default_cell_is_not_rendered() {
        let cell = Cell::default();
        assert_eq!(cell.cell_type, CellType::NotRendered);
        assert!(!cell.occupied);
        assert!(!cell.cell_type.is_rendered());
    }

    #[test]
    fn test_occupancy_consistency() {
        let mut cell = Cell::walkable(10.0, 20.0);
        cell.occupied = true;
        assert!(cell.is_consistent());

        cell.cell_type = CellType::Obstacle;
        assert!(!cell.is_consistent());
    }
}
