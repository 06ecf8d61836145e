// src/grid/terrain.rs

use serde::{Deserialize, Serialize};

/// Classification of a single tile.
///
/// The numeric codes are what shows up in text dumps and the binary form:
///
/// ```text
/// code  terrain
/// ----  --------
///  0    Open
///  1    Path
///  2    Edge
///  3    Obstacle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Default fill that is not part of the route.
    Open,
    /// A carved tile on the route.
    Path,
    /// Entrance/exit column marker stamped after carving.
    Edge,
    /// Default fill in the strict policy. Stepping here is a fall.
    Obstacle,
}

impl Terrain {
    pub fn code(self) -> u8 {
        match self {
            Terrain::Open => 0,
            Terrain::Path => 1,
            Terrain::Edge => 2,
            Terrain::Obstacle => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Terrain> {
        match code {
            0 => Some(Terrain::Open),
            1 => Some(Terrain::Path),
            2 => Some(Terrain::Edge),
            3 => Some(Terrain::Obstacle),
            _ => None,
        }
    }

    /// True for tiles an agent may stand on: the carved route and the edge columns.
    pub fn is_walkable(self) -> bool {
        matches!(self, Terrain::Path | Terrain::Edge)
    }

    /// Only `Open` and `Obstacle` may be used to fill a fresh grid.
    pub fn is_fill(self) -> bool {
        matches!(self, Terrain::Open | Terrain::Obstacle)
    }

    /// RGB colour used by the debug raster.
    pub fn color(self) -> [u8; 3] {
        match self {
            Terrain::Open => [46, 204, 113],     // Green
            Terrain::Path => [241, 196, 15],     // Yellow
            Terrain::Edge => [52, 152, 219],     // Blue
            Terrain::Obstacle => [44, 62, 80],   // Slate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        for terrain in [Terrain::Open, Terrain::Path, Terrain::Edge, Terrain::Obstacle] {
            assert_eq!(Terrain::from_code(terrain.code()), Some(terrain));
        }
        assert_eq!(Terrain::from_code(4), None);
    }

    #[test]
    fn test_walkable() {
        assert!(Terrain::Path.is_walkable());
        assert!(Terrain::Edge.is_walkable());
        assert!(!Terrain::Open.is_walkable());
        assert!(!Terrain::Obstacle.is_walkable());
    }

    #[test]
    fn test_fill_terrains() {
        assert!(Terrain::Open.is_fill());
        assert!(Terrain::Obstacle.is_fill());
        assert!(!Terrain::Path.is_fill());
        assert!(!Terrain::Edge.is_fill());
    }
}
