use std::fmt;

use aoc_common::Grid;
use glam::IVec2;

use crate::scan::Scan;

/// Where sand pours in.
pub const SOURCE: IVec2 = IVec2::new(500, 0);

/// Rows between the lowest rock and the floor.
pub const FLOOR_DEPTH: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandCell {
    Source,
    Rock,
    Air,
    Sand,
}

impl SandCell {
    pub fn glyph(self) -> char {
        match self {
            SandCell::Source => '+',
            SandCell::Rock => '#',
            SandCell::Air => '.',
            SandCell::Sand => 'o',
        }
    }
}

impl fmt::Display for SandCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Whether the cave has a bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Sand falling past the lowest rock is lost.
    Abyss,
    /// An endless rock floor lies `FLOOR_DEPTH` rows below the lowest rock.
    Floor,
}

/// What an unscanned cell holds: the source, the floor, or air.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terrain {
    pub source: IVec2,
    pub floor: Option<i32>,
}

impl Terrain {
    pub fn classify(&self, p: IVec2) -> SandCell {
        if p == self.source {
            SandCell::Source
        } else if self.floor == Some(p.y) {
            SandCell::Rock
        } else {
            SandCell::Air
        }
    }
}

/// Lays the scanned rocks into a grid just large enough to hold them and
/// the source (plus the floor, when there is one).
pub fn carve(scan: &Scan, variant: Variant, source: IVec2) -> (Grid<SandCell>, Terrain) {
    let (min, mut max) = scan.bounds(source);
    let floor = match variant {
        Variant::Abyss => None,
        Variant::Floor => {
            max.y += FLOOR_DEPTH;
            Some(max.y)
        }
    };

    let terrain = Terrain { source, floor };
    let mut cave = Grid::new(min, max, |p| terrain.classify(p));
    for rock in scan.rocks() {
        if let Some(cell) = cave.get_mut(rock) {
            *cell = SandCell::Rock;
        }
    }

    (cave, terrain)
}

#[cfg(test)]
mod tests {
    use super::*;

    use miette::*;

    const EXAMPLE: &str = "498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9";

    #[test]
    fn abyss_cave_matches_scan() -> Result<()> {
        let scan = Scan::parse(EXAMPLE)?;
        let (cave, terrain) = carve(&scan, Variant::Abyss, SOURCE);
        assert_eq!(terrain.floor, None);
        assert_eq!(
            cave.to_string(),
            "......+...
..........
..........
..........
....#...##
....#...#.
..###...#.
........#.
........#.
#########."
        );
        Ok(())
    }

    #[test]
    fn floor_sits_below_lowest_rock() -> Result<()> {
        let scan = Scan::parse(EXAMPLE)?;
        let (cave, terrain) = carve(&scan, Variant::Floor, SOURCE);
        assert_eq!(terrain.floor, Some(11));
        assert_eq!(cave.max().y, 11);
        assert!(cave
            .positions()
            .filter(|p| p.y == 11)
            .all(|p| cave.get(p) == Some(&SandCell::Rock)));
        assert_eq!(cave.get(IVec2::new(500, 10)), Some(&SandCell::Air));
        Ok(())
    }

    #[test]
    fn classifies_unscanned_cells() {
        let terrain = Terrain {
            source: SOURCE,
            floor: Some(4),
        };
        assert_eq!(terrain.classify(SOURCE), SandCell::Source);
        assert_eq!(terrain.classify(IVec2::new(-30, 4)), SandCell::Rock);
        assert_eq!(terrain.classify(IVec2::new(501, 3)), SandCell::Air);
    }
}
