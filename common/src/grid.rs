use std::fmt;

use glam::IVec2;
use miette::*;

/// A rectangular block of cells addressed by absolute coordinates.
///
/// Both bounds are inclusive. Cells are stored row-major, so the cell at `p`
/// lives at `(p.x - min.x) + (p.y - min.y) * width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    min: IVec2,
    max: IVec2,
    cells: Vec<T>,
}

/// Row-major walk over every coordinate in `[min, max]`.
fn positions(min: IVec2, max: IVec2) -> impl Iterator<Item = IVec2> {
    (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
}

impl<T> Grid<T> {
    /// Allocates a grid spanning `[min, max]`, asking `fill` for every cell.
    pub fn new(min: IVec2, max: IVec2, fill: impl FnMut(IVec2) -> T) -> Self {
        let cells = positions(min, max).map(fill).collect();
        Self { min, max, cells }
    }

    /// Builds a grid anchored at the origin from parsed rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(miette!(
                "Row {} has {} cells, expected {} like the first row",
                y,
                row.len(),
                width
            ));
        }

        Ok(Self {
            min: IVec2::ZERO,
            max: IVec2::new(width as i32 - 1, height as i32 - 1),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn min(&self) -> IVec2 {
        self.min
    }

    pub fn max(&self) -> IVec2 {
        self.max
    }

    pub fn width(&self) -> usize {
        (self.max.x - self.min.x + 1).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.max.y - self.min.y + 1).max(0) as usize
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let offset = p - self.min;
        Some(offset.x as usize + offset.y as usize * self.width())
    }

    /// Returns the cell at `p`, or `None` outside the bounds.
    pub fn get(&self, p: IVec2) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: IVec2) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        positions(self.min, self.max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        self.positions().zip(self.cells.iter())
    }

    pub fn into_cells(self) -> impl Iterator<Item = (IVec2, T)> {
        positions(self.min, self.max).zip(self.cells)
    }

    /// Widens the bounds to cover `[min, max]`.
    ///
    /// The resulting bounds are the union of the current and the requested
    /// ones, so a grid never shrinks. New cells come from `fill`; every
    /// existing cell keeps its value at its coordinate.
    pub fn grow(&mut self, min: IVec2, max: IVec2, fill: impl FnMut(IVec2) -> T) {
        let (min, max) = if self.is_empty() {
            (min, max)
        } else {
            (min.min(self.min), max.max(self.max))
        };
        if min == self.min && max == self.max {
            return;
        }

        tracing::debug!(from = ?(self.min, self.max), to = ?(min, max), "growing grid");

        let previous = std::mem::replace(self, Self::new(min, max, fill));
        for (p, cell) in previous.into_cells() {
            if let Some(slot) = self.get_mut(p) {
                *slot = cell;
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width().max(1)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn numbered(min: IVec2, max: IVec2) -> Grid<i32> {
        Grid::new(min, max, |p| p.x * 100 + p.y)
    }

    #[test]
    fn fills_every_cell_from_rule() {
        let grid = numbered(IVec2::new(-1, 2), IVec2::new(1, 3));
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
        for (p, &cell) in grid.iter() {
            assert_eq!(cell, p.x * 100 + p.y);
        }
    }

    #[rstest]
    #[case(IVec2::new(-2, 2))]
    #[case(IVec2::new(2, 2))]
    #[case(IVec2::new(0, 1))]
    #[case(IVec2::new(0, 4))]
    fn lookup_outside_bounds_is_none(#[case] p: IVec2) {
        let mut grid = numbered(IVec2::new(-1, 2), IVec2::new(1, 3));
        assert_eq!(grid.get(p), None);
        assert_eq!(grid.get_mut(p), None);
    }

    #[test]
    fn cells_are_stored_row_major() {
        let grid = Grid::new(IVec2::new(10, 5), IVec2::new(12, 6), |p| p);
        assert_eq!(grid.cells[(11 - 10) + (6 - 5) * 3], IVec2::new(11, 6));
    }

    #[rstest]
    #[case(IVec2::new(-3, 2), IVec2::new(3, 3))]
    #[case(IVec2::new(-1, 0), IVec2::new(1, 10))]
    #[case(IVec2::new(-5, -5), IVec2::new(5, 5))]
    fn growth_preserves_existing_cells(#[case] min: IVec2, #[case] max: IVec2) {
        let original = numbered(IVec2::new(-1, 2), IVec2::new(1, 3));
        let mut grown = original.clone();
        grown.grow(min, max, |_| -1);

        assert_eq!(grown.min(), min);
        assert_eq!(grown.max(), max);
        for (p, cell) in original.iter() {
            assert_eq!(grown.get(p), Some(cell));
        }
        for (p, &cell) in grown.iter() {
            if !original.contains(p) {
                assert_eq!(cell, -1);
            }
        }
    }

    #[test]
    fn growth_never_shrinks() {
        let mut grid = numbered(IVec2::new(0, 0), IVec2::new(4, 4));
        grid.grow(IVec2::new(1, 1), IVec2::new(2, 6), |_| 0);
        assert_eq!(grid.min(), IVec2::new(0, 0));
        assert_eq!(grid.max(), IVec2::new(4, 6));
        assert_eq!(grid.get(IVec2::new(4, 4)), Some(&404));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![1, 2, 3], vec![4, 5]];
        assert!(Grid::from_rows(rows).is_err());
    }

    #[test]
    fn renders_rows() -> Result<()> {
        let grid = Grid::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']])?;
        assert_eq!(grid.max(), IVec2::new(1, 1));
        assert_eq!(grid.to_string(), "ab\ncd");
        Ok(())
    }
}
