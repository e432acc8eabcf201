use std::fmt;

use crate::cells::{Axis, Cartesian2DCoordinate, Cell};
use crate::errors::GenerationError;
use crate::segments::SegmentId;
use crate::units::{ColumnLength, ColumnsCount, NodesCount, RowLength, RowsCount};

/// Rectangular grid of cells, the single record of which cells have been visited.
///
/// Cells are stored row major. The grid only knows segment ids, never the segments themselves,
/// the `SegmentRegistry` owns those.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    row_width: RowLength,
    column_height: ColumnLength,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, visited: {}",
               self.rows(), self.columns(), self.visited_count())
    }
}

impl Grid {
    /// Creates a grid with every cell unvisited except the origin, which belongs to the seed
    /// row and column.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<Grid, GenerationError> {

        let (RowLength(w), ColumnLength(h)) = (row_width, column_height);
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            return Err(GenerationError::EmptyGrid);
        }

        let mut cells = vec![Cell::default(); w * h];
        cells[0] = Cell::visited(SegmentId::SEED, SegmentId::SEED);

        Ok(Grid {
            row_width,
            column_height,
            cells,
        })
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.cells.len())
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_visited()).count()
    }

    /// Is the grid coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.row_width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        let width = self.row_width.0;
        Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn cell_at(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Has the cell been claimed by a row and a column. Coordinates outside the grid are
    /// never visited.
    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_at(coord).map_or(false, Cell::is_visited)
    }

    /// The coordinate `steps` cells away from `coord` along `axis`, if that is still on the grid.
    pub fn offset(&self,
                  coord: Cartesian2DCoordinate,
                  axis: Axis,
                  steps: i64)
                  -> Option<Cartesian2DCoordinate> {

        let (x, y) = match axis {
            Axis::Row => (i64::from(coord.x) + steps, i64::from(coord.y)),
            Axis::Column => (i64::from(coord.x), i64::from(coord.y) + steps),
        };

        if x >= 0 && y >= 0 && (x as usize) < self.row_width.0 && (y as usize) < self.column_height.0 {
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Hand an unvisited cell to a row and a column segment.
    pub fn assign(&mut self,
                  coord: Cartesian2DCoordinate,
                  row: SegmentId,
                  column: SegmentId)
                  -> Result<(), GenerationError> {

        let index = self.grid_coordinate_to_index(coord)
            .ok_or(GenerationError::OutsideGrid(coord))?;
        let cell = &mut self.cells[index];
        if cell.is_visited() {
            return Err(GenerationError::CellAlreadyVisited(coord));
        }
        *cell = Cell::visited(row, column);
        Ok(())
    }

    /// All grid coordinates in row major order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            row_width: self.row_width.0,
            current_cell_number: 0,
            cells_count: self.cells.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CellIter {
    row_width: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let n = self.current_cell_number;
            self.current_cell_number += 1;
            Some(Cartesian2DCoordinate::new((n % self.row_width) as u32,
                                            (n / self.row_width) as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(RowLength(w), ColumnLength(h)).expect("valid grid dimensions")
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert_eq!(Grid::new(RowLength(0), ColumnLength(3)), Err(GenerationError::EmptyGrid));
        assert_eq!(Grid::new(RowLength(3), ColumnLength(0)), Err(GenerationError::EmptyGrid));
    }

    #[test]
    fn only_origin_starts_visited() {
        let g = grid(4, 3);
        assert_eq!(g.size().0, 12);
        assert_eq!(g.visited_count(), 1);
        let origin = g.cell_at(Cartesian2DCoordinate::origin()).unwrap();
        assert_eq!(origin.row(), Some(SegmentId::SEED));
        assert_eq!(origin.column(), Some(SegmentId::SEED));
        assert!(!g.is_visited(Cartesian2DCoordinate::new(1, 0)));
    }

    #[test]
    fn cell_at_outside_grid_is_none() {
        let g = grid(3, 2);
        assert!(g.cell_at(Cartesian2DCoordinate::new(2, 1)).is_some());
        assert!(g.cell_at(Cartesian2DCoordinate::new(3, 1)).is_none());
        assert!(g.cell_at(Cartesian2DCoordinate::new(2, 2)).is_none());
        assert!(g.cell_at(Cartesian2DCoordinate::new(u32::MAX, u32::MAX)).is_none());
        assert!(!g.is_visited(Cartesian2DCoordinate::new(u32::MAX, 0)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);
        for (index, coord) in coords.iter().enumerate() {
            assert_eq!(g.index_to_grid_coordinate(index), *coord);
        }
        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
    }

    #[test]
    fn offsets_stay_on_the_grid() {
        let g = grid(3, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(g.offset(gc(0, 0), Axis::Row, 1), Some(gc(1, 0)));
        assert_eq!(g.offset(gc(0, 0), Axis::Row, 2), Some(gc(2, 0)));
        assert_eq!(g.offset(gc(0, 0), Axis::Row, 3), None);
        assert_eq!(g.offset(gc(0, 0), Axis::Row, -1), None);
        assert_eq!(g.offset(gc(2, 1), Axis::Column, -1), Some(gc(2, 0)));
        assert_eq!(g.offset(gc(2, 1), Axis::Column, 1), None);
    }

    #[test]
    fn assign_claims_a_cell_once() {
        let mut g = grid(2, 2);
        let c = Cartesian2DCoordinate::new(1, 1);
        g.assign(c, SegmentId(3), SegmentId(4)).expect("unvisited cell");
        assert!(g.is_visited(c));
        assert_eq!(g.cell_at(c).unwrap().row(), Some(SegmentId(3)));

        assert_eq!(g.assign(c, SegmentId(5), SegmentId(6)),
                   Err(GenerationError::CellAlreadyVisited(c)));
        assert_eq!(g.cell_at(c).unwrap().column(), Some(SegmentId(4)));
        assert_eq!(g.visited_count(), 2);
    }

    #[test]
    fn assign_outside_grid_fails() {
        let mut g = grid(2, 2);
        let c = Cartesian2DCoordinate::new(2, 0);
        assert_eq!(g.assign(c, SegmentId(2), SegmentId(2)), Err(GenerationError::OutsideGrid(c)));
    }

    #[test]
    fn cell_iter() {
        let g = grid(2, 2);
        assert_eq!(g.iter().len(), 4);
        assert_eq!(g.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[Cartesian2DCoordinate::new(0, 0),
                     Cartesian2DCoordinate::new(1, 0),
                     Cartesian2DCoordinate::new(0, 1),
                     Cartesian2DCoordinate::new(1, 1)]);
    }
}
