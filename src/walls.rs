use std::fmt;

use crate::cells::{Axis, Cartesian2DCoordinate};
use crate::grid::Grid;
use crate::segments::SegmentRegistry;
use crate::units::{ColumnLength, RowLength};

/// The trailing walls of one cell. The leading (left and top) walls belong to the neighbouring
/// cells, or to the grid boundary.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellWalls {
    pub wall_right: bool,
    pub wall_bottom: bool,
}

impl CellWalls {
    pub const CLOSED: CellWalls = CellWalls {
        wall_right: true,
        wall_bottom: true,
    };
}

/// Read only snapshot of every cell's walls, row major, ready for a renderer.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct WallMap {
    row_width: RowLength,
    column_height: ColumnLength,
    walls: Vec<CellWalls>,
}

impl WallMap {
    /// Derive the walls from the segments.
    ///
    /// A cell is open to the right when its row continues past it, that is unless the cell is
    /// the head of its row. Likewise it is open below unless it is the head of its column.
    /// Unvisited cells are closed on every side.
    pub fn project(grid: &Grid, segments: &SegmentRegistry) -> WallMap {
        let is_head_of = |coord: Cartesian2DCoordinate, axis: Axis| {
            grid.cell_at(coord)
                .and_then(|cell| cell.segment(axis))
                .and_then(|id| segments.segment(axis, id))
                .map_or(true, |segment| segment.head() == coord)
        };

        let walls = grid.iter()
            .map(|coord| {
                CellWalls {
                    wall_right: is_head_of(coord, Axis::Row),
                    wall_bottom: is_head_of(coord, Axis::Column),
                }
            })
            .collect();

        WallMap {
            row_width: grid.row_length(),
            column_height: grid.column_length(),
            walls,
        }
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    pub fn walls_at(&self, coord: Cartesian2DCoordinate) -> Option<CellWalls> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.row_width.0 && y < self.column_height.0 {
            Some(self.walls[y * self.row_width.0 + x])
        } else {
            None
        }
    }

    /// Is there a passage from the cell through its right wall to a neighbour.
    pub fn is_east_open(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize + 1) < self.row_width.0 &&
        self.walls_at(coord).map_or(false, |walls| !walls.wall_right)
    }

    /// Is there a passage from the cell through its bottom wall to a neighbour.
    pub fn is_south_open(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.y as usize + 1) < self.column_height.0 &&
        self.walls_at(coord).map_or(false, |walls| !walls.wall_bottom)
    }

    /// Cells with their walls in row major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, CellWalls)> + '_ {
        let width = self.row_width.0;
        self.walls
            .iter()
            .enumerate()
            .map(move |(index, walls)| {
                (Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32), *walls)
            })
    }
}

impl fmt::Display for WallMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const WALL_UD: &str = "|";
        const OPEN_3: &str = "   ";
        const OPEN: &str = " ";

        let RowLength(width) = self.row_width;
        let ColumnLength(rows_count) = self.column_height;

        // The north boundary is drawn up front, every row below only draws its own body and
        // southern walls.
        let mut output = String::from(CORNER);
        for _ in 0..width {
            output.push_str(WALL_LR_3);
            output.push_str(CORNER);
        }
        output.push('\n');

        for y in 0..rows_count {
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from(CORNER);

            for x in 0..width {
                let walls = self.walls[y * width + x];
                row_middle_section_render.push_str(OPEN_3);
                row_middle_section_render.push_str(if walls.wall_right { WALL_UD } else { OPEN });
                row_bottom_section_render.push_str(if walls.wall_bottom { WALL_LR_3 } else { OPEN_3 });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
