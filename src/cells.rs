use std::convert::From;
use std::fmt;

use crate::segments::SegmentId;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// The coordinate of the top left corner of every grid, where the seed segments live.
    pub fn origin() -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// Position along the given axis: `x` for rows, `y` for columns.
    #[inline]
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.x,
            Axis::Column => self.y,
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The direction a segment grows in.
/// Row segments extend horizontally (along x), column segments vertically (along y).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    #[inline]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

/// Which way to move along an axis: towards larger (`Forward`) or smaller (`Backward`) coordinates.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// One of the two growable ends of a segment.
/// The head always grows forward and the tail backward, so the head is the end with the
/// larger coordinate along the segment's axis.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum End {
    Head,
    Tail,
}

impl End {
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            End::Head => Direction::Forward,
            End::Tail => Direction::Backward,
        }
    }

    #[inline]
    pub fn opposite(self) -> End {
        match self {
            End::Head => End::Tail,
            End::Tail => End::Head,
        }
    }

    /// The end of a segment that faces a cell lying on the given `side` of it.
    ///
    /// A cell sitting forward of a segment can only be reached by the segment's head, one
    /// sitting backward only by its tail.
    #[inline]
    pub fn facing(side: Direction) -> End {
        match side {
            Direction::Forward => End::Head,
            Direction::Backward => End::Tail,
        }
    }
}

/// A grid cell's ownership: the row segment and the column segment running through it.
///
/// Both ids are assigned together when the cell is first visited and never change afterwards.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Cell {
    row: Option<SegmentId>,
    column: Option<SegmentId>,
}

impl Cell {
    pub(crate) fn visited(row: SegmentId, column: SegmentId) -> Cell {
        Cell {
            row: Some(row),
            column: Some(column),
        }
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.row.is_some() && self.column.is_some()
    }

    #[inline]
    pub fn row(&self) -> Option<SegmentId> {
        self.row
    }

    #[inline]
    pub fn column(&self) -> Option<SegmentId> {
        self.column
    }

    /// The segment owning this cell along `axis`, if the cell has been visited.
    #[inline]
    pub fn segment(&self, axis: Axis) -> Option<SegmentId> {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_axes() {
        assert_eq!(Axis::Row.perpendicular(), Axis::Column);
        assert_eq!(Axis::Column.perpendicular(), Axis::Row);
    }

    #[test]
    fn ends_grow_outwards() {
        assert_eq!(End::Head.direction(), Direction::Forward);
        assert_eq!(End::Tail.direction(), Direction::Backward);
        assert_eq!(End::Head.opposite(), End::Tail);
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
    }

    #[test]
    fn facing_end_matches_growth_direction() {
        for &end in &[End::Head, End::Tail] {
            assert_eq!(End::facing(end.direction()), end);
        }
    }

    #[test]
    fn along_picks_axis_component() {
        let c = Cartesian2DCoordinate::new(3, 7);
        assert_eq!(c.along(Axis::Row), 3);
        assert_eq!(c.along(Axis::Column), 7);
    }

    #[test]
    fn cell_visited_only_with_both_ids() {
        let unvisited = Cell::default();
        assert!(!unvisited.is_visited());
        assert_eq!(unvisited.segment(Axis::Row), None);

        let visited = Cell::visited(SegmentId(2), SegmentId(5));
        assert!(visited.is_visited());
        assert_eq!(visited.segment(Axis::Row), Some(SegmentId(2)));
        assert_eq!(visited.segment(Axis::Column), Some(SegmentId(5)));
    }
}
