//! The rules deciding which segment ends die when a cell is visited.
//!
//! A segment end stays alive exactly as long as the cell it faces is on the grid and unvisited.
//! Visiting a cell can therefore only ever seal off the ends pointing at it: the extended end
//! itself when the cell beyond it is blocked, the facing end of the segment owning that blocked
//! cell, and the facing ends of the perpendicular segments either side of the new cell.
//!
//! Every function here only reads the grid, so the deaths can be worked out before an extension
//! commits anything.

use smallvec::SmallVec;

use crate::cells::{Axis, Cartesian2DCoordinate, Direction, End};
use crate::grid::Grid;
use crate::segments::SegmentEnd;

pub type EndDeaths = SmallVec<[SegmentEnd; 4]>;

/// The owning segment end that faces a neighbouring cell.
///
/// `side` is where the neighbour sits relative to the cell that is being visited, so the
/// neighbour's segment sees the visited cell on the opposite side.
pub fn facing_owner_end(grid: &Grid,
                        neighbour: Cartesian2DCoordinate,
                        axis: Axis,
                        side: Direction)
                        -> Option<SegmentEnd> {
    grid.cell_at(neighbour)
        .and_then(|cell| cell.segment(axis))
        .map(|owner| SegmentEnd::new(axis, owner, End::facing(side.reversed())))
}

/// Ends that die because of what lies two cells beyond the end being extended.
///
/// `lookahead` is the cell after the newly visited one. Off the grid, the extended end dies.
/// Already visited, the extended end dies along with the end of the lookahead's own segment
/// that points back at it.
pub fn blocked_ahead(grid: &Grid,
                     extended: SegmentEnd,
                     lookahead: Option<Cartesian2DCoordinate>)
                     -> EndDeaths {

    let mut deaths = EndDeaths::new();
    match lookahead {
        None => deaths.push(extended),
        Some(far_cell) if grid.is_visited(far_cell) => {
            deaths.push(extended);
            let side = extended.end.direction();
            deaths.extend(facing_owner_end(grid, far_cell, extended.axis, side));
        }
        Some(_) => {}
    }
    deaths
}

/// Ends of perpendicular segments sealed off by visiting `new_cell` while growing along `axis`.
///
/// The visited neighbours either side of the new cell, across the growth axis, each own a
/// perpendicular segment whose end nearest the new cell can no longer grow.
pub fn collateral_deaths(grid: &Grid, new_cell: Cartesian2DCoordinate, axis: Axis) -> EndDeaths {
    let across = axis.perpendicular();

    [Direction::Forward, Direction::Backward]
        .iter()
        .filter_map(|&side| {
            grid.offset(new_cell, across, side.sign())
                .filter(|&neighbour| grid.is_visited(neighbour))
                .and_then(|neighbour| facing_owner_end(grid, neighbour, across, side))
        })
        .collect()
}
