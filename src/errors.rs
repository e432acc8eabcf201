use std::error::Error;
use std::fmt;

use crate::cells::{Axis, Cartesian2DCoordinate, End};
use crate::segments::SegmentId;

/// Failures raised by the maze generator.
///
/// Apart from `EmptyGrid` these are invariant violations: they mean the liveness bookkeeping
/// is broken and the run must be abandoned. Lookups outside the grid are never errors, they
/// return `None`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    EmptyGrid,
    UnknownSegment {
        axis: Axis,
        id: SegmentId,
    },
    DeadEnd {
        axis: Axis,
        id: SegmentId,
        end: End,
    },
    CellAlreadyVisited(Cartesian2DCoordinate),
    OutsideGrid(Cartesian2DCoordinate),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::EmptyGrid => write!(f, "grid width and height must both be at least 1"),
            GenerationError::UnknownSegment { axis, id } => {
                write!(f, "no {:?} segment with id {}", axis, id.0)
            }
            GenerationError::DeadEnd { axis, id, end } => {
                write!(f, "tried to extend the dead {:?} of {:?} segment {}", end, axis, id.0)
            }
            GenerationError::CellAlreadyVisited(coord) => {
                write!(f, "cell {} is already owned by a row and a column", coord)
            }
            GenerationError::OutsideGrid(coord) => write!(f, "cell {} is outside the grid", coord),
        }
    }
}

impl Error for GenerationError {}
