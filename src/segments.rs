use crate::cells::{Axis, Cartesian2DCoordinate, Direction, End};
use crate::grid::Grid;

/// Identifies a segment within one axis. Row ids and column ids are allocated independently,
/// so row 3 and column 3 are unrelated segments.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct SegmentId(pub usize);

impl SegmentId {
    /// The id of the row and of the column seeded at the grid origin.
    pub const SEED: SegmentId = SegmentId(1);

    #[inline]
    fn arena_index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

/// Names one end of one segment.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct SegmentEnd {
    pub axis: Axis,
    pub id: SegmentId,
    pub end: End,
}

impl SegmentEnd {
    pub fn new(axis: Axis, id: SegmentId, end: End) -> SegmentEnd {
        SegmentEnd { axis, id, end }
    }
}

/// A straight run of contiguous cells along one axis.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Segment {
    axis: Axis,
    weight: usize,
    head: Cartesian2DCoordinate,
    tail: Cartesian2DCoordinate,
    head_alive: bool,
    tail_alive: bool,
}

impl Segment {
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of cells in the run.
    #[inline]
    pub fn weight(&self) -> usize {
        self.weight
    }

    #[inline]
    pub fn head(&self) -> Cartesian2DCoordinate {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> Cartesian2DCoordinate {
        self.tail
    }

    #[inline]
    pub fn end_coordinate(&self, end: End) -> Cartesian2DCoordinate {
        match end {
            End::Head => self.head,
            End::Tail => self.tail,
        }
    }

    #[inline]
    pub fn is_end_alive(&self, end: End) -> bool {
        match end {
            End::Head => self.head_alive,
            End::Tail => self.tail_alive,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.head_alive || self.tail_alive
    }

    /// The ends that can still grow, head first.
    pub fn live_ends(&self) -> impl Iterator<Item = End> + '_ {
        [End::Head, End::Tail].iter().cloned().filter(move |&end| self.is_end_alive(end))
    }

    /// Does the run include the coordinate.
    pub fn contains(&self, coord: Cartesian2DCoordinate) -> bool {
        let fixed_matches = match self.axis {
            Axis::Row => coord.y == self.head.y,
            Axis::Column => coord.x == self.head.x,
        };
        let along = coord.along(self.axis);
        fixed_matches && self.tail.along(self.axis) <= along && along <= self.head.along(self.axis)
    }

    pub(crate) fn grow(&mut self, end: End, to: Cartesian2DCoordinate) {
        self.weight += 1;
        match end {
            End::Head => self.head = to,
            End::Tail => self.tail = to,
        }
    }

    pub(crate) fn kill(&mut self, end: End) {
        match end {
            End::Head => self.head_alive = false,
            End::Tail => self.tail_alive = false,
        }
    }
}

/// Owns every segment of both axes.
///
/// Each axis is an arena: segment id `n` lives at index `n - 1`, ids are handed out in creation
/// order and segments are never removed, dead ones simply stop being candidates.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct SegmentRegistry {
    rows: Vec<Segment>,
    columns: Vec<Segment>,
}

impl SegmentRegistry {
    /// A registry holding the seed row and column anchored at the grid origin.
    pub fn seeded(grid: &Grid) -> SegmentRegistry {
        let capacity = grid.size().0;
        let mut registry = SegmentRegistry {
            rows: Vec::with_capacity(capacity),
            columns: Vec::with_capacity(capacity),
        };
        let origin = Cartesian2DCoordinate::origin();
        let _ = registry.create_segment(grid, Axis::Row, origin);
        let _ = registry.create_segment(grid, Axis::Column, origin);
        registry
    }

    /// Allocate a single cell segment at `origin`.
    ///
    /// Each end starts alive only if the neighbouring cell it would grow into is on the grid and
    /// still unvisited.
    pub fn create_segment(&mut self,
                          grid: &Grid,
                          axis: Axis,
                          origin: Cartesian2DCoordinate)
                          -> SegmentId {

        let can_grow = |direction: Direction| {
            grid.offset(origin, axis, direction.sign())
                .map_or(false, |neighbour| !grid.is_visited(neighbour))
        };
        let segment = Segment {
            axis,
            weight: 1,
            head: origin,
            tail: origin,
            head_alive: can_grow(Direction::Forward),
            tail_alive: can_grow(Direction::Backward),
        };

        let arena = self.arena_mut(axis);
        arena.push(segment);
        SegmentId(arena.len())
    }

    #[inline]
    pub fn segment(&self, axis: Axis, id: SegmentId) -> Option<&Segment> {
        id.arena_index().and_then(|index| self.arena(axis).get(index))
    }

    #[inline]
    pub(crate) fn segment_mut(&mut self, axis: Axis, id: SegmentId) -> Option<&mut Segment> {
        match id.arena_index() {
            Some(index) => self.arena_mut(axis).get_mut(index),
            None => None,
        }
    }

    /// Ids of the segments along `axis` with at least one live end, in id order.
    pub fn alive_segments(&self, axis: Axis) -> Vec<SegmentId> {
        self.iter(axis)
            .filter(|(_, segment)| segment.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn has_alive_segments(&self, axis: Axis) -> bool {
        self.arena(axis).iter().any(Segment::is_alive)
    }

    /// Mark one segment end as unable to grow. Ends never come back to life.
    pub fn kill(&mut self, segment_end: SegmentEnd) {
        if let Some(segment) = self.segment_mut(segment_end.axis, segment_end.id) {
            segment.kill(segment_end.end);
        }
    }

    #[inline]
    pub fn len(&self, axis: Axis) -> usize {
        self.arena(axis).len()
    }

    pub fn iter(&self, axis: Axis) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.arena(axis)
            .iter()
            .enumerate()
            .map(|(index, segment)| (SegmentId(index + 1), segment))
    }

    #[inline]
    fn arena(&self, axis: Axis) -> &Vec<Segment> {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    #[inline]
    fn arena_mut(&mut self, axis: Axis) -> &mut Vec<Segment> {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnLength, RowLength};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(RowLength(w), ColumnLength(h)).expect("valid grid dimensions")
    }

    #[test]
    fn seeds_grow_away_from_the_corner() {
        let g = grid(4, 4);
        let registry = SegmentRegistry::seeded(&g);
        for &axis in &[Axis::Row, Axis::Column] {
            assert_eq!(registry.len(axis), 1);
            let seed = registry.segment(axis, SegmentId::SEED).unwrap();
            assert_eq!(seed.weight(), 1);
            assert_eq!(seed.head(), Cartesian2DCoordinate::origin());
            assert_eq!(seed.tail(), Cartesian2DCoordinate::origin());
            assert!(seed.is_end_alive(End::Head));
            assert!(!seed.is_end_alive(End::Tail));
            assert_eq!(registry.alive_segments(axis), vec![SegmentId::SEED]);
        }
    }

    #[test]
    fn seeds_on_a_single_row_grid() {
        let g = grid(5, 1);
        let registry = SegmentRegistry::seeded(&g);
        assert!(registry.segment(Axis::Row, SegmentId::SEED).unwrap().is_alive());
        assert!(!registry.segment(Axis::Column, SegmentId::SEED).unwrap().is_alive());
        assert!(registry.alive_segments(Axis::Column).is_empty());
    }

    #[test]
    fn ids_follow_creation_order_per_axis() {
        let g = grid(4, 4);
        let mut registry = SegmentRegistry::seeded(&g);
        let c = Cartesian2DCoordinate::new(2, 2);
        assert_eq!(registry.create_segment(&g, Axis::Column, c), SegmentId(2));
        assert_eq!(registry.create_segment(&g, Axis::Column, c), SegmentId(3));
        assert_eq!(registry.create_segment(&g, Axis::Row, c), SegmentId(2));
        assert_eq!(registry.len(Axis::Column), 3);
        assert_eq!(registry.len(Axis::Row), 2);
    }

    #[test]
    fn new_segment_liveness_looks_at_neighbours() {
        let mut g = grid(3, 3);
        g.assign(Cartesian2DCoordinate::new(1, 0), SegmentId(1), SegmentId(2)).unwrap();
        let mut registry = SegmentRegistry::seeded(&g);

        // Row at (2, 0): forward is off the grid, backward is the visited (1, 0).
        let id = registry.create_segment(&g, Axis::Row, Cartesian2DCoordinate::new(2, 0));
        let row = registry.segment(Axis::Row, id).unwrap();
        assert!(!row.is_end_alive(End::Head));
        assert!(!row.is_end_alive(End::Tail));
        assert!(!row.is_alive());

        // Column at (2, 1): (2, 0) above and (2, 2) below are both unvisited.
        let id = registry.create_segment(&g, Axis::Column, Cartesian2DCoordinate::new(2, 1));
        let column = registry.segment(Axis::Column, id).unwrap();
        assert!(column.is_end_alive(End::Head));
        assert!(column.is_end_alive(End::Tail));
        assert_eq!(column.live_ends().collect::<Vec<_>>(), vec![End::Head, End::Tail]);
    }

    #[test]
    fn unknown_ids_are_absent() {
        let g = grid(2, 2);
        let registry = SegmentRegistry::seeded(&g);
        assert!(registry.segment(Axis::Row, SegmentId(0)).is_none());
        assert!(registry.segment(Axis::Row, SegmentId(2)).is_none());
    }

    #[test]
    fn killed_ends_stay_dead() {
        let g = grid(4, 4);
        let mut registry = SegmentRegistry::seeded(&g);
        let head = SegmentEnd::new(Axis::Row, SegmentId::SEED, End::Head);
        registry.kill(head);
        registry.kill(head);
        let seed = registry.segment(Axis::Row, SegmentId::SEED).unwrap();
        assert!(!seed.is_alive());
        assert!(registry.alive_segments(Axis::Row).is_empty());
        assert!(!registry.has_alive_segments(Axis::Row));
        assert!(registry.has_alive_segments(Axis::Column));
    }

    #[test]
    fn growing_moves_the_end_and_adds_weight() {
        let g = grid(4, 4);
        let mut registry = SegmentRegistry::seeded(&g);
        {
            let seed = registry.segment_mut(Axis::Column, SegmentId::SEED).unwrap();
            seed.grow(End::Head, Cartesian2DCoordinate::new(0, 1));
            seed.grow(End::Head, Cartesian2DCoordinate::new(0, 2));
        }
        let seed = registry.segment(Axis::Column, SegmentId::SEED).unwrap();
        assert_eq!(seed.weight(), 3);
        assert_eq!(seed.head(), Cartesian2DCoordinate::new(0, 2));
        assert_eq!(seed.tail(), Cartesian2DCoordinate::origin());
        assert!(seed.contains(Cartesian2DCoordinate::new(0, 1)));
        assert!(!seed.contains(Cartesian2DCoordinate::new(0, 3)));
        assert!(!seed.contains(Cartesian2DCoordinate::new(1, 1)));
    }
}
