use petgraph::algo;
use petgraph::graph::{self, NodeIndex};
use petgraph::{Graph, Undirected};
use std::fmt;
use std::slice;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{EdgesCount, NodesCount, RowLength};
use crate::walls::WallMap;

/// The maze as an undirected graph: one node per cell, one edge per open wall between two
/// neighbouring cells. Node indices are the cells' row major indices.
pub struct PassageGraph {
    graph: Graph<(), (), Undirected, u32>,
    row_width: RowLength,
}

impl fmt::Debug for PassageGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PassageGraph :: graph: {:?}, row length: {:?}", self.graph, self.row_width)
    }
}

impl PassageGraph {
    pub fn from_walls(walls: &WallMap) -> PassageGraph {
        let RowLength(width) = walls.row_length();
        let cells_count = width * walls.column_length().0;
        let mut graph: Graph<(), (), Undirected, u32> = Graph::with_capacity(cells_count, cells_count);
        for _ in 0..cells_count {
            let _ = graph.add_node(());
        }

        let node = |coord: Cartesian2DCoordinate| {
            NodeIndex::<u32>::new(coord.y as usize * width + coord.x as usize)
        };
        for (coord, _) in walls.iter() {
            if walls.is_east_open(coord) {
                let east = Cartesian2DCoordinate::new(coord.x + 1, coord.y);
                let _ = graph.add_edge(node(coord), node(east), ());
            }
            if walls.is_south_open(coord) {
                let south = Cartesian2DCoordinate::new(coord.x, coord.y + 1);
                let _ = graph.add_edge(node(coord), node(south), ());
            }
        }

        PassageGraph {
            graph,
            row_width: walls.row_length(),
        }
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.graph.node_count())
    }

    #[inline]
    pub fn links_count(&self) -> EdgesCount {
        EdgesCount(self.graph.edge_count())
    }

    /// Every cell can reach every other cell.
    pub fn is_connected(&self) -> bool {
        algo::connected_components(&self.graph) == 1
    }

    /// A perfect maze is a spanning tree of the grid: connected, and exactly one route between
    /// any two cells.
    pub fn is_perfect(&self) -> bool {
        let NodesCount(nodes) = self.size();
        let EdgesCount(edges) = self.links_count();
        nodes > 0 && edges == nodes - 1 && self.is_connected() &&
        !algo::is_cyclic_undirected(&self.graph)
    }

    /// Are the two cells joined by a passage.
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(a_index), Some(b_index)) => self.graph.find_edge(a_index, b_index).is_some(),
            _ => false,
        }
    }

    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_width: self.row_width,
        }
    }

    /// Convert a grid coordinate to its one dimensional index, None if it is outside the maze.
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.node_index(coord).map(|node| node.index())
    }

    fn node_index(&self, coord: Cartesian2DCoordinate) -> Option<NodeIndex<u32>> {
        let RowLength(width) = self.row_width;
        let index = coord.y as usize * width + coord.x as usize;
        if (coord.x as usize) < width && index < self.graph.node_count() {
            Some(NodeIndex::new(index))
        } else {
            None
        }
    }
}

pub struct LinksIter<'a> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), u32>>,
    row_width: RowLength,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let RowLength(width) = self.row_width;
        let to_coordinate = |index: usize| {
            Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
        };
        self.graph_edge_iter
            .next()
            .map(|edge| (to_coordinate(edge.source().index()), to_coordinate(edge.target().index())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a> ExactSizeIterator for LinksIter<'a> {} // default impl using size_hint()

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{Axis, End};
    use crate::grid::Grid;
    use crate::segments::{SegmentId, SegmentRegistry};
    use crate::units::ColumnLength;
    use itertools::Itertools;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    // An L shaped maze over a 2x2 grid grown by hand: the seed row takes (1, 0) and the seed
    // column takes (0, 1), leaving (1, 1) unvisited.
    fn partial_l_maze() -> WallMap {
        let mut g = Grid::new(RowLength(2), ColumnLength(2)).unwrap();
        let mut segments = SegmentRegistry::seeded(&g);

        let column = segments.create_segment(&g, Axis::Column, gc(1, 0));
        g.assign(gc(1, 0), SegmentId::SEED, column).unwrap();
        segments.segment_mut(Axis::Row, SegmentId::SEED).unwrap().grow(End::Head, gc(1, 0));

        let row = segments.create_segment(&g, Axis::Row, gc(0, 1));
        g.assign(gc(0, 1), row, SegmentId::SEED).unwrap();
        segments.segment_mut(Axis::Column, SegmentId::SEED).unwrap().grow(End::Head, gc(0, 1));

        WallMap::project(&g, &segments)
    }

    #[test]
    fn unfinished_maze_is_not_perfect() {
        let passages = PassageGraph::from_walls(&partial_l_maze());
        assert_eq!(passages.size(), NodesCount(4));
        assert_eq!(passages.links_count(), EdgesCount(2));
        assert!(!passages.is_connected());
        assert!(!passages.is_perfect());
    }

    #[test]
    fn links_follow_open_walls() {
        let passages = PassageGraph::from_walls(&partial_l_maze());
        assert!(passages.is_linked(gc(0, 0), gc(1, 0)));
        assert!(passages.is_linked(gc(0, 1), gc(0, 0)));
        assert!(!passages.is_linked(gc(1, 0), gc(1, 1)));
        assert!(!passages.is_linked(gc(0, 0), gc(5, 5)));

        let links = passages.iter_links().sorted().collect::<Vec<_>>();
        assert_eq!(links, vec![(gc(0, 0), gc(0, 1)), (gc(0, 0), gc(1, 0))]);
        assert_eq!(passages.iter_links().len(), 2);
    }

    #[test]
    fn coordinates_to_indices() {
        let passages = PassageGraph::from_walls(&partial_l_maze());
        assert_eq!(passages.grid_coordinate_to_index(gc(1, 1)), Some(3));
        assert_eq!(passages.grid_coordinate_to_index(gc(2, 0)), None);
        assert_eq!(passages.grid_coordinate_to_index(gc(0, 2)), None);
    }
}
