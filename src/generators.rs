use itertools::Itertools;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{Axis, Cartesian2DCoordinate, End};
use crate::errors::GenerationError;
use crate::grid::Grid;
use crate::liveness;
use crate::segments::{SegmentEnd, SegmentId, SegmentRegistry};
use crate::units::{ColumnLength, RowLength, TargetLength};
use crate::walls::WallMap;

pub const DEFAULT_TARGET_LENGTH: TargetLength = TargetLength(5);
pub const DEFAULT_ROW_LENGTH: RowLength = RowLength(140);
pub const DEFAULT_COLUMN_LENGTH: ColumnLength = ColumnLength(80);

// Small candidate pools are sampled whole, large ones only in their best third.
const SELECTION_POOL_MINIMUM: usize = 50;
const SELECTION_POOL_FRACTION: usize = 3;

/// Everything needed to start a growing segments run.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GrowthOptions {
    row_width: RowLength,
    column_height: ColumnLength,
    target_length: TargetLength,
    seed: u64,
}

impl GrowthOptions {
    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    #[inline]
    pub fn target_length(&self) -> TargetLength {
        self.target_length
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[derive(Debug)]
pub struct GrowthOptionsBuilder {
    options: GrowthOptions,
}

impl GrowthOptionsBuilder {
    /// Default dimensions and target length with a fresh random seed.
    pub fn new() -> GrowthOptionsBuilder {
        GrowthOptionsBuilder {
            options: GrowthOptions {
                row_width: DEFAULT_ROW_LENGTH,
                column_height: DEFAULT_COLUMN_LENGTH,
                target_length: DEFAULT_TARGET_LENGTH,
                seed: rand::random(),
            },
        }
    }

    pub fn row_length(mut self, row_width: RowLength) -> GrowthOptionsBuilder {
        self.options.row_width = row_width;
        self
    }

    pub fn column_length(mut self, column_height: ColumnLength) -> GrowthOptionsBuilder {
        self.options.column_height = column_height;
        self
    }

    pub fn target_length(mut self, target_length: TargetLength) -> GrowthOptionsBuilder {
        self.options.target_length = target_length;
        self
    }

    pub fn seed(mut self, seed: u64) -> GrowthOptionsBuilder {
        self.options.seed = seed;
        self
    }

    pub fn build(self) -> GrowthOptions {
        self.options
    }
}

impl Default for GrowthOptionsBuilder {
    fn default() -> Self {
        GrowthOptionsBuilder::new()
    }
}

/// One successful growth step.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Extension {
    pub axis: Axis,
    pub id: SegmentId,
    pub end: End,
    /// The newly visited cell.
    pub cell: Cartesian2DCoordinate,
    /// The segment created across the growth axis to own `cell`.
    pub crossing_id: SegmentId,
    pub candidates: usize,
    pub sampled: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StepOutcome {
    Continued(Extension),
    /// No segment along this axis can grow. The other axis may still have live segments, see
    /// `GrowingSegments::is_complete`.
    Completed(Axis),
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationStats {
    pub steps: usize,
    pub row_extensions: usize,
    pub column_extensions: usize,
}

impl GenerationStats {
    pub fn extensions(&self) -> usize {
        self.row_extensions + self.column_extensions
    }

    pub fn extensions_along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row_extensions,
            Axis::Column => self.column_extensions,
        }
    }
}

/// How many of the best ranked candidates are eligible for selection out of `candidates_count`.
///
/// Pools of up to 150 segments are capped at 50 (so pools smaller than 50 are sampled whole),
/// larger pools offer their best third.
pub fn selection_pool_size(candidates_count: usize) -> usize {
    if candidates_count > SELECTION_POOL_MINIMUM * SELECTION_POOL_FRACTION {
        (candidates_count + SELECTION_POOL_FRACTION - 1) / SELECTION_POOL_FRACTION
    } else {
        SELECTION_POOL_MINIMUM
    }
}

/// Order candidates by how close their weight is to the target length, closest first.
///
/// Equally close segments keep their relative (id) order.
pub fn rank_by_target_length(segments: &SegmentRegistry,
                             axis: Axis,
                             candidates: Vec<SegmentId>,
                             target_length: TargetLength)
                             -> Vec<SegmentId> {
    let TargetLength(target) = target_length;
    candidates.into_iter()
        .sorted_by_key(|&id| {
            segments.segment(axis, id)
                .map_or(usize::max_value(), |segment| {
                    let weight = segment.weight();
                    if weight > target { weight - target } else { target - weight }
                })
        })
        .collect()
}

/// The growing segments maze generator.
///
/// Rather than carving passages cell by cell, the maze is built from straight row and column
/// corridors. Every visited cell belongs to exactly one row segment and one column segment.
/// Each step picks a live segment, favouring those whose length is closest to the target, and
/// pushes one of its ends a cell further. The newly visited cell starts a one cell segment on
/// the other axis. Steps alternate between growing rows and growing columns.
///
/// Growth only ever enters unvisited cells and meeting a visited cell only ever kills segment
/// ends, so the result is a perfect maze once no segment can grow.
#[derive(Debug)]
pub struct GrowingSegments {
    grid: Grid,
    segments: SegmentRegistry,
    phase: Axis,
    target_length: TargetLength,
    rng: XorShiftRng,
    stats: GenerationStats,
}

impl GrowingSegments {
    pub fn new(options: &GrowthOptions) -> Result<GrowingSegments, GenerationError> {
        let grid = Grid::new(options.row_length(), options.column_length())?;
        let segments = SegmentRegistry::seeded(&grid);

        debug!("growing segments on {:?} x {:?}, target length {}, seed {}",
               options.row_length(), options.column_length(), options.target_length().0, options.seed());

        Ok(GrowingSegments {
            grid,
            segments,
            phase: Axis::Row,
            target_length: options.target_length(),
            rng: XorShiftRng::seed_from_u64(options.seed()),
            stats: GenerationStats::default(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn segments(&self) -> &SegmentRegistry {
        &self.segments
    }

    /// The axis the next step will grow.
    #[inline]
    pub fn phase(&self) -> Axis {
        self.phase
    }

    #[inline]
    pub fn target_length(&self) -> TargetLength {
        self.target_length
    }

    #[inline]
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Grow one segment of the current phase's axis by a cell, then hand over to the other axis.
    ///
    /// The phase and step count only move on once the step has succeeded.
    pub fn step(&mut self) -> Result<StepOutcome, GenerationError> {
        let axis = self.phase;

        let candidates = self.segments.alive_segments(axis);
        if candidates.is_empty() {
            self.finish_step(axis);
            debug!("step {}: no {:?} segment can grow", self.stats.steps, axis);
            return Ok(StepOutcome::Completed(axis));
        }

        let candidates_count = candidates.len();
        let sampled = selection_pool_size(candidates_count).min(candidates_count);
        let ranked = rank_by_target_length(&self.segments, axis, candidates, self.target_length);
        let id = ranked[self.rng.gen_range(0..sampled)];
        let end = self.choose_live_end(axis, id)?;

        let (cell, crossing_id) = self.extend(axis, id, end)?;
        self.finish_step(axis);

        debug!("step {}: grew {:?} {} at its {:?} into {}, samples={} of {}",
               self.stats.steps, axis, id.0, end, cell, sampled, candidates_count);

        Ok(StepOutcome::Continued(Extension {
            axis,
            id,
            end,
            cell,
            crossing_id,
            candidates: candidates_count,
            sampled,
        }))
    }

    fn finish_step(&mut self, axis: Axis) {
        self.phase = axis.perpendicular();
        self.stats.steps += 1;
    }

    /// Pick one of the segment's live ends at random.
    fn choose_live_end(&mut self, axis: Axis, id: SegmentId) -> Result<End, GenerationError> {
        let segment = self.segments
            .segment(axis, id)
            .ok_or(GenerationError::UnknownSegment { axis, id })?;
        let live_ends: SmallVec<[End; 2]> = segment.live_ends().collect();
        live_ends.choose(&mut self.rng)
            .cloned()
            .ok_or(GenerationError::DeadEnd { axis, id, end: End::Tail })
    }

    /// Push one end of a segment a cell further along its axis.
    ///
    /// Returns the newly visited cell and the id of the segment created across it. Nothing is
    /// modified when the end cannot grow.
    pub fn extend(&mut self,
                  axis: Axis,
                  id: SegmentId,
                  end: End)
                  -> Result<(Cartesian2DCoordinate, SegmentId), GenerationError> {

        let segment = self.segments
            .segment(axis, id)
            .ok_or(GenerationError::UnknownSegment { axis, id })?;
        if !segment.is_end_alive(end) {
            return Err(GenerationError::DeadEnd { axis, id, end });
        }

        let from = segment.end_coordinate(end);
        let sign = end.direction().sign();
        let new_cell = self.grid
            .offset(from, axis, sign)
            .ok_or(GenerationError::DeadEnd { axis, id, end })?;
        if self.grid.is_visited(new_cell) {
            return Err(GenerationError::CellAlreadyVisited(new_cell));
        }
        let lookahead = self.grid.offset(from, axis, 2 * sign);

        let extended = SegmentEnd::new(axis, id, end);
        let mut deaths = liveness::blocked_ahead(&self.grid, extended, lookahead);
        deaths.extend(liveness::collateral_deaths(&self.grid, new_cell, axis));

        let crossing_id = self.segments.create_segment(&self.grid, axis.perpendicular(), new_cell);
        let (row, column) = match axis {
            Axis::Row => (id, crossing_id),
            Axis::Column => (crossing_id, id),
        };
        self.grid.assign(new_cell, row, column)?;

        if let Some(segment) = self.segments.segment_mut(axis, id) {
            segment.grow(end, new_cell);
        }
        for death in deaths {
            self.segments.kill(death);
        }

        match axis {
            Axis::Row => self.stats.row_extensions += 1,
            Axis::Column => self.stats.column_extensions += 1,
        }

        Ok((new_cell, crossing_id))
    }

    /// No segment on either axis can grow any more: every cell has been visited.
    pub fn is_complete(&self) -> bool {
        !self.segments.has_alive_segments(Axis::Row) &&
        !self.segments.has_alive_segments(Axis::Column)
    }

    /// Step until complete, returning how many extensions were made.
    ///
    /// A run always makes exactly `width * height - 1` extensions. It can take up to about twice
    /// as many steps, since a step handed to an axis with nothing left to grow still counts.
    pub fn run_to_completion(&mut self) -> Result<usize, GenerationError> {
        let mut extensions = 0;
        while !self.is_complete() {
            if let StepOutcome::Continued(_) = self.step()? {
                extensions += 1;
            }
        }

        info!("maze complete after {} steps: {} row and {} column extensions, {} rows, {} columns",
              self.stats.steps,
              self.stats.row_extensions,
              self.stats.column_extensions,
              self.segments.len(Axis::Row),
              self.segments.len(Axis::Column));

        Ok(extensions)
    }

    /// The current walls of every cell, for rendering.
    pub fn snapshot_walls(&self) -> WallMap {
        WallMap::project(&self.grid, &self.segments)
    }
}
