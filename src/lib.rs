//! **segmaze** generates perfect mazes by growing straight row and column segments.
//!
//! - `grid`, `cells`: the rectangular grid and which segments own each visited cell.
//! - `segments`, `liveness`: segment bookkeeping and the rules for when an end stops growing.
//! - `generators`: the growing segments generator itself.
//! - `walls`, `passages`, `renderers`: views of a maze for display and checking.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod liveness;
pub mod passages;
pub mod renderers;
pub mod segments;
pub mod units;
pub mod walls;
#[cfg(feature = "sdl")]
pub mod sdl;
