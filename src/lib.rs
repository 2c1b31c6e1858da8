//! # stepwise_pathfinding
//!
//! The engine behind an interactive shortest-path visualizer. A [Grid] of cells is edited by
//! painting walls and dragging the start and end markers, a uniform-cost
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) search records the order in
//! which cells are finalized, and a [Stepper] replays that order followed by the shortest path one
//! cell at a time, forwards or backwards.
//!
//! Movement is orthogonal only and every move costs [UNIT_COST]. Drawing is left to the caller:
//! the stepper reports every marker change through a [MarkSink].
//!
//! ```
//! use stepwise_pathfinding::{build_grid, create_stepper, run_search, Coordinates, Layer};
//!
//! let start = Coordinates::new(0, 0);
//! let end = Coordinates::new(0, 2);
//! let mut grid = build_grid(1, 3, start, end).unwrap();
//! let result = run_search(&mut grid, start, end).unwrap();
//! assert_eq!(result.path.len(), 3);
//!
//! let mut painted = Vec::new();
//! let mut stepper = create_stepper(&result);
//! while stepper
//!     .step_forward(&mut |coords: Coordinates, layer: Layer, on: bool| {
//!         painted.push((coords, layer, on))
//!     })
//!     .is_some()
//! {}
//! assert_eq!(painted.len(), 2);
//! ```
pub mod error;
pub mod grid;
pub mod markers;
pub mod path;
pub mod search;
pub mod stepper;
pub mod vertex;
pub mod visualizer;

pub use crate::error::GridError;
pub use crate::grid::Grid;
pub use crate::markers::Markers;
pub use crate::path::backtrack_to_start;
pub use crate::search::{dijkstra, run_search, SearchResult};
pub use crate::stepper::{Cursor, Direction, Layer, MarkSink, Step, Stepper};
pub use crate::vertex::{Coordinates, Vertex, VertexKind, INFINITY};
pub use crate::visualizer::{Intent, Visualizer, VisualizerConfig};

/// Cost of moving between two orthogonally adjacent open cells.
pub const UNIT_COST: u32 = 1;
/// Wall density of a freshly generated random layout.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.32;

/// Builds a wall-free grid. See [Grid::new].
pub fn build_grid(
    rows: usize,
    cols: usize,
    start: Coordinates,
    end: Coordinates,
) -> Result<Grid, GridError> {
    Grid::new(rows, cols, start, end)
}

/// Builds a stepper over the visited cells and the path of `result`, with both cursors at zero.
pub fn create_stepper(result: &SearchResult) -> Stepper {
    Stepper::from_result(result)
}

/// Default endpoint placement for a `rows` x `cols` grid. On a landscape grid the endpoints sit
/// on the middle row a fifth of the way in from either side, on a portrait grid they sit on the
/// middle column a fifth of the way in from the top and bottom.
///
/// On grids of one or two cells along the deciding axis (e.g. 1x2 or 2x2) that rule puts both
/// endpoints on the same cell, which [Grid::new] rejects. In that case the end is moved to the
/// bottom-right corner instead, so every grid with at least two cells gets a valid layout.
pub fn initial_endpoints(rows: usize, cols: usize) -> (Coordinates, Coordinates) {
    let (start, end) = if rows < cols {
        (
            Coordinates::new(rows / 2, cols / 5),
            Coordinates::new(rows / 2, (cols * 4 / 5).saturating_sub(1)),
        )
    } else {
        (
            Coordinates::new(rows / 5, cols / 2),
            Coordinates::new((rows * 4 / 5).saturating_sub(1), cols / 2),
        )
    };
    let clamp = |c: Coordinates| {
        Coordinates::new(
            c.row.min(rows.saturating_sub(1)),
            c.col.min(cols.saturating_sub(1)),
        )
    };
    let (start, end) = (clamp(start), clamp(end));
    if start == end {
        (
            start,
            Coordinates::new(rows.saturating_sub(1), cols.saturating_sub(1)),
        )
    } else {
        (start, end)
    }
}
