use log::warn;

use crate::error::GridError;
use crate::grid::Grid;
use crate::vertex::Coordinates;

/// Walks the predecessor links left by the last search from `end` back to `start` and returns
/// the path in start-to-end order. Returns an empty path when `end` was never finalized.
pub fn backtrack_to_start(
    grid: &Grid,
    start: Coordinates,
    end: Coordinates,
) -> Result<Vec<Coordinates>, GridError> {
    if !grid.vertex(end)?.visited {
        return Ok(Vec::new());
    }
    // A chain can never be longer than the grid, which bounds the walk even on corrupted links.
    let mut path: Vec<Coordinates> = std::iter::successors(Some(end), |&coords| {
        grid.vertex(coords).ok().and_then(|vertex| vertex.previous)
    })
    .take(grid.vertices().len())
    .collect();
    path.reverse();
    if path.first() != Some(&start) {
        warn!(
            "Predecessors of {} lead to {:?} instead of {}",
            end,
            path.first(),
            start
        );
        return Ok(Vec::new());
    }
    Ok(path)
}
