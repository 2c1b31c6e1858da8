use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::GridError;
use crate::grid::Grid;
use crate::path::backtrack_to_start;
use crate::vertex::Coordinates;

/// Frontier entry. The heap pops the lowest cost first and, among equal costs, the entry that
/// was pushed first, which keeps the visitation order reproducible.
#[derive(Debug)]
struct FrontierEntry {
    cost: u32,
    sequence: usize,
    coords: Coordinates,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.sequence == other.sequence
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both keys are reversed
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Outcome of one search run: the order in which vertices were finalized and the shortest
/// path from start to end. An empty path means the end could not be reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub visited: Vec<Coordinates>,
    pub path: Vec<Coordinates>,
}

impl SearchResult {
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path, if there is one.
    pub fn path_cost(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Finalizes vertices in order of increasing distance from `start` until `end` is finalized or
/// the frontier runs dry, returning the visitation order. The search state of every vertex is
/// reset first, and afterwards each discovered vertex holds its distance and predecessor. A wall
/// cannot be searched from, so a walled `start` yields an empty visitation order.
pub fn dijkstra(
    grid: &mut Grid,
    start: Coordinates,
    end: Coordinates,
) -> Result<Vec<Coordinates>, GridError> {
    grid.get_ix(end)?;
    grid.reset();
    let start_vertex = grid.vertex_mut(start)?;
    if start_vertex.is_wall() {
        debug!("Refusing to search from wall {}", start);
        return Ok(Vec::new());
    }
    start_vertex.distance = 0;

    let mut sequence = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        cost: 0,
        sequence,
        coords: start,
    });
    let mut visited = Vec::new();
    while let Some(FrontierEntry { cost, coords, .. }) = frontier.pop() {
        let vertex = grid.vertex_mut(coords)?;
        // Stale entries are left in the heap when a shorter route is found later.
        if vertex.visited || cost > vertex.distance {
            continue;
        }
        vertex.visited = true;
        visited.push(coords);
        if coords == end {
            break;
        }
        for (successor, move_cost) in grid.neighborhood_points_and_cost(coords) {
            let new_cost = cost.saturating_add(move_cost);
            let neighbour = grid.vertex_mut(successor)?;
            if neighbour.visited || new_cost >= neighbour.distance {
                continue;
            }
            neighbour.distance = new_cost;
            neighbour.previous = Some(coords);
            sequence += 1;
            frontier.push(FrontierEntry {
                cost: new_cost,
                sequence,
                coords: successor,
            });
        }
    }
    Ok(visited)
}

/// Runs [dijkstra] and reconstructs the path to `end`.
pub fn run_search(
    grid: &mut Grid,
    start: Coordinates,
    end: Coordinates,
) -> Result<SearchResult, GridError> {
    let visited = dijkstra(grid, start, end)?;
    let path = backtrack_to_start(grid, start, end)?;
    if path.is_empty() {
        info!(
            "{} is not reachable from {} ({} vertices finalized)",
            end,
            start,
            visited.len()
        );
    } else {
        info!(
            "Found path of length {} from {} to {} ({} vertices finalized)",
            path.len(),
            start,
            end,
            visited.len()
        );
    }
    Ok(SearchResult { visited, path })
}

impl Grid {
    /// Searches between the grid's own start and end markers.
    pub fn search(&mut self) -> Result<SearchResult, GridError> {
        let (start, end) = (self.start(), self.end());
        run_search(self, start, end)
    }
}
