use thiserror::Error;

use crate::vertex::Coordinates;

/// Failures surfaced by grid construction and coordinate lookups. Edits that are defined as
/// no-ops (walling over an endpoint, dragging an endpoint onto a wall, stepping past either end
/// of the animation) are not errors and never produce one of these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("{coords} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        coords: Coordinates,
        rows: usize,
        cols: usize,
    },
    #[error("start and end cannot share cell {coords}")]
    EndpointsCoincide { coords: Coordinates },
    #[error("invalid grid map: {0}")]
    InvalidMap(String),
}
