use core::fmt;

use smallvec::SmallVec;

/// Distance assigned to vertices the active search has not discovered.
pub const INFINITY: u32 = u32::MAX;

/// A (row, column) position on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinates {
    pub row: usize,
    pub col: usize,
}

impl Coordinates {
    pub const fn new(row: usize, col: usize) -> Coordinates {
        Coordinates { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coordinates) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The up-to-4 orthogonal neighbours that do not underflow, in the fixed order
    /// up, right, down, left. Upper bounds are left to the grid.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinates; 4]> {
        let mut neighbours = SmallVec::new();
        if self.row > 0 {
            neighbours.push(Coordinates::new(self.row - 1, self.col));
        }
        neighbours.push(Coordinates::new(self.row, self.col + 1));
        neighbours.push(Coordinates::new(self.row + 1, self.col));
        if self.col > 0 {
            neighbours.push(Coordinates::new(self.row, self.col - 1));
        }
        neighbours
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinates {
    fn from((row, col): (usize, usize)) -> Coordinates {
        Coordinates::new(row, col)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexKind {
    #[default]
    Default,
    Start,
    End,
    Wall,
}

/// One grid cell together with the bookkeeping of the most recent search.
///
/// `previous` holds the coordinates of the predecessor on the best known path. It is a plain
/// handle into the owning [Grid](crate::grid::Grid), never an owning link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    coords: Coordinates,
    pub kind: VertexKind,
    pub distance: u32,
    pub visited: bool,
    pub previous: Option<Coordinates>,
}

impl Vertex {
    pub fn new(coords: Coordinates, kind: VertexKind) -> Vertex {
        Vertex {
            coords,
            kind,
            distance: INFINITY,
            visited: false,
            previous: None,
        }
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    /// Clears the search state. Classification and position are left untouched.
    pub fn reset(&mut self) {
        self.distance = INFINITY;
        self.visited = false;
        self.previous = None;
    }

    pub fn is_wall(&self) -> bool {
        self.kind == VertexKind::Wall
    }

    pub fn is_start_or_end(&self) -> bool {
        matches!(self.kind, VertexKind::Start | VertexKind::End)
    }

    pub fn is_discovered(&self) -> bool {
        self.distance != INFINITY
    }
}
