use core::fmt;

use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::UNIT_COST;
use crate::vertex::{Coordinates, Vertex, VertexKind};

/// A rectangular, row-major arrangement of [Vertex] records with exactly one start and one end.
///
/// Besides the cells themselves the grid tracks connected components of the open cells in a
/// [UnionFind] so reachability can be answered without running a search. Opening a cell joins
/// components immediately, while closing one flags the components as dirty since it may split
/// a component in two; they are regenerated on the next [update](Self::update).
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    vertices: Vec<Vertex>,
    start: Coordinates,
    end: Coordinates,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Builds a grid without walls. Fails if either dimension is zero, if an endpoint lies
    /// outside the grid or if both endpoints share a cell.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        for coords in [start, end] {
            if coords.row >= rows || coords.col >= cols {
                return Err(GridError::OutOfBounds { coords, rows, cols });
            }
        }
        if start == end {
            return Err(GridError::EndpointsCoincide { coords: start });
        }
        let vertices = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| {
                let coords = Coordinates::new(row, col);
                let kind = if coords == start {
                    VertexKind::Start
                } else if coords == end {
                    VertexKind::End
                } else {
                    VertexKind::Default
                };
                Vertex::new(coords, kind)
            })
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            vertices,
            start,
            end,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Parses the character map produced by the [Display](fmt::Display) implementation: `S` start, `E` end,
    /// `#` wall and `.` open. Leading and trailing whitespace on each line is ignored.
    pub fn from_ascii(map: &str) -> Result<Grid, GridError> {
        let lines: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let mut start = None;
        let mut end = None;
        let mut walls = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(GridError::InvalidMap(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (col, c) in line.chars().enumerate() {
                let coords = Coordinates::new(row, col);
                let slot = match c {
                    '.' => continue,
                    '#' => {
                        walls.push(coords);
                        continue;
                    }
                    'S' => &mut start,
                    'E' => &mut end,
                    other => {
                        return Err(GridError::InvalidMap(format!(
                            "unexpected character {other:?} at {coords}"
                        )))
                    }
                };
                if slot.replace(coords).is_some() {
                    return Err(GridError::InvalidMap(format!("duplicate {c} at {coords}")));
                }
            }
        }
        let (Some(start), Some(end)) = (start, end) else {
            return Err(GridError::InvalidMap(
                "map needs exactly one S and one E".to_owned(),
            ));
        };
        let mut grid = Grid::new(rows, cols, start, end)?;
        for coords in walls {
            grid.set_wall(coords)?;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Coordinates {
        self.start
    }
    pub fn end(&self) -> Coordinates {
        self.end
    }

    pub fn in_bounds(&self, coords: Coordinates) -> bool {
        coords.row < self.rows && coords.col < self.cols
    }

    /// Row-major index of `coords`, or [GridError::OutOfBounds].
    pub fn get_ix(&self, coords: Coordinates) -> Result<usize, GridError> {
        if self.in_bounds(coords) {
            Ok(coords.row * self.cols + coords.col)
        } else {
            Err(GridError::OutOfBounds {
                coords,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn vertex(&self, coords: Coordinates) -> Result<&Vertex, GridError> {
        let ix = self.get_ix(coords)?;
        Ok(&self.vertices[ix])
    }

    pub(crate) fn vertex_mut(&mut self, coords: Coordinates) -> Result<&mut Vertex, GridError> {
        let ix = self.get_ix(coords)?;
        Ok(&mut self.vertices[ix])
    }

    /// All vertices in row-major order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn can_move_to(&self, coords: Coordinates) -> bool {
        self.in_bounds(coords) && !self.vertices[coords.row * self.cols + coords.col].is_wall()
    }

    /// Orthogonal neighbours of `coords` that lie on the grid and are not walls.
    pub fn neighborhood_points(&self, coords: Coordinates) -> SmallVec<[Coordinates; 4]> {
        coords
            .neumann_neighborhood()
            .into_iter()
            .filter(|&n| self.can_move_to(n))
            .collect()
    }

    /// Open neighbours paired with the cost of moving onto them.
    pub fn neighborhood_points_and_cost(
        &self,
        coords: Coordinates,
    ) -> SmallVec<[(Coordinates, u32); 4]> {
        self.neighborhood_points(coords)
            .into_iter()
            .map(|n| (n, UNIT_COST))
            .collect()
    }

    /// Clears distance, visited flag and predecessor of every vertex.
    pub fn reset(&mut self) {
        self.vertices.iter_mut().for_each(Vertex::reset);
    }

    /// Turns the cell into a wall. Returns whether anything changed: endpoints and existing walls
    /// are left alone.
    pub fn set_wall(&mut self, coords: Coordinates) -> Result<bool, GridError> {
        let vertex = self.vertex_mut(coords)?;
        if vertex.is_start_or_end() {
            debug!("Ignoring wall over endpoint {}", coords);
            return Ok(false);
        }
        if vertex.is_wall() {
            return Ok(false);
        }
        vertex.kind = VertexKind::Wall;
        self.components_dirty = true;
        Ok(true)
    }

    /// Opens a wall cell, returning whether it was a wall.
    pub fn clear_wall(&mut self, coords: Coordinates) -> Result<bool, GridError> {
        let vertex = self.vertex_mut(coords)?;
        if !vertex.is_wall() {
            return Ok(false);
        }
        vertex.kind = VertexKind::Default;
        let ix = self.get_ix(coords)?;
        for n in self.neighborhood_points(coords) {
            let n_ix = self.get_ix(n)?;
            self.components.union(ix, n_ix);
        }
        Ok(true)
    }

    /// Moves the start marker. Rejected (returns `false`) when the target is a wall or the end.
    pub fn move_start(&mut self, coords: Coordinates) -> Result<bool, GridError> {
        let moved = self.move_endpoint(coords, VertexKind::Start)?;
        if moved {
            self.start = coords;
        }
        Ok(moved)
    }

    /// Moves the end marker. Rejected (returns `false`) when the target is a wall or the start.
    pub fn move_end(&mut self, coords: Coordinates) -> Result<bool, GridError> {
        let moved = self.move_endpoint(coords, VertexKind::End)?;
        if moved {
            self.end = coords;
        }
        Ok(moved)
    }

    fn move_endpoint(&mut self, coords: Coordinates, kind: VertexKind) -> Result<bool, GridError> {
        let current = match kind {
            VertexKind::Start => self.start,
            _ => self.end,
        };
        let target = self.vertex(coords)?;
        match target.kind {
            VertexKind::Default => {}
            VertexKind::Wall => {
                debug!("Rejecting move of {:?} onto wall {}", kind, coords);
                return Ok(false);
            }
            _ => return Ok(false),
        }
        self.vertex_mut(current)?.kind = VertexKind::Default;
        self.vertex_mut(coords)?.kind = kind;
        debug!("Moved {:?} from {} to {}", kind, current, coords);
        Ok(true)
    }

    /// Independently turns every non-endpoint cell into a wall with probability `p` (clamped to
    /// `[0, 1]`) and opens it otherwise, then resets the search state.
    pub fn randomize_walls_with<R: Rng + ?Sized>(&mut self, p: f64, rng: &mut R) {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        for vertex in self.vertices.iter_mut() {
            if vertex.is_start_or_end() {
                continue;
            }
            vertex.kind = if rng.gen_bool(p) {
                VertexKind::Wall
            } else {
                VertexKind::Default
            };
        }
        info!("Randomized walls with probability {}", p);
        self.generate_components();
        self.reset();
    }

    pub fn randomize_walls(&mut self, p: f64) {
        self.randomize_walls_with(p, &mut rand::thread_rng());
    }

    /// Opens every wall cell and resets the search state.
    pub fn clear_walls(&mut self) {
        for vertex in self.vertices.iter_mut() {
            if vertex.is_wall() {
                vertex.kind = VertexKind::Default;
            }
        }
        info!("Cleared all walls");
        self.generate_components();
        self.reset();
    }

    pub fn wall_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_wall()).count()
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (ix, vertex) in self.vertices.iter().enumerate() {
            if vertex.is_wall() {
                continue;
            }
            let coords = vertex.coords();
            // Looking right and down covers every edge once.
            for n in [
                Coordinates::new(coords.row, coords.col + 1),
                Coordinates::new(coords.row + 1, coords.col),
            ] {
                if self.can_move_to(n) {
                    self.components.union(ix, n.row * self.cols + n.col);
                }
            }
        }
    }

    /// Checks whether `a` and `b` are open cells on the same component.
    pub fn reachable(&mut self, a: Coordinates, b: Coordinates) -> Result<bool, GridError> {
        let a_ix = self.get_ix(a)?;
        let b_ix = self.get_ix(b)?;
        if self.vertices[a_ix].is_wall() || self.vertices[b_ix].is_wall() {
            return Ok(false);
        }
        self.update();
        Ok(self.components.equiv(a_ix, b_ix))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.vertices.chunks(self.cols) {
            for vertex in row {
                let c = match vertex.kind {
                    VertexKind::Default => '.',
                    VertexKind::Start => 'S',
                    VertexKind::End => 'E',
                    VertexKind::Wall => '#',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(row: usize, col: usize) -> Coordinates {
        Coordinates::new(row, col)
    }

    fn count_kind(grid: &Grid, kind: VertexKind) -> usize {
        grid.vertices().iter().filter(|v| v.kind == kind).count()
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            Grid::new(0, 3, c(0, 0), c(0, 1)).unwrap_err(),
            GridError::EmptyGrid { rows: 0, cols: 3 }
        );
        assert!(matches!(
            Grid::new(2, 2, c(0, 0), c(2, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(
            Grid::new(2, 2, c(1, 1), c(1, 1)).unwrap_err(),
            GridError::EndpointsCoincide { coords: c(1, 1) }
        );
    }

    #[test]
    fn coordinates_match_positions() {
        let grid = Grid::new(3, 4, c(0, 0), c(2, 3)).unwrap();
        for (ix, vertex) in grid.vertices().iter().enumerate() {
            assert_eq!(grid.get_ix(vertex.coords()).unwrap(), ix);
        }
        assert_eq!(grid.vertex(c(2, 3)).unwrap().kind, VertexKind::End);
    }

    #[test]
    fn walls_never_cover_endpoints() {
        let mut grid = Grid::new(2, 2, c(0, 0), c(1, 1)).unwrap();
        assert!(!grid.set_wall(c(0, 0)).unwrap());
        assert!(!grid.set_wall(c(1, 1)).unwrap());
        assert!(grid.set_wall(c(0, 1)).unwrap());
        assert!(!grid.set_wall(c(0, 1)).unwrap());
        assert_eq!(grid.vertex(c(0, 0)).unwrap().kind, VertexKind::Start);
        assert_eq!(grid.wall_count(), 1);
        assert!(grid.clear_wall(c(0, 1)).unwrap());
        assert!(!grid.clear_wall(c(0, 1)).unwrap());
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn out_of_bounds_edit() {
        let mut grid = Grid::new(2, 2, c(0, 0), c(1, 1)).unwrap();
        assert_eq!(
            grid.set_wall(c(5, 0)).unwrap_err(),
            GridError::OutOfBounds {
                coords: c(5, 0),
                rows: 2,
                cols: 2
            }
        );
        assert!(grid.move_start(c(0, 2)).is_err());
    }

    #[test]
    fn move_endpoints() {
        let mut grid = Grid::new(3, 3, c(0, 0), c(2, 2)).unwrap();
        grid.set_wall(c(1, 1)).unwrap();
        assert!(!grid.move_start(c(1, 1)).unwrap());
        assert!(!grid.move_start(c(2, 2)).unwrap());
        assert!(!grid.move_end(c(0, 0)).unwrap());
        assert!(grid.move_start(c(0, 2)).unwrap());
        assert!(grid.move_end(c(2, 0)).unwrap());
        assert_eq!(grid.start(), c(0, 2));
        assert_eq!(grid.end(), c(2, 0));
        assert_eq!(grid.vertex(c(0, 0)).unwrap().kind, VertexKind::Default);
        assert_eq!(count_kind(&grid, VertexKind::Start), 1);
        assert_eq!(count_kind(&grid, VertexKind::End), 1);
        assert_eq!(grid.vertex(c(1, 1)).unwrap().kind, VertexKind::Wall);
    }

    #[test]
    fn random_walls_respect_endpoints() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(6, 6, c(0, 0), c(5, 5)).unwrap();
        grid.randomize_walls_with(1.0, &mut rng);
        assert_eq!(grid.wall_count(), 34);
        assert_eq!(grid.vertex(c(0, 0)).unwrap().kind, VertexKind::Start);
        assert_eq!(grid.vertex(c(5, 5)).unwrap().kind, VertexKind::End);
        grid.randomize_walls_with(0.0, &mut rng);
        assert_eq!(grid.wall_count(), 0);
        grid.randomize_walls_with(f64::NAN, &mut rng);
        assert_eq!(grid.wall_count(), 0);
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn reachability() {
        // S#.
        // .#E
        let mut grid = Grid::from_ascii("S#.\n.#E").unwrap();
        assert!(!grid.reachable(c(0, 0), c(1, 2)).unwrap());
        assert!(grid.reachable(c(0, 0), c(1, 0)).unwrap());
        assert!(grid.reachable(c(0, 2), c(1, 2)).unwrap());
        assert!(!grid.reachable(c(0, 0), c(0, 1)).unwrap());
        grid.clear_wall(c(1, 1)).unwrap();
        assert!(grid.reachable(c(0, 0), c(1, 2)).unwrap());
        grid.set_wall(c(1, 1)).unwrap();
        assert!(!grid.reachable(c(0, 0), c(1, 2)).unwrap());
    }

    #[test]
    fn ascii_round_trip() {
        let map = "S.#\n.#.\n..E\n";
        let grid = Grid::from_ascii(map).unwrap();
        assert_eq!(grid.to_string(), map);
        assert!(matches!(
            Grid::from_ascii("S.\n.E."),
            Err(GridError::InvalidMap(_))
        ));
        assert!(matches!(
            Grid::from_ascii("S.\n.."),
            Err(GridError::InvalidMap(_))
        ));
        assert!(matches!(
            Grid::from_ascii("SS\n.E"),
            Err(GridError::InvalidMap(_))
        ));
        assert!(matches!(
            Grid::from_ascii("S?\n.E"),
            Err(GridError::InvalidMap(_))
        ));
    }
}
