//! Reversible, pull-based playback of a search run.
//!
//! A [Stepper] chains two [Cursor]s into a single timeline: first every interior cell of the
//! visitation order is marked, then every interior cell of the path. The first and last cell of
//! each sequence are never marked since the start and end carry their own markers.
use log::trace;

use crate::search::SearchResult;
use crate::vertex::Coordinates;

/// The animation phase a marker belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Visited,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// A single marker change emitted by the stepper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub coords: Coordinates,
    pub layer: Layer,
    pub on: bool,
}

/// Receives marker changes. The stepper never draws anything itself; a GUI implements this to
/// paint or unpaint cells. Any `FnMut(Coordinates, Layer, bool)` closure works as a sink.
pub trait MarkSink {
    fn mark(&mut self, coords: Coordinates, layer: Layer, on: bool);
}

impl<F> MarkSink for F
where
    F: FnMut(Coordinates, Layer, bool),
{
    fn mark(&mut self, coords: Coordinates, layer: Layer, on: bool) {
        self(coords, layer, on)
    }
}

/// Counts how many interior cells of a sequence of length `len` are marked. Saturates at both
/// ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    limit: usize,
}

impl Cursor {
    /// A cursor over the interior `[1, len - 2]` of a sequence.
    pub fn over_interior(len: usize) -> Cursor {
        Cursor {
            position: 0,
            limit: len.saturating_sub(2),
        }
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.limit
    }

    /// Moves one cell forward, returning the sequence index that became marked.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        self.position += 1;
        Some(self.position)
    }

    /// Moves one cell back, returning the sequence index that became unmarked.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.position == 0 {
            return None;
        }
        let ix = self.position;
        self.position -= 1;
        Some(ix)
    }
}

#[derive(Clone, Debug)]
struct Track {
    layer: Layer,
    cells: Vec<Coordinates>,
    cursor: Cursor,
}

impl Track {
    fn new(layer: Layer, cells: Vec<Coordinates>) -> Track {
        let cursor = Cursor::over_interior(cells.len());
        Track {
            layer,
            cells,
            cursor,
        }
    }

    fn advance(&mut self) -> Option<Step> {
        let ix = self.cursor.advance()?;
        Some(Step {
            coords: self.cells[ix],
            layer: self.layer,
            on: true,
        })
    }

    fn retreat(&mut self) -> Option<Step> {
        let ix = self.cursor.retreat()?;
        Some(Step {
            coords: self.cells[ix],
            layer: self.layer,
            on: false,
        })
    }
}

/// Steps through the visited cells and then the path of one search run, in either direction.
///
/// The path cursor only moves once the visited cursor is exhausted and has to return to zero
/// before the visited cursor moves back, so at any time the marked cells are exactly the first
/// `visited_cursor` interior visited cells plus the first `path_cursor` interior path cells.
#[derive(Clone, Debug)]
pub struct Stepper {
    visited: Track,
    path: Track,
}

impl Stepper {
    pub fn new(visited: Vec<Coordinates>, path: Vec<Coordinates>) -> Stepper {
        Stepper {
            visited: Track::new(Layer::Visited, visited),
            path: Track::new(Layer::Path, path),
        }
    }

    pub fn from_result(result: &SearchResult) -> Stepper {
        Stepper::new(result.visited.clone(), result.path.clone())
    }

    pub fn visited_cursor(&self) -> usize {
        self.visited.cursor.position()
    }
    pub fn path_cursor(&self) -> usize {
        self.path.cursor.position()
    }
    pub fn visited_limit(&self) -> usize {
        self.visited.cursor.limit()
    }
    pub fn path_limit(&self) -> usize {
        self.path.cursor.limit()
    }

    /// Length of the combined timeline.
    pub fn total_steps(&self) -> usize {
        self.visited_limit() + self.path_limit()
    }

    /// Position on the combined timeline.
    pub fn position(&self) -> usize {
        self.visited_cursor() + self.path_cursor()
    }

    pub fn is_at_start(&self) -> bool {
        self.position() == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position() == self.total_steps()
    }

    /// Marks the next visited cell, or the next path cell once all visited cells are marked.
    /// Returns `None` at the end of the timeline.
    pub fn step_forward<M: MarkSink + ?Sized>(&mut self, sink: &mut M) -> Option<Step> {
        let step = self.visited.advance().or_else(|| self.path.advance())?;
        Self::emit(step, sink);
        Some(step)
    }

    /// Unmarks the most recently marked cell. Returns `None` at the start of the timeline.
    pub fn step_backward<M: MarkSink + ?Sized>(&mut self, sink: &mut M) -> Option<Step> {
        let step = self.path.retreat().or_else(|| self.visited.retreat())?;
        Self::emit(step, sink);
        Some(step)
    }

    pub fn step<M: MarkSink + ?Sized>(
        &mut self,
        direction: Direction,
        sink: &mut M,
    ) -> Option<Step> {
        match direction {
            Direction::Forward => self.step_forward(sink),
            Direction::Backward => self.step_backward(sink),
        }
    }

    /// Unmarks everything, newest first, and returns both cursors to zero.
    pub fn reset<M: MarkSink + ?Sized>(&mut self, sink: &mut M) {
        while self.step_backward(sink).is_some() {}
    }

    /// Steps in whichever direction is needed until the timeline position equals `position`
    /// (clamped to the timeline). Returns the number of steps taken.
    pub fn seek<M: MarkSink + ?Sized>(&mut self, position: usize, sink: &mut M) -> usize {
        let target = position.min(self.total_steps());
        let mut taken = 0;
        while self.position() < target && self.step_forward(sink).is_some() {
            taken += 1;
        }
        while self.position() > target && self.step_backward(sink).is_some() {
            taken += 1;
        }
        taken
    }

    fn emit<M: MarkSink + ?Sized>(step: Step, sink: &mut M) {
        trace!(
            "{} {:?} marker at {}",
            if step.on { "Setting" } else { "Clearing" },
            step.layer,
            step.coords
        );
        sink.mark(step.coords, step.layer, step.on);
    }
}
