use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::GridError;
use crate::grid::Grid;
use crate::markers::Markers;
use crate::search::SearchResult;
use crate::stepper::{Direction, Step, Stepper};
use crate::vertex::Coordinates;
use crate::{initial_endpoints, DEFAULT_WALL_PROBABILITY};

/// Settings for a [Visualizer].
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    /// Wall density used when the grid is first built and for [Intent::RandomWalls] requests that
    /// come without an explicit probability.
    pub wall_probability: f64,
    /// Seed for the wall generator. Without one the generator is seeded from entropy.
    pub seed: Option<u64>,
    /// Whether a freshly built grid starts out with random walls.
    pub randomize_on_start: bool,
}

impl Default for VisualizerConfig {
    fn default() -> VisualizerConfig {
        VisualizerConfig {
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: None,
            randomize_on_start: true,
        }
    }
}

/// A discrete user action forwarded by the GUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    PaintWall(Coordinates),
    EraseWall(Coordinates),
    DragStartTo(Coordinates),
    DragEndTo(Coordinates),
    /// Re-rolls all walls with the given probability, or the configured one. `Some(0.0)` clears
    /// every wall.
    RandomWalls(Option<f64>),
    Step(Direction),
    Reset,
}

/// Owns a grid, the result of the latest search and the animation over it, and keeps them
/// consistent as intents arrive.
///
/// Every edit that changes the topology or the endpoints discards the running animation: markers
/// are cleared, the search is rerun and a fresh [Stepper] replaces the old one.
#[derive(Clone, Debug)]
pub struct Visualizer {
    grid: Grid,
    result: SearchResult,
    stepper: Stepper,
    markers: Markers,
    rng: StdRng,
    config: VisualizerConfig,
}

impl Visualizer {
    /// Builds a `rows` x `cols` grid with endpoints placed by [initial_endpoints].
    pub fn new(rows: usize, cols: usize, config: VisualizerConfig) -> Result<Visualizer, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let (start, end) = initial_endpoints(rows, cols);
        let grid = Grid::new(rows, cols, start, end)?;
        let randomize = config.randomize_on_start;
        let mut visualizer = Visualizer::with_grid(grid, config)?;
        if randomize {
            visualizer.randomize_walls(None)?;
        }
        Ok(visualizer)
    }

    /// Wraps an existing grid, keeping its walls.
    pub fn with_grid(mut grid: Grid, config: VisualizerConfig) -> Result<Visualizer, GridError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let result = grid.search()?;
        let stepper = Stepper::from_result(&result);
        Ok(Visualizer {
            grid,
            result,
            stepper,
            markers: Markers::new(),
            rng,
            config,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn result(&self) -> &SearchResult {
        &self.result
    }
    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }
    pub fn markers(&self) -> &Markers {
        &self.markers
    }
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Applies one intent. Returns whether the visible state changed.
    pub fn apply(&mut self, intent: Intent) -> Result<bool, GridError> {
        debug!("Applying {:?}", intent);
        match intent {
            Intent::PaintWall(coords) => {
                let changed = self.grid.set_wall(coords)?;
                self.refresh_if(changed)
            }
            Intent::EraseWall(coords) => {
                let changed = self.grid.clear_wall(coords)?;
                self.refresh_if(changed)
            }
            Intent::DragStartTo(coords) => {
                let changed = self.grid.move_start(coords)?;
                self.refresh_if(changed)
            }
            Intent::DragEndTo(coords) => {
                let changed = self.grid.move_end(coords)?;
                self.refresh_if(changed)
            }
            Intent::RandomWalls(p) => {
                self.randomize_walls(p)?;
                Ok(true)
            }
            Intent::Step(direction) => Ok(self.step(direction).is_some()),
            Intent::Reset => {
                let was_marked = !self.stepper.is_at_start();
                self.reset_animation();
                Ok(was_marked)
            }
        }
    }

    pub fn step(&mut self, direction: Direction) -> Option<Step> {
        self.stepper.step(direction, &mut self.markers)
    }

    pub fn step_forward(&mut self) -> Option<Step> {
        self.step(Direction::Forward)
    }

    pub fn step_backward(&mut self) -> Option<Step> {
        self.step(Direction::Backward)
    }

    /// Clears every marker and rewinds the animation without rerunning the search.
    pub fn reset_animation(&mut self) {
        self.stepper.reset(&mut self.markers);
        self.markers.clear();
    }

    fn randomize_walls(&mut self, p: Option<f64>) -> Result<(), GridError> {
        let p = p.unwrap_or(self.config.wall_probability);
        self.grid.randomize_walls_with(p, &mut self.rng);
        self.refresh()
    }

    fn refresh_if(&mut self, changed: bool) -> Result<bool, GridError> {
        if changed {
            self.refresh()?;
        }
        Ok(changed)
    }

    /// Drops the current animation and searches the edited grid again.
    fn refresh(&mut self) -> Result<(), GridError> {
        self.reset_animation();
        self.grid.reset();
        self.result = self.grid.search()?;
        self.stepper = Stepper::from_result(&self.result);
        info!(
            "Animation rebuilt with {} steps",
            self.stepper.total_steps()
        );
        Ok(())
    }
}
