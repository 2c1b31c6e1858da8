use rand::prelude::*;
use stepwise_pathfinding::*;

fn c(row: usize, col: usize) -> Coordinates {
    Coordinates::new(row, col)
}

#[test]
fn open_grid_paths_follow_manhattan_distance() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let (rows, cols) = (rng.gen_range(1..10), rng.gen_range(2..10));
        let start = c(rng.gen_range(0..rows), rng.gen_range(0..cols));
        let mut end = start;
        while end == start {
            end = c(rng.gen_range(0..rows), rng.gen_range(0..cols));
        }
        let mut grid = build_grid(rows, cols, start, end).unwrap();
        let result = run_search(&mut grid, start, end).unwrap();
        assert_eq!(result.path.len(), start.manhattan_distance(&end) + 1);
        // Without walls every vertex is finalized in breadth-first layers around the start.
        let layers: Vec<usize> = result
            .visited
            .iter()
            .map(|v| v.manhattan_distance(&start))
            .collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn reset_then_search_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut grid = build_grid(15, 15, c(0, 0), c(14, 14)).unwrap();
    grid.randomize_walls_with(0.25, &mut rng);
    let first = grid.search().unwrap();
    for _ in 0..5 {
        grid.reset();
        assert_eq!(grid.search().unwrap(), first);
    }
}

#[test]
fn stepping_forward_then_back_is_symmetric() {
    let mut grid = Grid::from_ascii(
        "S....\n\
         .###.\n\
         ...#.\n\
         .#.#.\n\
         .#..E",
    )
    .unwrap();
    let result = grid.search().unwrap();
    let total = create_stepper(&result).total_steps();
    for n in 0..=total {
        let mut stepper = create_stepper(&result);
        let mut markers = Markers::new();
        for _ in 0..n {
            stepper.step_forward(&mut markers);
        }
        assert_eq!(stepper.position(), n);
        for _ in 0..n {
            stepper.step_backward(&mut markers);
        }
        assert!(markers.is_empty());
        assert!(stepper.is_at_start());
    }
}

#[test]
fn stepping_past_either_end_is_noop() {
    let mut grid = Grid::from_ascii("S..\n.#.\n..E").unwrap();
    let result = grid.search().unwrap();
    let mut stepper = create_stepper(&result);
    let mut markers = Markers::new();
    assert!(stepper.step_backward(&mut markers).is_none());
    assert_eq!((stepper.visited_cursor(), stepper.path_cursor()), (0, 0));
    stepper.seek(stepper.total_steps(), &mut markers);
    let at_end = (stepper.visited_cursor(), stepper.path_cursor());
    assert_eq!(at_end, (stepper.visited_limit(), stepper.path_limit()));
    assert!(stepper.step_forward(&mut markers).is_none());
    assert_eq!((stepper.visited_cursor(), stepper.path_cursor()), at_end);
    assert_eq!(markers.count(Layer::Path), result.path.len() - 2);
}

#[test]
fn endpoints_never_become_walls() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut grid = build_grid(6, 7, c(0, 0), c(5, 6)).unwrap();
    for _ in 0..5000 {
        let target = c(rng.gen_range(0..6), rng.gen_range(0..7));
        match rng.gen_range(0..5) {
            0 => {
                grid.set_wall(target).unwrap();
            }
            1 => {
                grid.clear_wall(target).unwrap();
            }
            2 => {
                grid.move_start(target).unwrap();
            }
            3 => {
                grid.move_end(target).unwrap();
            }
            _ => grid.randomize_walls_with(0.3, &mut rng),
        }
        let starts: Vec<&Vertex> = grid
            .vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::Start)
            .collect();
        let ends: Vec<&Vertex> = grid
            .vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::End)
            .collect();
        assert_eq!(starts.len(), 1);
        assert_eq!(ends.len(), 1);
        assert_eq!(starts[0].coords(), grid.start());
        assert_eq!(ends[0].coords(), grid.end());
    }
}

#[test]
fn enclosed_end_has_empty_path() {
    let mut grid = build_grid(3, 3, c(0, 0), c(2, 2)).unwrap();
    grid.set_wall(c(1, 2)).unwrap();
    grid.set_wall(c(2, 1)).unwrap();
    let result = run_search(&mut grid, c(0, 0), c(2, 2)).unwrap();
    assert_eq!(result.path.len(), 0);
    let stepper = create_stepper(&result);
    assert_eq!(stepper.path_limit(), 0);
}

#[test]
fn single_row_visits_in_order() {
    let mut grid = build_grid(1, 3, c(0, 0), c(0, 2)).unwrap();
    let result = run_search(&mut grid, c(0, 0), c(0, 2)).unwrap();
    assert_eq!(result.visited, vec![c(0, 0), c(0, 1), c(0, 2)]);
    assert_eq!(result.path, vec![c(0, 0), c(0, 1), c(0, 2)]);
}

#[test]
fn visualizer_replays_intent_stream() {
    let config = VisualizerConfig {
        seed: Some(1),
        randomize_on_start: false,
        ..VisualizerConfig::default()
    };
    let mut vis = Visualizer::new(5, 9, config).unwrap();
    let intents = [
        Intent::PaintWall(c(2, 3)),
        Intent::PaintWall(c(1, 3)),
        Intent::PaintWall(c(3, 3)),
        Intent::Step(Direction::Forward),
        Intent::Step(Direction::Forward),
        Intent::DragEndTo(c(4, 8)),
        Intent::Step(Direction::Forward),
        Intent::Step(Direction::Backward),
        Intent::EraseWall(c(1, 3)),
        Intent::Reset,
    ];
    for intent in intents {
        vis.apply(intent).unwrap();
    }
    assert!(vis.markers().is_empty());
    assert_eq!(vis.grid().wall_count(), 2);
    assert_eq!(vis.grid().end(), c(4, 8));
    assert!(vis.result().is_reachable());
}
