use stepwise_pathfinding::{
    Direction, Intent, Layer, VertexKind, Visualizer, VisualizerConfig,
};

// Builds a seeded random layout and scrubs the animation forwards to the end and halfway back,
// printing the marker state after each phase.

fn render(vis: &Visualizer) -> String {
    let grid = vis.grid();
    let mut out = String::new();
    for vertex in grid.vertices() {
        let c = vertex.coords();
        let ch = match vis.markers().layer_of(c) {
            Some(Layer::Path) => '*',
            Some(Layer::Visited) => 'o',
            None => match vertex.kind {
                VertexKind::Start => 'S',
                VertexKind::End => 'E',
                VertexKind::Wall => '#',
                VertexKind::Default => '.',
            },
        };
        out.push(ch);
        if c.col + 1 == grid.cols() {
            out.push('\n');
        }
    }
    out
}

fn main() {
    let config = VisualizerConfig {
        seed: Some(2024),
        ..VisualizerConfig::default()
    };
    let mut vis = Visualizer::new(12, 30, config).unwrap();
    println!("{}", vis.grid());

    while vis.apply(Intent::Step(Direction::Forward)).unwrap() {}
    println!("After {} steps:\n{}", vis.stepper().position(), render(&vis));

    let half = vis.stepper().total_steps() / 2;
    while vis.stepper().position() > half {
        vis.apply(Intent::Step(Direction::Backward)).unwrap();
    }
    println!("Back to step {}:\n{}", vis.stepper().position(), render(&vis));

    vis.apply(Intent::Reset).unwrap();
    println!("Markers cleared: {}", vis.markers().is_empty());
}
