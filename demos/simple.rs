use stepwise_pathfinding::{Coordinates, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Moves are orthogonal only.

fn main() {
    let mut grid = Grid::new(3, 3, Coordinates::new(0, 0), Coordinates::new(2, 2)).unwrap();
    grid.set_wall(Coordinates::new(1, 1)).unwrap();
    println!("{}", grid);
    let result = grid.search().unwrap();
    println!("Visited:");
    for p in &result.visited {
        println!("{}", p);
    }
    println!("Path:");
    for p in &result.path {
        println!("{}", p);
    }
}
